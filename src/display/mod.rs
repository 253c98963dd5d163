//! Pure display computations over a notification record snapshot.
//!
//! Each function is independent and total: callers compose them, and any
//! irregular input degrades to a documented fallback instead of an error.

pub mod audience;
pub mod locale;
pub mod recurrence;
pub mod tally;

pub use audience::{resolve, AudienceView};
pub use locale::{DateStyle, ListStyle};
pub use recurrence::{describe, validate_recurrence};
pub use tally::{tally, DeliverySummary, SendDuration};
