//! Domain model module declarations.

pub mod notification;
