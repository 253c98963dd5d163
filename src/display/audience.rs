//! Audience resolution: which single audience drives display for a record.
//!
//! A record may carry more than one populated audience field because
//! exclusivity is only enforced by the compose form. Display applies a
//! fixed priority: teams, then rosters, then all users, then AD groups.

use serde::Serialize;

use crate::models::notification::NotificationRecord;

use super::locale::ListStyle;

/// Warning shown whenever a message targets every user.
pub const ALL_USERS_WARNING: &str =
    "Note: This option sends the message to everyone in your org who has access to the app.";

/// The authoritative audience of a record, with names sorted for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "names", rename_all = "snake_case")]
pub enum AudienceView {
    /// Posted to the General channel of each team.
    Teams(Vec<String>),
    /// Sent in personal chat to each member of the teams.
    Rosters(Vec<String>),
    /// Sent in personal chat to everyone with the app installed.
    AllUsers,
    /// Sent in personal chat to members of the groups.
    AdGroups(Vec<String>),
    /// No audience chosen yet.
    None,
}

impl AudienceView {
    /// Section heading for the audience.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Teams(_) => "Send to General channel of the following teams",
            Self::Rosters(_) => "Send in chat to members of the following teams",
            Self::AllUsers => "Send in chat to everyone",
            Self::AdGroups(_) => "Send in chat to members of the following groups",
            Self::None => "No recipients selected",
        }
    }

    /// Sorted names carried by the variant; empty for `AllUsers` and `None`.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Teams(names) | Self::Rosters(names) | Self::AdGroups(names) => names,
            Self::AllUsers | Self::None => &[],
        }
    }

    /// Names joined for display, e.g. `Finance, HR and Sales`.
    #[must_use]
    pub fn display_names(&self, style: &ListStyle) -> String {
        style.join(self.names())
    }

    /// Fixed warning attached to the all-users audience.
    #[must_use]
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::AllUsers => Some(ALL_USERS_WARNING),
            _ => None,
        }
    }
}

fn sorted(names: &[String]) -> Vec<String> {
    let mut names = names.to_vec();
    names.sort();
    names
}

/// Select the audience that drives display for `record`.
#[must_use]
pub fn resolve(record: &NotificationRecord) -> AudienceView {
    if !record.teams.is_empty() {
        AudienceView::Teams(sorted(&record.teams))
    } else if !record.rosters.is_empty() {
        AudienceView::Rosters(sorted(&record.rosters))
    } else if record.all_users {
        AudienceView::AllUsers
    } else if !record.ad_groups.is_empty() {
        AudienceView::AdGroups(sorted(&record.ad_groups))
    } else {
        AudienceView::None
    }
}
