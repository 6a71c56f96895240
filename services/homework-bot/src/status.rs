//! Catalog of review statuses and their verdict texts

use std::str::FromStr;

use crate::error::FormatError;

/// A review status reported by the homework API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Status code as it appears on the wire
    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown to the user
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Review complete: the reviewer liked everything. Hooray!",
            HomeworkStatus::Reviewing => "The work has been taken for review.",
            HomeworkStatus::Rejected => "Review complete: the reviewer has comments.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = FormatError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| FormatError::UnknownStatus(code.to_string()))
    }
}
