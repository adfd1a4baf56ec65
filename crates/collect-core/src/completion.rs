use crate::constants::COMPLETION_MARKER;
use chrono::NaiveDateTime;

/// Format the 14-digit `YYYYMMDDHHMMSS` completion code from local time.
///
/// `completed_previously` appends [`COMPLETION_MARKER`] for sets finished in
/// an earlier session.
pub fn completion_code(local_now: NaiveDateTime, completed_previously: bool) -> String {
    let stamp = local_now.format("%Y%m%d%H%M%S").to_string();
    if completed_previously {
        format!("{stamp}{COMPLETION_MARKER}")
    } else {
        stamp
    }
}

/// What a completion check decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    Incomplete,
    /// First time every item was captured; celebration fired.
    FirstCompletion { code: String },
    /// Already completed before; code shown again.
    AlreadyCompleted { code: String },
}

impl CompletionOutcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Incomplete => None,
            CompletionOutcome::FirstCompletion { code }
            | CompletionOutcome::AlreadyCompleted { code } => Some(code),
        }
    }
}
