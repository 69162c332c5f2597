//! User-facing messages for operation results.
//!
//! Both the terminal form and the subcommands report outcomes through these
//! helpers so the wording and severity stay the same everywhere.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::model::RecordId;
use crate::store::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validation failures warn; parse and storage failures are critical and
/// carry the underlying error text.
pub fn for_error(err: &Error) -> Message {
    match err.kind() {
        ErrorKind::Validation => Message::new(Severity::Warning, format!("{err}.")),
        ErrorKind::Parse | ErrorKind::Storage => Message::new(Severity::Critical, err.to_string()),
    }
}

pub fn created(id: RecordId) -> Message {
    Message::new(Severity::Success, format!("Record {id} added."))
}

pub fn searched<T>(outcome: &Outcome<Vec<T>>) -> Message {
    match outcome {
        Outcome::Matched(rows) => Message::new(
            Severity::Success,
            format!("{} record{} found.", rows.len(), plural(rows.len())),
        ),
        Outcome::NotFound => Message::new(Severity::Info, "No records found."),
    }
}

pub fn updated(outcome: &Outcome<usize>) -> Message {
    match outcome {
        Outcome::Matched(n) => {
            Message::new(Severity::Success, format!("Updated {n} record{}.", plural(*n)))
        }
        Outcome::NotFound => Message::new(Severity::Warning, "Composer not found."),
    }
}

pub fn deleted(outcome: &Outcome<usize>) -> Message {
    match outcome {
        Outcome::Matched(n) => {
            Message::new(Severity::Success, format!("Deleted {n} record{}.", plural(*n)))
        }
        Outcome::NotFound => Message::new(Severity::Warning, "Composer not found."),
    }
}

pub fn empty_catalog() -> Message {
    Message::new(Severity::Info, "The database is empty.")
}

const fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_validation_is_warning() {
        let msg = for_error(&Error::MissingField(Field::Composer));
        assert_eq!(msg.severity, Severity::Warning);
        assert_eq!(msg.text, "Composer is required.");
    }

    #[test]
    fn test_parse_is_critical_with_detail() {
        let source = "x".parse::<i64>().unwrap_err();
        let msg = for_error(&Error::InvalidSeconds {
            value: "x".to_string(),
            source,
        });
        assert_eq!(msg.severity, Severity::Critical);
        assert!(msg.text.contains("invalid digit"));
    }

    #[test]
    fn test_not_found_is_not_an_error() {
        assert_eq!(updated(&Outcome::NotFound).severity, Severity::Warning);
        assert_eq!(deleted(&Outcome::NotFound).text, "Composer not found.");
        assert_eq!(searched::<()>(&Outcome::NotFound).severity, Severity::Info);
    }

    #[test]
    fn test_counts_in_messages() {
        assert_eq!(deleted(&Outcome::Matched(3)).text, "Deleted 3 records.");
        assert_eq!(updated(&Outcome::Matched(1)).text, "Updated 1 record.");
        assert_eq!(searched(&Outcome::Matched(vec![1, 2])).text, "2 records found.");
        assert_eq!(created(RecordId::new(9)).text, "Record 9 added.");
    }
}
