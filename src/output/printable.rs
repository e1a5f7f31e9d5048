//! Printable message values
//!
//! A `Printable` is a typed message that any part of the application can
//! hand to a printer. Group printables nest other printables so a route can
//! return an ordered, heterogeneous block of output as a single value.

use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// The six kinds of printable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintKind {
    /// Contains other printables
    Print,
    /// Confirms something with the user
    Confirm,
    /// Informs the user an operation was successful
    Success,
    /// Warns a user of potential consequences
    Warning,
    /// Informs the user an error occurred
    Error,
    /// No specific context, printed as-is
    Raw,
}

impl PrintKind {
    pub const ALL: [PrintKind; 6] = [
        PrintKind::Print,
        PrintKind::Confirm,
        PrintKind::Success,
        PrintKind::Warning,
        PrintKind::Error,
        PrintKind::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrintKind::Print => "print",
            PrintKind::Confirm => "confirm",
            PrintKind::Success => "success",
            PrintKind::Warning => "warning",
            PrintKind::Error => "error",
            PrintKind::Raw => "raw",
        }
    }
}

impl fmt::Display for PrintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrintKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::InvalidPrintable {
                reason: format!(
                    "a printable must be of one of the following types {}",
                    PrintKind::ALL.map(|k| k.as_str()).join(", ")
                ),
            })
    }
}

/// The payload handed to `Printable::new`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Nested(Vec<Printable>),
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<Vec<Printable>> for Message {
    fn from(children: Vec<Printable>) -> Self {
        Message::Nested(children)
    }
}

/// Borrowed view of a printable's contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageRef<'a> {
    Text(PrintKind, &'a str),
    Nested(&'a [Printable]),
}

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Group(Vec<Printable>),
    Line { kind: PrintKind, text: String },
}

/// An immutable, already-validated message
#[derive(Debug, Clone, PartialEq)]
pub struct Printable(Repr);

impl Printable {
    /// Build a printable, checking that the kind and payload agree
    ///
    /// `print` requires a nested sequence; every other kind requires text.
    pub fn new(kind: PrintKind, message: impl Into<Message>) -> AppResult<Self> {
        match (kind, message.into()) {
            (PrintKind::Print, Message::Nested(children)) => Ok(Self(Repr::Group(children))),
            (PrintKind::Print, Message::Text(_)) => Err(AppError::InvalidPrintable {
                reason: "a print printable must contain a sequence of printables".to_string(),
            }),
            (kind, Message::Text(text)) => Ok(Self(Repr::Line { kind, text })),
            (kind, Message::Nested(_)) => Err(AppError::InvalidPrintable {
                reason: format!("a {kind} printable must contain text"),
            }),
        }
    }

    /// Build a printable from a type name, as read from configuration or tests
    pub fn parse(kind: &str, message: impl Into<Message>) -> AppResult<Self> {
        Self::new(kind.parse()?, message)
    }

    pub fn group(children: Vec<Printable>) -> Self {
        Self(Repr::Group(children))
    }

    pub fn confirm(text: impl Into<String>) -> Self {
        Self::line(PrintKind::Confirm, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::line(PrintKind::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::line(PrintKind::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::line(PrintKind::Error, text)
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::line(PrintKind::Raw, text)
    }

    fn line(kind: PrintKind, text: impl Into<String>) -> Self {
        Self(Repr::Line {
            kind,
            text: text.into(),
        })
    }

    pub fn kind(&self) -> PrintKind {
        match &self.0 {
            Repr::Group(_) => PrintKind::Print,
            Repr::Line { kind, .. } => *kind,
        }
    }

    pub fn message(&self) -> MessageRef<'_> {
        match &self.0 {
            Repr::Group(children) => MessageRef::Nested(children),
            Repr::Line { kind, text } => MessageRef::Text(*kind, text),
        }
    }

    /// The text of a single-line printable, `None` for groups
    pub fn text(&self) -> Option<&str> {
        match &self.0 {
            Repr::Group(_) => None,
            Repr::Line { text, .. } => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whitelisted_kinds() {
        for name in ["confirm", "success", "warning", "error", "raw"] {
            let printable = Printable::parse(name, "hello").unwrap();
            assert_eq!(printable.kind().as_str(), name);
            assert_eq!(printable.text(), Some("hello"));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Printable::parse("shout", "hello").unwrap_err();
        assert!(matches!(err, AppError::InvalidPrintable { .. }));
        assert!(err.to_string().contains("print, confirm, success, warning, error, raw"));
    }

    #[test]
    fn test_print_kind_requires_sequence() {
        assert!(Printable::new(PrintKind::Print, "not a list").is_err());

        let group = Printable::new(PrintKind::Print, vec![Printable::raw("a")]).unwrap();
        assert_eq!(group.kind(), PrintKind::Print);
        assert_eq!(group.text(), None);
    }

    #[test]
    fn test_line_kind_rejects_sequence() {
        let err = Printable::new(PrintKind::Success, vec![Printable::raw("a")]).unwrap_err();
        assert!(err.to_string().contains("success printable must contain text"));
    }

    #[test]
    fn test_message_view() {
        let group = Printable::group(vec![Printable::warning("careful")]);
        match group.message() {
            MessageRef::Nested(children) => {
                assert_eq!(children.len(), 1);
                assert_eq!(
                    children[0].message(),
                    MessageRef::Text(PrintKind::Warning, "careful")
                );
            }
            other => panic!("expected nested message, got {other:?}"),
        }
    }
}
