//! Interactive input collection
//!
//! Routes describe what they need as a list of `Question`s and hand them to
//! a `Prompter`, getting back `Answers` keyed by question name. The
//! terminal implementation talks to the user; the scripted one replays
//! canned answers for non-interactive runs and tests.

pub mod editor;
pub mod scripted;
pub mod terminal;

use std::collections::BTreeMap;

use async_trait::async_trait;
use regex::Regex;

use crate::errors::{AppError, AppResult};

pub use scripted::ScriptedPrompter;
pub use terminal::TerminalPrompter;

/// A selectable option: `name` is shown, `value` is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl Choice {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Rule a free-text answer must satisfy
#[derive(Debug, Clone)]
pub enum Validator {
    NonEmpty { hint: String },
    Pattern { pattern: Regex, hint: String },
}

impl Validator {
    pub fn non_empty(hint: impl Into<String>) -> Self {
        Self::NonEmpty { hint: hint.into() }
    }

    pub fn pattern(pattern: &Regex, hint: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.clone(),
            hint: hint.into(),
        }
    }

    /// Check an answer, returning the hint to show when it is rejected
    pub fn check(&self, answer: &str) -> Result<(), String> {
        match self {
            Self::NonEmpty { hint } if answer.trim().is_empty() => Err(hint.clone()),
            Self::Pattern { pattern, hint } if !pattern.is_match(answer) => Err(hint.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum QuestionKind {
    Input { validator: Option<Validator> },
    Editor { validator: Option<Validator> },
    Select { choices: Vec<Choice> },
    MultiSelect { choices: Vec<Choice>, min: usize },
    Confirm { default: bool },
}

/// One field to collect from the user
#[derive(Debug, Clone)]
pub struct Question {
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
}

impl Question {
    fn with_kind(name: &str, message: &str, kind: QuestionKind) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind,
        }
    }

    pub fn input(name: &str, message: &str) -> Self {
        Self::with_kind(name, message, QuestionKind::Input { validator: None })
    }

    pub fn editor(name: &str, message: &str) -> Self {
        Self::with_kind(name, message, QuestionKind::Editor { validator: None })
    }

    pub fn select(name: &str, message: &str, choices: Vec<Choice>) -> Self {
        Self::with_kind(name, message, QuestionKind::Select { choices })
    }

    pub fn multi_select(name: &str, message: &str, choices: Vec<Choice>, min: usize) -> Self {
        Self::with_kind(name, message, QuestionKind::MultiSelect { choices, min })
    }

    pub fn confirm(name: &str, message: &str, default: bool) -> Self {
        Self::with_kind(name, message, QuestionKind::Confirm { default })
    }

    /// Attach a validator to an input or editor question
    pub fn validate(mut self, rule: Validator) -> Self {
        match &mut self.kind {
            QuestionKind::Input { validator } | QuestionKind::Editor { validator } => {
                *validator = Some(rule);
            }
            _ => {}
        }
        self
    }

    /// Check that `answer` is acceptable for this question
    pub fn check(&self, answer: &Answer) -> Result<(), String> {
        match (&self.kind, answer) {
            (
                QuestionKind::Input { validator } | QuestionKind::Editor { validator },
                Answer::Text(text),
            ) => validator.as_ref().map_or(Ok(()), |v| v.check(text)),
            (QuestionKind::Select { choices }, Answer::Text(value)) => {
                if choices.iter().any(|c| &c.value == value) {
                    Ok(())
                } else {
                    Err("Choose one of the listed options.".to_string())
                }
            }
            (QuestionKind::MultiSelect { choices, min }, Answer::List(values)) => {
                if let Some(unknown) = values.iter().find(|v| !choices.iter().any(|c| &c.value == *v)) {
                    Err(format!("'{unknown}' is not one of the listed options."))
                } else if values.len() < *min {
                    Err(format!("Select at least {min}."))
                } else {
                    Ok(())
                }
            }
            (QuestionKind::Confirm { .. }, Answer::Flag(_)) => Ok(()),
            _ => Err("Unexpected kind of answer.".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Answer::Text(text.to_string())
    }
}

impl From<String> for Answer {
    fn from(text: String) -> Self {
        Answer::Text(text)
    }
}

impl From<bool> for Answer {
    fn from(flag: bool) -> Self {
        Answer::Flag(flag)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(values: Vec<&str>) -> Self {
        Answer::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::List(values)
    }
}

/// Collected answers keyed by question name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<String, Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) {
        self.0.insert(name.into(), answer);
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.0.get(name)
    }

    fn missing(name: &str) -> AppError {
        AppError::prompt(format!("no answer was collected for '{name}'"))
    }

    pub fn text(&self, name: &str) -> AppResult<&str> {
        match self.get(name) {
            Some(Answer::Text(text)) => Ok(text),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn list(&self, name: &str) -> AppResult<&[String]> {
        match self.get(name) {
            Some(Answer::List(values)) => Ok(values),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn flag(&self, name: &str) -> AppResult<bool> {
        match self.get(name) {
            Some(Answer::Flag(flag)) => Ok(*flag),
            _ => Err(Self::missing(name)),
        }
    }

    /// Every free-text answer, as a plain field map
    pub fn texts(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|(name, answer)| match answer {
                Answer::Text(text) => Some((name.clone(), text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Asks the user for answers matching a list of questions
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, questions: &[Question]) -> AppResult<Answers>;

    async fn input(&self, message: &str) -> AppResult<String> {
        let answers = self.ask(&[Question::input("text", message)]).await?;
        answers.text("text").map(str::to_string)
    }

    async fn editor(&self, message: &str) -> AppResult<String> {
        let answers = self.ask(&[Question::editor("text", message)]).await?;
        answers.text("text").map(str::to_string)
    }

    async fn select(&self, message: &str, choices: Vec<Choice>) -> AppResult<String> {
        let answers = self.ask(&[Question::select("choice", message, choices)]).await?;
        answers.text("choice").map(str::to_string)
    }

    async fn multi_select(&self, message: &str, choices: Vec<Choice>) -> AppResult<Vec<String>> {
        let answers = self
            .ask(&[Question::multi_select("choices", message, choices, 0)])
            .await?;
        answers.list("choices").map(<[String]>::to_vec)
    }

    async fn confirm(&self, message: &str, default: bool) -> AppResult<bool> {
        let answers = self.ask(&[Question::confirm("confirmed", message, default)]).await?;
        answers.flag("confirmed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_hints() {
        let non_empty = Validator::non_empty("Please enter a name.");
        assert_eq!(non_empty.check("  "), Err("Please enter a name.".to_string()));
        assert!(non_empty.check("Acme").is_ok());

        let hex = Regex::new("^[0-9a-f]{4}$").unwrap();
        let pattern = Validator::pattern(&hex, "Four hex digits.");
        assert!(pattern.check("beef").is_ok());
        assert_eq!(pattern.check("BEEF"), Err("Four hex digits.".to_string()));
    }

    #[test]
    fn test_select_answers_must_be_listed() {
        let question = Question::select("org", "Pick:", vec![Choice::new("Acme", "acme")]);
        assert!(question.check(&Answer::from("acme")).is_ok());
        assert!(question.check(&Answer::from("Acme")).is_err());
        assert!(question.check(&Answer::Flag(true)).is_err());
    }

    #[test]
    fn test_multi_select_minimum() {
        let choices = vec![Choice::new("A", "a"), Choice::new("B", "b")];
        let question = Question::multi_select("pick", "Pick:", choices, 1);
        assert!(question.check(&Answer::from(vec!["a", "b"])).is_ok());
        assert_eq!(question.check(&Answer::List(vec![])), Err("Select at least 1.".to_string()));
        assert!(question.check(&Answer::from(vec!["c"])).is_err());
    }

    #[test]
    fn test_validate_only_applies_to_text_questions() {
        let question = Question::input("name", "Name:").validate(Validator::non_empty("Required."));
        assert!(question.check(&Answer::from("")).is_err());

        let confirm = Question::confirm("ok", "Sure?", false).validate(Validator::non_empty("x"));
        assert!(matches!(confirm.kind, QuestionKind::Confirm { default: false }));
    }

    #[test]
    fn test_answers_accessors() {
        let answers: Answers = [
            ("name", Answer::from("Acme")),
            ("friends", Answer::from(vec!["a"])),
            ("ok", Answer::from(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(answers.text("name").unwrap(), "Acme");
        assert_eq!(answers.list("friends").unwrap(), ["a".to_string()]);
        assert!(answers.flag("ok").unwrap());
        assert!(answers.text("ok").is_err());
        assert_eq!(answers.texts().len(), 1);
    }
}
