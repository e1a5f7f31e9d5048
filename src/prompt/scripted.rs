//! Prompter replaying a queue of canned answers

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{Answer, Answers, Prompter, Question, QuestionKind};
use crate::errors::{AppError, AppResult};

/// Answers questions from a fixed script, one answer per question
///
/// Select questions accept either the choice value or its display name.
/// Every answer still goes through the question's validation, so a script
/// cannot sneak in input the terminal would have rejected.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Answer>> {
        self.answers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn resolve(question: &Question, answer: Answer) -> Answer {
        let by_name = |token: &str| match &question.kind {
            QuestionKind::Select { choices } | QuestionKind::MultiSelect { choices, .. } => choices
                .iter()
                .find(|c| c.value != token && c.name == token)
                .map(|c| c.value.clone()),
            _ => None,
        };
        match answer {
            Answer::Text(text) => Answer::Text(by_name(text.as_str()).unwrap_or(text)),
            Answer::List(values) => Answer::List(
                values
                    .into_iter()
                    .map(|v| by_name(v.as_str()).unwrap_or(v))
                    .collect(),
            ),
            flag => flag,
        }
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&self, questions: &[Question]) -> AppResult<Answers> {
        let mut answers = Answers::new();
        for question in questions {
            let answer = self.queue().pop_front().ok_or_else(|| {
                AppError::prompt(format!("no scripted answer left for '{}'", question.name))
            })?;
            let answer = Self::resolve(question, answer);
            question
                .check(&answer)
                .map_err(|reason| AppError::InvalidAnswer {
                    field: question.name.clone(),
                    reason,
                })?;
            debug!("Scripted answer for {}: {:?}", question.name, answer);
            answers.insert(question.name.clone(), answer);
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Choice, Validator};

    #[tokio::test]
    async fn test_answers_are_consumed_in_order() {
        let prompter = ScriptedPrompter::new([Answer::from("acme"), Answer::from("Acme")]);
        let answers = prompter
            .ask(&[Question::input("key", "Key:"), Question::input("name", "Name:")])
            .await
            .unwrap();

        assert_eq!(answers.text("key").unwrap(), "acme");
        assert_eq!(answers.text("name").unwrap(), "Acme");
        assert!(prompter.queue().is_empty());
    }

    #[tokio::test]
    async fn test_select_accepts_display_name() {
        let prompter = ScriptedPrompter::new([Answer::from("Globex")]);
        let choices = vec![Choice::new("Acme", "acme"), Choice::new("Globex", "globex")];
        assert_eq!(prompter.select("Pick:", choices).await.unwrap(), "globex");
    }

    #[tokio::test]
    async fn test_validation_still_applies() {
        let prompter = ScriptedPrompter::new([Answer::from("")]);
        let question = Question::input("name", "Name:").validate(Validator::non_empty("Required."));

        let err = prompter.ask(&[question]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidAnswer { field, .. } if field == "name"));
    }

    #[tokio::test]
    async fn test_running_out_of_answers() {
        let prompter = ScriptedPrompter::default();
        let err = prompter.confirm("Sure?", true).await.unwrap_err();
        assert!(matches!(err, AppError::Prompt { .. }));
    }
}
