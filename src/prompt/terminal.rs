//! Line-oriented prompting on stdin/stdout

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use super::{editor, Answer, Answers, Choice, Prompter, Question, QuestionKind};
use crate::errors::{AppError, AppResult};

/// Asks questions on the terminal, re-asking until each answer is valid
pub struct TerminalPrompter {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn write(&self, text: &str) -> AppResult<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }

    async fn read_line(&self) -> AppResult<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }

    async fn require_line(&self) -> AppResult<String> {
        self.read_line()
            .await?
            .ok_or_else(|| AppError::prompt("input closed before all questions were answered"))
    }

    /// Lines up to a bare `.` or the end of input
    async fn read_until_dot(&self) -> AppResult<String> {
        let mut body = Vec::new();
        while let Some(line) = self.read_line().await? {
            if line.trim() == "." {
                break;
            }
            body.push(line);
        }
        Ok(body.join("\n"))
    }

    fn render_choices(message: &str, choices: &[Choice]) -> String {
        let mut text = format!("? {message}\n");
        for (index, choice) in choices.iter().enumerate() {
            text.push_str(&format!("  {}) {}\n", index + 1, choice.name));
        }
        text
    }

    fn pick(choices: &[Choice], token: &str) -> Option<String> {
        let index: usize = token.trim().parse().ok()?;
        choices.get(index.checked_sub(1)?).map(|c| c.value.clone())
    }

    async fn read_answer(&self, question: &Question) -> AppResult<Result<Answer, String>> {
        let answer = match &question.kind {
            QuestionKind::Input { .. } => {
                self.write(&format!("? {} ", question.message)).await?;
                Ok(Answer::Text(self.require_line().await?.trim().to_string()))
            }
            QuestionKind::Editor { .. } => match editor::find_editor() {
                Some(command) => {
                    self.write(&format!("? {} (opening {command})\n", question.message))
                        .await?;
                    let text = tokio::task::spawn_blocking(move || editor::edit(&command))
                        .await
                        .map_err(|e| AppError::prompt(format!("editor did not finish: {e}")))??;
                    Ok(Answer::Text(text))
                }
                None => {
                    self.write(&format!(
                        "? {} (finish with a line containing only '.')\n",
                        question.message
                    ))
                    .await?;
                    Ok(Answer::Text(self.read_until_dot().await?))
                }
            },
            QuestionKind::Select { choices } => {
                if choices.is_empty() {
                    return Err(AppError::prompt(format!(
                        "nothing to choose from for '{}'",
                        question.name
                    )));
                }
                self.write(&Self::render_choices(&question.message, choices)).await?;
                self.write(&format!("Select [1-{}]: ", choices.len())).await?;
                let line = self.require_line().await?;
                Self::pick(choices, &line)
                    .map(Answer::Text)
                    .ok_or_else(|| "Enter the number of one of the options.".to_string())
            }
            QuestionKind::MultiSelect { choices, .. } => {
                self.write(&Self::render_choices(&question.message, choices)).await?;
                self.write("Select (comma separated numbers, blank for none): ").await?;
                let line = self.require_line().await?;
                line.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        Self::pick(choices, token)
                            .ok_or_else(|| format!("'{token}' is not one of the options."))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Answer::List)
            }
            QuestionKind::Confirm { default } => {
                let hint = if *default { "(Y/n)" } else { "(y/N)" };
                self.write(&format!("? {} {} ", question.message, hint)).await?;
                let line = self.require_line().await?;
                match line.trim().to_lowercase().as_str() {
                    "" => Ok(Answer::Flag(*default)),
                    "y" | "yes" => Ok(Answer::Flag(true)),
                    "n" | "no" => Ok(Answer::Flag(false)),
                    _ => Err("Please answer yes or no.".to_string()),
                }
            }
        };
        Ok(answer)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&self, questions: &[Question]) -> AppResult<Answers> {
        let mut answers = Answers::new();
        for question in questions {
            loop {
                let checked = self
                    .read_answer(question)
                    .await?
                    .and_then(|answer| question.check(&answer).map(|_| answer));
                match checked {
                    Ok(answer) => {
                        answers.insert(question.name.clone(), answer);
                        break;
                    }
                    Err(hint) => self.write(&format!(">> {hint}\n")).await?,
                }
            }
        }
        Ok(answers)
    }
}
