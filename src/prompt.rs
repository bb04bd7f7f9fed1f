//! Prompt Adapter
//!
//! One question in, one typed answer out. Implementations may fail when no
//! interactive input is available.

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedPrompt;
pub use terminal::TerminalPrompt;

use crate::error::PromptError;

/// One selectable entry: `title` is displayed, `value` is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

impl Choice {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Select {
        message: String,
        choices: Vec<Choice>,
    },
    MultiSelect {
        message: String,
        choices: Vec<Choice>,
    },
    Text {
        message: String,
        initial: Option<String>,
        /// Empty answers are re-asked with "<message> required"
        required: bool,
    },
    Confirm {
        message: String,
    },
}

impl Question {
    pub fn message(&self) -> &str {
        match self {
            Question::Select { message, .. }
            | Question::MultiSelect { message, .. }
            | Question::Text { message, .. }
            | Question::Confirm { message } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Value of the chosen entry
    Choice(String),
    Choices(Vec<String>),
    Text(String),
    Confirmed(bool),
}

impl Answer {
    fn kind(&self) -> &'static str {
        match self {
            Answer::Choice(_) => "choice",
            Answer::Choices(_) => "choices",
            Answer::Text(_) => "text",
            Answer::Confirmed(_) => "confirmation",
        }
    }
}

pub trait Prompt {
    fn ask(&mut self, question: &Question) -> Result<Answer, PromptError>;

    /// Show a message that needs no answer.
    fn notify(&mut self, message: &str);
}

impl dyn Prompt + '_ {
    pub fn select(&mut self, message: &str, choices: Vec<Choice>) -> Result<String, PromptError> {
        let question = Question::Select {
            message: message.to_string(),
            choices,
        };
        match self.ask(&question)? {
            Answer::Choice(value) => Ok(value),
            other => Err(PromptError::UnexpectedAnswer {
                expected: "choice",
                got: other.kind(),
            }),
        }
    }

    pub fn multi_select(
        &mut self,
        message: &str,
        choices: Vec<Choice>,
    ) -> Result<Vec<String>, PromptError> {
        let question = Question::MultiSelect {
            message: message.to_string(),
            choices,
        };
        match self.ask(&question)? {
            Answer::Choices(values) => Ok(values),
            other => Err(PromptError::UnexpectedAnswer {
                expected: "choices",
                got: other.kind(),
            }),
        }
    }

    pub fn text(
        &mut self,
        message: &str,
        initial: Option<&str>,
        required: bool,
    ) -> Result<String, PromptError> {
        let question = Question::Text {
            message: message.to_string(),
            initial: initial.map(str::to_string),
            required,
        };
        match self.ask(&question)? {
            Answer::Text(value) => Ok(value),
            other => Err(PromptError::UnexpectedAnswer {
                expected: "text",
                got: other.kind(),
            }),
        }
    }

    pub fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        let question = Question::Confirm {
            message: message.to_string(),
        };
        match self.ask(&question)? {
            Answer::Confirmed(value) => Ok(value),
            other => Err(PromptError::UnexpectedAnswer {
                expected: "confirmation",
                got: other.kind(),
            }),
        }
    }
}
