//! Interactive terminal prompt backed by dialoguer.

use crate::error::PromptError;
use crate::prompt::{Answer, Prompt, Question};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &Question) -> Result<Answer, PromptError> {
        match question {
            Question::Select { message, choices } => {
                let titles: Vec<&str> = choices.iter().map(|c| c.title.as_str()).collect();
                let index = Select::with_theme(&self.theme)
                    .with_prompt(message)
                    .items(&titles)
                    .default(0)
                    .interact()?;
                let choice = choices.get(index).ok_or_else(|| {
                    PromptError::Unavailable(format!("selection {} out of range", index))
                })?;
                Ok(Answer::Choice(choice.value.clone()))
            }
            Question::MultiSelect { message, choices } => {
                let titles: Vec<&str> = choices.iter().map(|c| c.title.as_str()).collect();
                let indices = MultiSelect::with_theme(&self.theme)
                    .with_prompt(message)
                    .items(&titles)
                    .interact()?;
                let values = indices
                    .into_iter()
                    .filter_map(|i| choices.get(i).map(|c| c.value.clone()))
                    .collect();
                Ok(Answer::Choices(values))
            }
            Question::Text {
                message,
                initial,
                required,
            } => {
                let required = *required;
                let required_message = format!("{} required", message);
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(message)
                    .allow_empty(true)
                    .validate_with(move |value: &String| -> Result<(), String> {
                        if required && value.trim().is_empty() {
                            Err(required_message.clone())
                        } else {
                            Ok(())
                        }
                    });
                if let Some(initial) = initial {
                    input = input.with_initial_text(initial);
                }
                Ok(Answer::Text(input.interact_text()?))
            }
            Question::Confirm { message } => {
                let confirmed = Confirm::with_theme(&self.theme)
                    .with_prompt(message)
                    .default(false)
                    .interact()?;
                Ok(Answer::Confirmed(confirmed))
            }
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}
