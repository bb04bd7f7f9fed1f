//! Prompt that answers from a queue and records every question asked.

use crate::error::PromptError;
use crate::prompt::{Answer, Prompt, Question};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    asked: Vec<Question>,
    notices: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Prompt with no answers; any question fails with `Exhausted`.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn asked(&self) -> &[Question] {
        &self.asked
    }

    pub fn messages(&self) -> Vec<&str> {
        self.asked.iter().map(Question::message).collect()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &Question) -> Result<Answer, PromptError> {
        self.asked.push(question.clone());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(question.message().to_string()))
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
