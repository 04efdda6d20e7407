//! Terminal prompts via dialoguer.

use dialoguer::{Input, Password, Select};

use crate::application::ports::Prompter;

/// Production [`Prompter`] backed by the operator's terminal.
///
/// A closed input stream (or any other prompt failure) maps to `None`, not
/// an error: downstream stages fill the field or reject the run, per the
/// resolution contract.
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        let mut question = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            question = question.default(default.to_string());
        }
        question
            .interact_text()
            .ok()
            .filter(|answer| !answer.is_empty())
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Option<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .ok()
    }

    fn secret(&self, prompt: &str) -> Option<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .ok()
            .filter(|answer| !answer.is_empty())
    }
}
