//! Interactive prompts over `inquire` with crate error mapping.

use inquire::{
    Confirm, MultiSelect, Select, Text,
    error::InquireError,
    validator::Validation,
};

use crate::error::{Error, Result};

/// Map an inquire failure into a crate error.
fn map_error(error: InquireError) -> Error {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            Error::PromptCanceled
        }
        error => Error::PromptFailed {
            message: error.to_string(),
        },
    }
}

/// Ask a yes/no question.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Confirm::new(message)
        .with_default(default)
        .prompt()
        .map_err(map_error)
}

/// Ask for free text, optionally pre-filled with `default`.
pub fn text(message: &str, default: Option<&str>) -> Result<String> {
    let mut prompt = Text::new(message);
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    prompt.prompt().map_err(map_error)
}

/// Ask for free text that must satisfy `check`, which returns an error
/// message for rejected input.
pub fn validated_text(
    message: &str,
    default: Option<&str>,
    check: fn(&str) -> Option<&'static str>,
) -> Result<String> {
    let mut prompt = Text::new(message).with_validator(move |input: &str| {
        Ok(match check(input) {
            Some(reason) => Validation::Invalid(reason.into()),
            None => Validation::Valid,
        })
    });
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    prompt.prompt().map_err(map_error)
}

/// Pick one entry from `labels`, returning its index.
pub fn select(message: &str, labels: Vec<String>, start: usize) -> Result<usize> {
    Select::new(message, labels)
        .with_starting_cursor(start)
        .raw_prompt()
        .map(|choice| choice.index)
        .map_err(map_error)
}

/// Pick any number of entries from `labels`, returning their indices.
pub fn multi_select(message: &str, labels: Vec<String>, checked: &[usize]) -> Result<Vec<usize>> {
    MultiSelect::new(message, labels)
        .with_default(checked)
        .raw_prompt()
        .map(|choices| choices.into_iter().map(|choice| choice.index).collect())
        .map_err(map_error)
}
