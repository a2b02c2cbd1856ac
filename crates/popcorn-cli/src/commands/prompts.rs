use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use popcorn_models::MAX_STARS;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt for a password (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder.interact().map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Arrow-key menu; returns the index of the chosen item.
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}

/// Prompt for a number with optional default, re-asking on bad input
pub fn prompt_number(prompt: &str, default: Option<u64>, output: &Output) -> Result<u64> {
    loop {
        let mut input_builder = Input::<String>::new().with_prompt(prompt);

        if let Some(default_value) = default {
            input_builder = input_builder.default(default_value.to_string());
        }

        let input_str = input_builder.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))?;

        match parse_number(&input_str, default) {
            Some(num) => return Ok(num),
            None => output.error("Invalid input. Please enter a valid number."),
        }
    }
}

/// Star rating from 0 to 10. 0 means "not rated".
pub fn prompt_stars(prompt: &str, output: &Output) -> Result<u8> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(format!("{} (1-{}, 0 to skip)", prompt, MAX_STARS))
            .default("0".to_string())
            .interact_text()
            .map_err(|e| eyre!("Failed to read input: {}", e))?;

        match parse_stars(&input_str) {
            Some(stars) => return Ok(stars),
            None => output.error(format!("Please enter a whole number from 0 to {}.", MAX_STARS)),
        }
    }
}

fn parse_number(input: &str, default: Option<u64>) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    trimmed.parse::<u64>().ok()
}

fn parse_stars(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u8>().ok().filter(|stars| *stars <= MAX_STARS)
}
