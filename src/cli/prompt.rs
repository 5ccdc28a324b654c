//! Terminal prompts backing the view confirmations and form input

use colored::Colorize;
use dialoguer::{Confirm as ConfirmPrompt, Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::error::Result;
use crate::views::Confirm;

/// Yes/no confirmation on the terminal
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        ConfirmPrompt::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                debug!("Confirmation prompt failed: {}", e);
                false
            })
    }
}

/// Use `value` if given, otherwise prompt for it (pre-filled with `initial`)
pub fn text(label: &str, value: Option<String>, initial: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let theme = ColorfulTheme::default();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(label)
        .allow_empty(true);
    let input = if initial.is_empty() {
        input
    } else {
        input.with_initial_text(initial)
    };
    Ok(input.interact_text()?)
}

/// Use `value` if given, otherwise prompt without echo
pub fn secret(label: &str, value: Option<String>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()?)
}

/// Print an alert line below a form
pub fn alert(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.yellow());
}
