//! Terminal rendering of view popups and form messages

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::json;
use crate::views::{Popup, PopupKind};

/// JSON shape of a popup
#[derive(Debug, Serialize)]
pub struct PopupDisplay<'a> {
    pub kind: &'static str,
    pub title: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a Popup> for PopupDisplay<'a> {
    fn from(popup: &'a Popup) -> Self {
        Self {
            kind: match popup.kind {
                PopupKind::Success => "success",
                PopupKind::Error => "error",
            },
            title: &popup.title,
            message: &popup.message,
        }
    }
}

/// Render a popup as a coloured two-line block
pub fn render(popup: &Popup) -> String {
    let (marker, title) = match popup.kind {
        PopupKind::Success => ("✓".green(), popup.title.bold().green()),
        PopupKind::Error => ("✗".red(), popup.title.bold().red()),
    };
    format!("{} {}\n  {}", marker, title, popup.message)
}

/// Print a popup: JSON on stdout, otherwise rendered (errors on stderr)
pub fn print(popup: &Popup, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", json::format_json(&PopupDisplay::from(popup))?);
    } else if popup.kind == PopupKind::Error {
        eprintln!("{}", render(popup));
    } else {
        println!("{}", render(popup));
    }
    Ok(())
}

/// Render field validation messages, one per line
pub fn render_field_messages(messages: &[(&str, &str)]) -> String {
    messages
        .iter()
        .map(|(field, message)| format!("  {} {}: {}", "•".yellow(), field, message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_title_and_message() {
        colored::control::set_override(false);
        let rendered = render(&Popup::error("Échec de connexion", "Identifiant ou mot de passe incorrect"));

        assert_eq!(
            rendered,
            "✗ Échec de connexion\n  Identifiant ou mot de passe incorrect"
        );
    }

    #[test]
    fn test_popup_display_kind() {
        let popup = Popup::success("Connexion réussie", "ok");
        let display = PopupDisplay::from(&popup);
        assert_eq!(display.kind, "success");
        assert_eq!(display.title, "Connexion réussie");
    }

    #[test]
    fn test_render_field_messages() {
        colored::control::set_override(false);
        let rendered = render_field_messages(&[("login", "L’identifiant est requis")]);
        assert_eq!(rendered, "  • login: L’identifiant est requis");
    }
}
