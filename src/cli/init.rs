//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_API_HOST};
use crate::error::Result;

/// Run the init command
///
/// Writes the config file, keeping preferences from an existing one. The
/// backend host comes from `--api-host` when given, otherwise it is
/// prompted for.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to rosterop!".bold().green());
    println!("Let's point rosterop at your student records backend.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;

    let api_host = match opts.api_host_ref() {
        Some(host) => host.to_string(),
        None => {
            let current = config.api_host(None);
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Backend URL")
                .default(current)
                .interact_text()?
        }
    };

    let api_host = api_host.trim().trim_end_matches('/').to_string();
    config.api_host = if api_host.is_empty() || api_host == DEFAULT_API_HOST {
        None
    } else {
        Some(api_host)
    };

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    println!("  Backend: {}", config.api_host(None).bold());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Create an account", "rosterop register".cyan());
    println!("  {} - Sign in and list students", "rosterop login".cyan());

    Ok(())
}
