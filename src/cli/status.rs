//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::json;

#[derive(Debug, Serialize)]
struct StatusDisplay {
    config_file: String,
    config_found: bool,
    api_host: String,
    session_file: String,
    signed_in: bool,
}

/// Run the status command to display configuration and session status
pub fn run(ctx: &CommandContext) -> Result<()> {
    let status = StatusDisplay {
        config_file: ctx.config_path.display().to_string(),
        config_found: ctx.config_path.exists(),
        api_host: ctx.client.base_url().trim_end_matches("/api").to_string(),
        session_file: Config::session_path(&ctx.config_path).display().to_string(),
        signed_in: ctx.store.has_token(),
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", json::format_json(&status)?);
        return Ok(());
    }

    println!("{}\n", "rosterop Status".bold());
    println!("Config file: {}", status.config_file.cyan());

    if status.config_found {
        println!("{} Configuration found", "✓".green());
    } else {
        println!("{} Configuration not found (using defaults)", "○".dimmed());
        println!("  → Run 'rosterop init' to create one");
    }

    println!("{} Backend: {}", "○".dimmed(), status.api_host.cyan());

    if status.signed_in {
        println!("{} Signed in", "✓".green());
    } else {
        println!("{} Not signed in", "✗".red());
        println!("  → Run 'rosterop login' to sign in");
    }

    println!();
    Ok(())
}
