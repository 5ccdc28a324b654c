//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod app;
pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod init;
pub mod prompt;
pub mod status;
pub mod student;

pub use args::OutputFormat;
pub use context::CommandContext;

/// rosterop - terminal client for the student records service
#[derive(Parser, Debug)]
#[command(name = "rosterop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ROSTEROP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ROSTEROP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the backend host (e.g. http://localhost:8080)
    #[arg(long, global = true, env = "ROSTEROP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ROSTEROP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize rosterop configuration
    Init,

    /// Show configuration and session status
    Status,

    /// Sign in and open the student list
    Login {
        /// Account identifier (prompted when omitted)
        #[arg(long)]
        login: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        login: Option<String>,

        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out (forget the stored session token)
    Logout,

    /// Manage students (requires a session)
    #[command(subcommand)]
    Student(StudentCommands),

    /// Interactive mode: navigate the views from a menu
    App {
        /// View to open first, by path (e.g. `students`); unknown paths open home
        #[arg(long)]
        route: Option<String>,
    },

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   rosterop completion bash > /etc/bash_completion.d/rosterop
  zsh:    rosterop completion zsh > \"${fpath[1]}/_rosterop\"
  fish:   rosterop completion fish > ~/.config/fish/completions/rosterop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Fields of the student form; missing ones are prompted for
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StudentFields {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

/// Student management subcommands
#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List all students
    List,

    /// Show one student
    Get {
        /// Student ID
        id: i64,
    },

    /// Create a student
    Create {
        #[command(flatten)]
        fields: StudentFields,
    },

    /// Update a student
    Update {
        /// Student ID
        id: i64,

        #[command(flatten)]
        fields: StudentFields,
    },

    /// Delete a student
    Delete {
        /// Student ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_student_delete() {
        let cli = Cli::try_parse_from(["rosterop", "student", "delete", "7", "--yes"]).unwrap();
        match cli.command {
            Commands::Student(StudentCommands::Delete { id, yes }) => {
                assert_eq!(id, 7);
                assert!(yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["rosterop", "student", "list", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
