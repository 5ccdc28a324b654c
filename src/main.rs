//! rosterop - terminal client for the student records service

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod router;
mod session;
mod views;

use cli::args::GlobalOptions;
use cli::auth::RegisterFields;
use cli::{Cli, CommandContext, Commands, StudentCommands};
use error::{Error, Result};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        if !matches!(err, Error::Reported(_)) {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Version => {
            println!("rosterop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        command => {
            let ctx = CommandContext::new(&opts)?;
            dispatch(&ctx, command).await
        }
    }
}

async fn dispatch(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Status => cli::status::run(ctx),
        Commands::Login { login, password } => cli::auth::login(ctx, login, password).await,
        Commands::Register {
            first_name,
            last_name,
            login,
            password,
        } => {
            let fields = RegisterFields {
                first_name,
                last_name,
                login,
                password,
            };
            cli::auth::register(ctx, fields).await
        }
        Commands::Logout => cli::auth::logout(ctx),
        Commands::Student(student_cmd) => match student_cmd {
            StudentCommands::List => cli::student::list(ctx).await,
            StudentCommands::Get { id } => cli::student::get(ctx, id).await,
            StudentCommands::Create { fields } => cli::student::create(ctx, fields).await,
            StudentCommands::Update { id, fields } => cli::student::update(ctx, id, fields).await,
            StudentCommands::Delete { id, yes } => cli::student::delete(ctx, id, yes).await,
        },
        Commands::App { route } => cli::app::run(ctx, route.as_deref()).await,
        Commands::Init | Commands::Version | Commands::Completion { .. } => Ok(()),
    }
}
