use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

use clubdata_cli::config::Config;
use cli::settings::SettingsCommand;

#[derive(Parser)]
#[command(name = "clubdata")]
#[command(about = "Clubdata - manage a club's contact record and render it for templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the admin and rendering HTTP server
    Serve {
        /// Override the listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Show the stored record, HTML-escaped
    Show {
        /// Show a single field (phone, email, address)
        #[arg(short, long)]
        field: Option<String>,
    },
    /// Update the stored record
    Set {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Replace the whole record, clearing fields that are not given
        #[arg(long)]
        replace: bool,
    },
    /// Print the public HTML fragment
    Fragment,
    /// Print the editable form fields
    Form,
    /// Expand [clubdata] shortcodes in a file and print the result
    Render {
        /// Document to render
        file: PathBuf,
    },
    /// Delete the stored record
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    clubdata_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    let settings_command = match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            println!(
                "{} {}",
                "Starting Clubdata server on".green(),
                format!("http://{}", config.socket_addr()).cyan()
            );
            return clubdata_cli::run_server(config).await;
        }
        Commands::Show { field } => SettingsCommand::Show { field },
        Commands::Set {
            phone,
            email,
            address,
            replace,
        } => SettingsCommand::Set {
            phone,
            email,
            address,
            replace,
        },
        Commands::Fragment => SettingsCommand::Fragment,
        Commands::Form => SettingsCommand::Form,
        Commands::Render { file } => SettingsCommand::Render { file },
        Commands::Clear { yes } => SettingsCommand::Clear { yes },
    };

    let manager = clubdata_cli::open_manager(&config).await?;
    cli::settings::handle_settings_command(&manager, settings_command).await
}
