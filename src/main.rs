use clap::{Parser, Subcommand};
use std::process::ExitCode;
use vsplugin_helper::core::error_help::format_error_with_help;

mod cli;

#[derive(Parser)]
#[command(name = "vsplugin-helper")]
#[command(about = "Install marketplace extensions into a Trae editor, locally or on a remote host")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install an extension into the local editor
    Install {
        /// Extension ID (publisher.name); prompted for when omitted
        id: Option<String>,
    },
    /// Install an extension into the editor on the connected remote host
    InstallRemote {
        /// Extension ID (publisher.name); prompted for when omitted
        id: Option<String>,
        /// SSH host to install on (defaults to VSPLUGIN_REMOTE_HOST)
        #[arg(long)]
        host: Option<String>,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set the editor installation root (the directory containing bin/)
    SetEditorPath {
        /// Path to the editor installation
        path: String,
    },
    /// Show the editor installation root
    GetEditorPath,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Held until exit so the log file is flushed
    let _log_guard = vsplugin_helper::logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install { id } => cli::install::run(id).await,
        Commands::InstallRemote { id, host } => cli::install_remote::run(id, host).await,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::SetEditorPath { path } => cli::config::set_editor_path(path),
            ConfigCommands::GetEditorPath => cli::config::get_editor_path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
