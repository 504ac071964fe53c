//! Vellum CLI: seal documents at build time, log in, list secret content.
//!
//! Vault failures are printed as an `{"success": false, "error": ...}` body on
//! stdout with exit status 1; anything else goes to stderr.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vellum_vault::{err_json, ErrorCode};

mod commands;
mod context;

use context::AppContext;

/// Passphrase-gated secret content vault
#[derive(Parser)]
#[command(name = "vellum", version, about, long_about = None)]
struct Cli {
    /// Directory holding the config file and the session store
    #[arg(long, global = true, env = "VELLUM_DATA_DIR", default_value = ".vellum")]
    data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file into the data directory
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Seal a document with a content passphrase
    Encrypt {
        /// Plaintext file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, env = "VELLUM_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
    },

    /// Open a sealed document and print its plaintext
    Decrypt {
        /// Sealed JSON file
        input: PathBuf,
        #[arg(long, env = "VELLUM_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
    },

    /// Validate and seal a user directory with the master password
    EncryptUsers {
        /// Plaintext `{"id": ["w1", "w2", "w3"]}` file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, env = "VELLUM_MASTER_PASSWORD", hide_env_values = true)]
        master_password: String,
    },

    /// Add or replace a user in a sealed user directory
    AddUser {
        /// Sealed user directory, created when missing
        #[arg(long)]
        users: PathBuf,
        #[arg(long)]
        identifier: String,
        /// The three passphrase words
        #[arg(long, num_args = 3, value_names = ["WORD1", "WORD2", "WORD3"])]
        words: Vec<String>,
        #[arg(long, env = "VELLUM_MASTER_PASSWORD", hide_env_values = true)]
        master_password: String,
    },

    /// Log in with an identifier and three words
    Login {
        /// Sealed user directory
        #[arg(long)]
        users: PathBuf,
        #[arg(long)]
        identifier: String,
        /// The three passphrase words
        #[arg(long, num_args = 3, value_names = ["WORD1", "WORD2", "WORD3"])]
        words: Vec<String>,
        #[arg(long, env = "VELLUM_MASTER_PASSWORD", hide_env_values = true)]
        master_password: String,
    },

    /// Inspect or manage the current session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// List the documents in a directory, newest first
    List {
        /// Directory of sealed documents
        dir: PathBuf,
        #[arg(long, env = "VELLUM_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
    },

    /// Decrypt one document and print it as JSON
    Show {
        /// Directory of sealed documents
        dir: PathBuf,
        /// Document slug
        slug: String,
        #[arg(long, env = "VELLUM_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
        /// Strip active HTML from the body
        #[arg(long)]
        sanitize: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the current session
    Status,
    /// Push expiry forward
    Extend,
    /// End the session
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(code) = e.downcast_ref::<ErrorCode>() {
                println!("{}", err_json(*code));
            } else {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::load(cli.data_dir);

    match cli.command {
        Commands::Init { force } => commands::init(&ctx, force),
        Commands::Encrypt {
            input,
            output,
            passphrase,
        } => commands::envelope::encrypt(&input, output.as_deref(), &passphrase),
        Commands::Decrypt { input, passphrase } => commands::envelope::decrypt(&input, &passphrase),
        Commands::EncryptUsers {
            input,
            output,
            master_password,
        } => commands::envelope::encrypt_users(&input, output.as_deref(), &master_password),
        Commands::AddUser {
            users,
            identifier,
            words,
            master_password,
        } => commands::envelope::add_user(&users, &identifier, &words, &master_password),
        Commands::Login {
            users,
            identifier,
            words,
            master_password,
        } => commands::auth::login(&ctx, &users, &identifier, &words, &master_password),
        Commands::Session { action } => match action {
            SessionAction::Status => commands::auth::status(&ctx),
            SessionAction::Extend => commands::auth::extend(&ctx),
            SessionAction::Logout => {
                commands::auth::logout(&ctx);
                Ok(())
            }
        },
        Commands::List { dir, passphrase } => commands::content::list(&ctx, &dir, &passphrase).await,
        Commands::Show {
            dir,
            slug,
            passphrase,
            sanitize,
        } => commands::content::show(&ctx, &dir, &slug, &passphrase, sanitize),
    }
}
