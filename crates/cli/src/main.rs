//! Little Lemon CLI - Browse the menu, manage your profile and place orders.
//!
//! # Usage
//!
//! ```bash
//! # List the menu, optionally filtered
//! ll-cli menu --category mains --search fish
//!
//! # Complete onboarding
//! ll-cli register -n "Tilly" -e tilly@littlelemon.com
//!
//! # Show or edit the stored profile
//! ll-cli profile show
//! ll-cli profile save --last-name Lemon --newsletter false
//! ll-cli profile logout
//!
//! # Start an interactive ordering session
//! ll-cli order
//! ```
//!
//! Configuration comes from the environment, see `little_lemon_app::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use little_lemon_app::config::AppConfig;
use little_lemon_app::state::AppState;
use little_lemon_app::{AppError, catalog::MenuFilter};
use little_lemon_core::Category;

mod commands;

use commands::CommandError;
use commands::profile::ProfileEdits;

#[derive(Parser)]
#[command(name = "ll-cli")]
#[command(author, version, about = "Little Lemon ordering app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu {
        /// Only show one category (starters, mains, desserts, drinks)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only show items whose title contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Complete onboarding with your name and email
    Register {
        /// Your first name
        #[arg(short, long)]
        name: String,

        /// Your email address
        #[arg(short, long)]
        email: String,
    },
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Start an interactive ordering session
    Order,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Change profile fields; anything not given keeps its stored value
    Save(ProfileEdits),
    /// Forget the stored profile
    Logout,
}

fn main() {
    // Logs go to stderr so screens on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match &e {
            CommandError::App(app_error) if app_error.is_user_error() => {
                let _ = writeln!(io::stderr(), "{app_error}");
            }
            _ => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::Result<()> {
    let config = AppConfig::from_env().map_err(AppError::from)?;
    let mut state = AppState::open(config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Menu { category, search } => {
            let menu_filter = MenuFilter::all().with_category(category).with_search(search);
            commands::menu::list(&mut out, &state.catalog(), &menu_filter)?;
        }
        Commands::Register { name, email } => {
            commands::profile::register(&mut out, state.profile_mut(), &name, &email)?;
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&mut out, state.profile())?,
            ProfileAction::Save(edits) => {
                commands::profile::save(&mut out, state.profile_mut(), edits)?;
            }
            ProfileAction::Logout => commands::profile::logout(&mut out, state.profile_mut())?,
        },
        Commands::Order => {
            let mut input = io::stdin().lock();
            commands::order::Session::new(&mut state, &mut input, &mut out).run()?;
        }
    }
    Ok(())
}
