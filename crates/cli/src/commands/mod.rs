//! Subcommand implementations.
//!
//! Every command writes its screen to a `Write` handed in by `main`, so the
//! same code renders to stdout and to a buffer in tests.

pub mod menu;
pub mod order;
pub mod profile;

/// Error type shared by the commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] little_lemon_app::AppError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<little_lemon_app::profile::ProfileError> for CommandError {
    fn from(err: little_lemon_app::profile::ProfileError) -> Self {
        Self::App(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;
