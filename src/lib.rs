//! Spotify to Tidal Playlist Migrator Library
//!
//! This library reads a playlist from a Spotify account, resolves every track in
//! the Tidal catalog by its ISRC and creates an equivalent playlist on Tidal.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `catalog` - Source and destination catalog traits consumed by the migration core
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Cached session tokens
//! - `migration` - Track reconciliation and playlist commit
//! - `pagination` - Offset/limit page enumeration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (source catalog)
//! - `tidal` - Tidal API client (destination catalog)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use plmigrate::{config, migration};
//!
//! #[tokio::main]
//! async fn main() -> plmigrate::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // Connect catalogs, then migration::reconcile(...) and migration::commit(...)
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod migration;
pub mod pagination;
pub mod server;
pub mod spotify;
pub mod tidal;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so errors
/// can cross await points and task boundaries.
///
/// # Example
///
/// ```
/// use plmigrate::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Logging in to Tidal...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist created");
/// success!("Resolved {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is only
/// used by the CLI layer for failures the run cannot recover from.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a track Tidal could not locate.
///
/// # Example
///
/// ```
/// warning!("Tidal couldn't locate {} – {}", artist, title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
