use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plmigrate::{
    cli,
    config::{self, Config},
    error,
    types::Service,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to a streaming service, replacing its cached session
    Auth(AuthOptions),

    /// List your Spotify playlists
    Playlists,

    /// Copy a Spotify playlist to Tidal
    Migrate(MigrateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Service to log in to
    #[clap(value_enum)]
    service: Service,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    /// Index of the Spotify playlist to migrate (skips the prompt)
    #[clap(long)]
    playlist: Option<usize>,

    /// Title of the new Tidal playlist (skips the prompt)
    #[clap(long)]
    title: Option<String>,

    /// Number of Tidal lookups in flight at once
    #[clap(long, default_value_t = 1)]
    concurrency: usize,

    /// Add tracks that are already in the Tidal playlist again
    #[clap(long)]
    allow_duplicates: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    println!("\nThanks for using plmigrate! I'll try to walk you through everything.\n");

    match cli.command {
        Command::Auth(opt) => cli::auth(&config, opt.service).await,
        Command::Playlists => cli::playlists(&config).await,
        Command::Migrate(opt) => {
            cli::migrate(
                &config,
                cli::MigrateRequest {
                    playlist: opt.playlist,
                    title: opt.title,
                    concurrency: opt.concurrency,
                    allow_duplicates: opt.allow_duplicates,
                },
            )
            .await
        }
        Command::Completions(_) => {}
    }
}
