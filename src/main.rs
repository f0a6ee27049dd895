use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use plorgcli::{cli, config, error};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// List one page of your playlists
    Playlists(PlaylistsOptions),

    /// Show which tracks appear in which of the given playlists
    Table(TableOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Number of playlists to fetch
    #[clap(long, default_value_t = 20)]
    limit: usize,

    /// Index of the first playlist to fetch
    #[clap(long, default_value_t = 0)]
    offset: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct TableOptions {
    /// Playlist id to compare; can be repeated
    #[clap(long = "playlist", required = true, num_args = 1)]
    playlists: Vec<String>,

    /// Number of playlists fetched to resolve names
    #[clap(long, default_value_t = 50)]
    limit: usize,
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
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(config).await,
        Command::Playlists(opt) => cli::list_playlists(config, opt.limit, opt.offset).await,
        Command::Table(opt) => cli::song_table(config, opt.playlists, opt.limit).await,
        Command::Completions(_) => {}
    }
}
