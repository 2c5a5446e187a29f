use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotcard::{cli, config, error, types::CodeStyle};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
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
    /// Run the HTTP API
    Serve(ServeOptions),

    /// Resolve a track link into card data
    Resolve(LinkOptions),

    /// Print the scannable Spotify code URL for a link
    Code(LinkOptions),

    /// Request a client-credentials access token
    Token(TokenOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LinkOptions {
    /// open.spotify.com link, spotify: URI or bare track id
    pub link: String,

    /// White code on a transparent background
    #[clap(long)]
    pub light: bool,
}

impl LinkOptions {
    fn style(&self) -> CodeStyle {
        if self.light {
            CodeStyle::Light
        } else {
            CodeStyle::Dark
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    /// Print the raw token value
    #[clap(long)]
    pub show: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.address).await,
        Command::Resolve(opt) => {
            let style = opt.style();
            cli::resolve(opt.link, style).await
        }
        Command::Code(opt) => {
            let style = opt.style();
            cli::code(opt.link, style)
        }
        Command::Token(opt) => cli::token(opt.show).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
