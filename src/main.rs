use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, Level};

use gitgen::config::{self, AIProvider, Config};
use gitgen::terminal::Console;
use gitgen::theme::Theme;
use gitgen::{AIClient, Intent, LanguageModel, ShellRunner};

/// Translate natural-language INTENT into git commands and execute them.
#[derive(Parser, Debug)]
#[command(name = "gitgen", version, about)]
struct Cli {
    /// What you want done, in plain words
    #[arg(required = true, num_args = 1..)]
    intent: Vec<String>,

    /// Show commands without executing them
    #[arg(long)]
    dry_run: bool,

    /// Language model provider (overrides the config file)
    #[arg(long, value_enum)]
    provider: Option<AIProvider>,

    /// Model name (overrides the config file)
    #[arg(long)]
    model: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output; repeat for debug logs
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dotenv::dotenv().ok();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };
    let mut config = Config::load_or_default(&config_path)?;
    config.apply_overrides(cli.provider, cli.model.clone());
    let theme = Theme::for_color_output(config.display.color_output && !cli.no_color);

    let client = match AIClient::from_env(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", theme.error.apply(&e.to_string()));
            std::process::exit(1);
        }
    };

    let intent = Intent::from_words(&cli.intent)?;
    debug!(%intent, provider = ?config.ai.provider, model = %config.ai.model, "planning");

    let model: Arc<dyn LanguageModel> = Arc::new(client);
    let mut console = Console::stdio(theme);
    gitgen::run(model, Arc::new(ShellRunner::default()), &mut console, &intent, cli.dry_run).await
}
