use biodiversity_tui::app::{App, LoadState};
use biodiversity_tui::cli::CliArgs;
use biodiversity_tui::{config, event, loader, terminal};
use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = config::init_app_config();
    init_tracing(config.debug);

    let mut app = App::new(&config);

    // Headless when asked to, or when stdout is not a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, &config.source, args.json).await;
    }

    let pending = loader::spawn_load(config.source.clone());

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, Some(pending)).await;
    terminal::cleanup(true, true);
    result?;

    if let LoadState::Failed(message) = &app.load_state {
        return Err(eyre!("{message}"));
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked from `--debug`.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
