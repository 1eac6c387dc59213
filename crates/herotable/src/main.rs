use std::io::{self, IsTerminal};

use anyhow::{bail, Context, Result};
use clap::Parser;
use herotable::output::render_session;
use herotable::{build_session, load_config, repl, source, Cli, TableStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_level().into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let config = load_config(&cli)?;

    let dataset_path = cli.dataset_path().map(|p| p.as_path());
    if cli.interactive && dataset_path.is_none() {
        bail!("interactive mode reads commands from stdin; pass the dataset as a file");
    }
    let mut dataset = source::source_for(dataset_path);
    let records = source::load_dataset(dataset.as_mut()).context("failed to load dataset")?;

    let mut session = build_session(records, &config, &cli)?;
    let style = TableStyle {
        max_cell_width: config.max_cell_width,
        color: io::stdout().is_terminal(),
    };

    if cli.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        repl::run(&mut session, stdin.lock(), &mut stdout, cli.output, &style)?;
    } else {
        print!("{}", render_session(&session, cli.output, &style)?);
    }
    Ok(())
}
