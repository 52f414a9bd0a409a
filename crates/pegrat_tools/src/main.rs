//! Pegrat Tools CLI
//!
//! Command-line tools for the bundled pegrat grammars.

use clap::Parser;
use pegrat::ParseConfig;
use pegrat_tools::cli::{Cli, Commands};
use pegrat_tools::report;

/// Install a tracing subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { grammar, format } => {
            let sample = grammar.build()?;
            print!("{}", report::analyze(&sample, format)?);
        }
        Commands::Parse {
            grammar,
            input,
            no_memo,
            format,
        } => {
            let sample = grammar.build()?;
            let config = if no_memo {
                ParseConfig::without_memoization()
            } else {
                ParseConfig::default()
            };
            tracing::debug!(%grammar, no_memo, "running sample grammar");

            let parsed = report::parse(&sample, &input, &config)?;
            print!("{}", parsed.render(format)?);
            if !parsed.accepted {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
