//! CLI interface for pegrat-tools

use clap::{Parser, Subcommand};

use crate::grammars::GrammarChoice;

#[derive(Parser)]
#[command(name = "pegrat")]
#[command(about = "Inspect and run pegrat sample grammars")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the grammar listing of a sample grammar
    Analyze {
        /// Sample grammar (int-list, lambda)
        #[arg(short, long)]
        grammar: GrammarChoice,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse input with a sample grammar
    Parse {
        /// Sample grammar (int-list, lambda)
        #[arg(short, long)]
        grammar: GrammarChoice,

        /// Text to parse
        #[arg(short, long)]
        input: String,

        /// Re-evaluate rules instead of memoizing them
        #[arg(long)]
        no_memo: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: text, json")),
        }
    }
}
