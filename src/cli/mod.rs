use crate::config::MAX_WORKERS;
use crate::formatter::Format;
use crate::search::SearchQuery;
use clap::builder::RangedU64ValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

pub mod search;

/// pip-search - search the PyPI package index
#[derive(Parser, Debug)]
#[command(name = "pip-search")]
#[command(author = "pip-search Team")]
#[command(version)]
#[command(about = "Search PyPI packages by name and show their descriptions", long_about = None)]
#[command(after_help = "Examples:\n  pip-search requests\n  pip-search django rest -n 20")]
pub struct Cli {
    /// Search words, joined with single spaces
    #[arg(required = true, num_args = 1..)]
    pub terms: Vec<String>,

    /// Number of results to show [default: 10]
    #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub count: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "cli")]
    pub format: Format,

    /// Maximum concurrent metadata lookups [default: 10]
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_WORKERS as u64))]
    pub workers: Option<usize>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the query from the positional terms, rejecting blank input
    pub fn search_query(&self) -> Result<SearchQuery, clap::Error> {
        SearchQuery::parse(&self.terms).ok_or_else(|| {
            Self::command().error(
                ErrorKind::ValueValidation,
                "search terms must contain at least one non-whitespace word",
            )
        })
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
