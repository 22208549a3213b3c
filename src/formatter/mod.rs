use crate::search::{MatchResult, SearchQuery};
use serde::Serialize;
use std::fmt::Write;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Cli,
    Json,
    #[value(alias = "markdown")]
    Md,
    Csv,
    #[value(alias = "names")]
    Files,
}

impl Format {
    /// Render a ranked result set. Order is preserved as given.
    pub fn render(&self, results: &[MatchResult], query: &SearchQuery) -> Result<String, anyhow::Error> {
        let mut out = String::new();
        match self {
            Self::Cli => render_cli(&mut out, results, query)?,
            Self::Json => render_json(&mut out, results, query)?,
            Self::Md => render_markdown(&mut out, results, query)?,
            Self::Csv => render_csv(&mut out, results)?,
            Self::Files => {
                for result in results {
                    writeln!(out, "{}", result.name)?;
                }
            }
        }
        Ok(out)
    }

    /// Render and write to stdout
    pub fn print(&self, results: &[MatchResult], query: &SearchQuery) -> Result<(), anyhow::Error> {
        print!("{}", self.render(results, query)?);
        Ok(())
    }
}

fn render_cli(out: &mut String, results: &[MatchResult], query: &SearchQuery) -> std::fmt::Result {
    writeln!(out, "Searching PyPI for: {}", query)?;

    if results.is_empty() {
        writeln!(out, "No packages found")?;
        return Ok(());
    }

    writeln!(out, "Found {} packages:", results.len())?;
    writeln!(out)?;

    for (i, result) in results.iter().enumerate() {
        let marker = if result.exact { " *" } else { "" };
        writeln!(out, "{:>2}. {}{} - {}", i + 1, result.name, marker, result.description)?;
    }
    Ok(())
}

fn render_json(out: &mut String, results: &[MatchResult], query: &SearchQuery) -> Result<(), anyhow::Error> {
    #[derive(Serialize)]
    struct JsonEntry<'a> {
        rank: usize,
        #[serde(flatten)]
        result: &'a MatchResult,
    }

    #[derive(Serialize)]
    struct JsonResult<'a> {
        query: String,
        total: usize,
        results: Vec<JsonEntry<'a>>,
    }

    let output = JsonResult {
        query: query.joined(),
        total: results.len(),
        results: results
            .iter()
            .enumerate()
            .map(|(i, result)| JsonEntry { rank: i + 1, result })
            .collect(),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn render_markdown(out: &mut String, results: &[MatchResult], query: &SearchQuery) -> std::fmt::Result {
    writeln!(out, "# PyPI results for `{}`", query)?;
    writeln!(out)?;

    if results.is_empty() {
        writeln!(out, "No packages found")?;
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        let marker = if result.exact { " (exact match)" } else { "" };
        writeln!(out, "{}. **{}**{} - {}", i + 1, result.name, marker, result.description)?;
    }
    Ok(())
}

fn render_csv(out: &mut String, results: &[MatchResult]) -> std::fmt::Result {
    writeln!(out, "rank,name,exact,description")?;
    for (i, result) in results.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{}",
            i + 1,
            escape_csv(&result.name),
            result.exact,
            escape_csv(&result.description)
        )?;
    }
    Ok(())
}

/// Quote a CSV field when it contains separators, quotes or newlines
fn escape_csv(s: &str) -> String {
    if s.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
