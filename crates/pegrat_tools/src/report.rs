//! Rendering of CLI results as text or JSON.

use pegrat::{Cursor, GrammarLine, MemoStats, MemoStrategy, ParseConfig, ParseError};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::grammars::Sample;

/// The grammar listing of `sample`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn analyze(sample: &Sample, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(sample.analyzer.analyze(&sample.root)),
        OutputFormat::Json => {
            let lines: Vec<GrammarLine> = sample.analyzer.lines(&sample.root);
            serde_json::to_string_pretty(&lines)
        }
    }
}

/// Outcome of running a sample grammar over one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub grammar: String,
    pub input: String,
    pub memoization: MemoStrategy,
    pub accepted: bool,
    /// Rendered value, when accepted
    pub value: Option<String>,
    /// End of the accepted prefix, in characters
    pub end: Option<usize>,
    /// Characters after the accepted prefix
    pub unconsumed: usize,
    pub stats: Option<MemoStats>,
}

/// Parse `input` from its start with `sample`.
///
/// # Errors
///
/// Returns engine faults. Rejection is reported in the result, not as an error.
pub fn parse(sample: &Sample, input: &str, config: &ParseConfig) -> Result<ParseReport, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut memo = config.memo();

    let (value, end) = match sample.root.parse_at(&mut cursor, &mut memo) {
        Ok(value) => (Some(value), Some(cursor.position())),
        Err(ParseError::Rejected) => (None, None),
        Err(err) => return Err(err),
    };

    Ok(ParseReport {
        grammar: sample.choice.to_string(),
        input: input.to_string(),
        memoization: config.memoization,
        accepted: value.is_some(),
        value,
        end,
        unconsumed: cursor.len() - end.unwrap_or(0),
        stats: memo.stats(),
    })
}

impl ParseReport {
    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => {
                let mut out = String::new();
                match (&self.value, self.end) {
                    (Some(value), Some(end)) => {
                        out.push_str(&format!("accepted: {value}\n"));
                        out.push_str(&format!("end: {end}"));
                        if self.unconsumed > 0 {
                            out.push_str(&format!(" ({} characters left)", self.unconsumed));
                        }
                        out.push('\n');
                    }
                    _ => out.push_str("rejected\n"),
                }
                if let Some(stats) = self.stats {
                    out.push_str(&format!(
                        "memo: {} entries, {} hits / {} lookups\n",
                        stats.entries, stats.hits, stats.lookups
                    ));
                }
                Ok(out)
            }
        }
    }
}
