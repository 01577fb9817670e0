// LogMerge - core/parser.rs
//
// Conversion of raw textual answers into typed counts and entry batches.
// Core layer: operates on &str, never touches stdin or files directly.

use crate::core::model::{Batch, Entry};
use crate::util::error::ParseError;

/// What to do when a source supplies fewer tokens than it declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortBatchPolicy {
    /// Keep the tokens that were supplied and attach a warning.
    #[default]
    Warn,

    /// Fail the batch with `ParseError::CountMismatch`.
    Reject,
}

/// Result of parsing one source's line of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBatch {
    /// The typed entries, at most `declared` of them.
    pub batch: Batch,

    /// Number of tokens beyond the declared count that were ignored.
    pub ignored_tokens: usize,

    /// Set when fewer tokens than declared were supplied under
    /// `ShortBatchPolicy::Warn`.
    pub warning: Option<ParseError>,
}

/// Parse a count answer (number of sources or entries per source).
///
/// `min` is the smallest accepted value and `max` the largest.
pub fn parse_count(
    raw: &str,
    what: &'static str,
    min: usize,
    max: usize,
) -> Result<usize, ParseError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| ParseError::InvalidCount {
        what,
        raw: trimmed.to_string(),
        reason: "not an integer".to_string(),
    })?;

    // Negative values are reported as out of range rather than "not an integer".
    let in_range = usize::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v));

    in_range.ok_or_else(|| ParseError::InvalidCount {
        what,
        raw: trimmed.to_string(),
        reason: format!("must be between {min} and {max}"),
    })
}

/// Parse a single timestamp token.
fn parse_entry(token: &str, source_index: usize, position: usize) -> Result<Entry, ParseError> {
    token.parse::<Entry>().map_err(|_| ParseError::InvalidToken {
        source_index,
        position,
        token: token.to_string(),
    })
}

/// Parse the first `declared` whitespace-separated tokens of `raw_line`.
///
/// Tokens past the declared count are ignored without being validated.
/// A shortfall is handled according to `policy`.
pub fn parse_batch(
    source_index: usize,
    declared: usize,
    raw_line: &str,
    policy: ShortBatchPolicy,
) -> Result<ParsedBatch, ParseError> {
    let tokens: Vec<&str> = raw_line.split_whitespace().collect();
    let take = declared.min(tokens.len());

    let entries = tokens[..take]
        .iter()
        .enumerate()
        .map(|(i, token)| parse_entry(token, source_index, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let ignored_tokens = tokens.len() - take;
    if ignored_tokens > 0 {
        tracing::debug!(
            source = source_index,
            declared,
            ignored = ignored_tokens,
            "Ignoring tokens beyond declared count"
        );
    }

    let mut warning = None;
    if tokens.len() < declared {
        let mismatch = ParseError::CountMismatch {
            source_index,
            declared,
            supplied: tokens.len(),
        };
        match policy {
            ShortBatchPolicy::Reject => return Err(mismatch),
            ShortBatchPolicy::Warn => {
                tracing::warn!(error = %mismatch, "Short batch accepted");
                warning = Some(mismatch);
            }
        }
    }

    Ok(ParsedBatch {
        batch: Batch::new(source_index, entries),
        ignored_tokens,
        warning,
    })
}

/// Parse every token of `raw_line` into a batch, with no declared count.
pub fn tokens_to_batch(source_index: usize, raw_line: &str) -> Result<Batch, ParseError> {
    let entries = raw_line
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| parse_entry(token, source_index, i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Batch::new(source_index, entries))
}
