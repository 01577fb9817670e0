// LogMerge - app/prompt.rs
//
// Interactive source collection. Asks for the number of servers, then for
// each server its entry count and a line of timestamps, echoing what was
// accepted. Generic over BufRead/Write so tests can drive it from memory.

use crate::core::export::join_entries;
use crate::core::model::Batch;
use crate::core::parser::{self, ShortBatchPolicy};
use crate::util::constants;
use crate::util::error::{InputError, MergeError, ParseError};
use std::io::{BufRead, Write};

/// Everything the operator typed, ready for merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedSources {
    /// One batch per server, in the order they were entered.
    pub batches: Vec<Batch>,

    /// Non-fatal count mismatches accepted under `ShortBatchPolicy::Warn`.
    pub warnings: Vec<ParseError>,
}

/// Run the dialogue on `input`, writing prompts and echoes to `output`.
pub fn collect_sources<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    policy: ShortBatchPolicy,
) -> Result<CollectedSources, MergeError> {
    say(&mut output, &format!("=== {} ===", constants::APP_NAME))?;

    ask(&mut output, "Enter number of servers (log files): ")?;
    let raw = read_answer(&mut input, "the number of servers")?;
    let servers = parser::parse_count(&raw, "number of servers", 1, constants::MAX_SOURCES)?;

    tracing::debug!(servers, "Collecting sources");

    let mut batches = Vec::with_capacity(servers);
    let mut warnings = Vec::new();

    for server in 1..=servers {
        say(&mut output, &format!("\nServer {server}:"))?;
        ask(&mut output, "  Enter number of log entries for this server: ")?;
        let raw = read_answer(&mut input, &format!("the entry count of server {server}"))?;
        let declared = parser::parse_count(
            &raw,
            "entry count",
            0,
            constants::MAX_ENTRIES_PER_SOURCE,
        )?;

        // Nothing to type for an empty server.
        if declared == 0 {
            batches.push(Batch::new(server, Vec::new()));
            continue;
        }

        ask(
            &mut output,
            &format!("  Enter {declared} timestamps (integers) separated by spaces: "),
        )?;
        let line = read_answer(&mut input, &format!("the timestamps of server {server}"))?;
        let parsed = parser::parse_batch(server, declared, &line, policy)?;

        say(
            &mut output,
            &format!(
                "  Raw log timestamps for server {server}: [{}]",
                join_entries(&parsed.batch.entries)
            ),
        )?;
        if let Some(warning) = parsed.warning {
            say(&mut output, &format!("  Warning: {warning}"))?;
            warnings.push(warning);
        }

        batches.push(parsed.batch);
    }

    Ok(CollectedSources { batches, warnings })
}

/// Write a prompt without a newline and flush so it shows before blocking.
fn ask<W: Write>(output: &mut W, prompt: &str) -> Result<(), InputError> {
    output
        .write_all(prompt.as_bytes())
        .and_then(|_| output.flush())
        .map_err(|e| InputError::Io {
            operation: "writing prompt",
            source: e,
        })
}

fn say<W: Write>(output: &mut W, line: &str) -> Result<(), InputError> {
    writeln!(output, "{line}").map_err(|e| InputError::Io {
        operation: "writing prompt",
        source: e,
    })
}

/// Read one line. EOF is an error because every question needs an answer.
fn read_answer<R: BufRead>(input: &mut R, expected: &str) -> Result<String, InputError> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| InputError::Io {
        operation: "reading answer",
        source: e,
    })?;
    if read == 0 {
        return Err(InputError::UnexpectedEof {
            expected: expected.to_string(),
        });
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
