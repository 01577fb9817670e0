// LogMerge - core/export.rs
//
// Text, JSON and CSV rendering of merged sequences.
// Core layer: writes to any Write trait object.

use crate::core::model::{Entry, MergeReport};
use crate::util::error::ExportError;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Output encoding for merged sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Space-separated values on one line.
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown output format \"{other}\" (expected text, json or csv)"
            )),
        }
    }
}

/// Write one sequence in the given format.
pub fn write_sequence<W: Write>(
    entries: &[Entry],
    format: OutputFormat,
    mut writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{}", join_entries(entries))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, entries).map_err(ExportError::Json)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            csv_writer
                .write_record(["position", "timestamp"])
                .map_err(ExportError::Csv)?;
            for (position, entry) in entries.iter().enumerate() {
                csv_writer
                    .write_record([(position + 1).to_string(), entry.to_string()])
                    .map_err(ExportError::Csv)?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}

/// Write a full merge report.
///
/// Text mode prints the combined sequence and then the sorted one, each under
/// a heading. JSON writes one object. CSV carries only the sorted sequence,
/// since a second table in the same stream would not be valid CSV.
pub fn write_report<W: Write>(
    report: &MergeReport,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "Combined timestamps from all servers (unsorted):")?;
            write_sequence(&report.combined, format, &mut writer)?;
            writeln!(writer)?;
            writeln!(writer, "Merged & sorted timestamps (across all servers):")?;
            write_sequence(&report.sorted, format, &mut writer)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report).map_err(ExportError::Json)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => write_sequence(&report.sorted, format, writer)?,
    }
    Ok(())
}

/// Space-separated rendering used for text output and echo lines.
pub fn join_entries(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sorter::SortStrategy;

    fn sample_report() -> MergeReport {
        MergeReport {
            sources: 2,
            combined: vec![3, 1, 2],
            sorted: vec![1, 2, 3],
            strategy: SortStrategy::Recursive,
        }
    }

    #[test]
    fn test_text_sequence() {
        let mut buf = Vec::new();
        write_sequence(&[1, 2, 2, 3], OutputFormat::Text, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1 2 2 3\n");
    }

    #[test]
    fn test_json_sequence() {
        let mut buf = Vec::new();
        write_sequence(&[-1, 5], OutputFormat::Json, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[-1,5]\n");
    }

    #[test]
    fn test_csv_sequence() {
        let mut buf = Vec::new();
        write_sequence(&[10, 20], OutputFormat::Csv, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "position,timestamp\n1,10\n2,20\n"
        );
    }

    #[test]
    fn test_text_report_has_both_sections() {
        let mut buf = Vec::new();
        write_report(&sample_report(), OutputFormat::Text, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("(unsorted):\n3 1 2\n"));
        assert!(output.contains("(across all servers):\n1 2 3\n"));
    }

    #[test]
    fn test_json_report_round_trips_fields() {
        let mut buf = Vec::new();
        write_report(&sample_report(), OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["sorted"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["combined"], serde_json::json!([3, 1, 2]));
        assert_eq!(value["strategy"], "recursive");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_join_entries_empty() {
        assert_eq!(join_entries(&[]), "");
    }
}
