//! Step printing and run export.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use traffic_facade::{SimulationLog, StepResult};

/// Export format for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Guess from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }
}

fn rounded(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.1}", v)).collect();
    format!("[{}]", parts.join(", "))
}

/// Human-readable block for one step.
///
/// `warming` marks steps taken before the history window held only real
/// observations, when forecasts are still pulled toward zero.
pub fn format_step(step: u64, result: &StepResult, warming: bool) -> String {
    let mut out = format!(
        "Time Step {}{}:\n  Latest Counts: {}\n  Predicted Counts: {}\n  Signal Timings (s): {}\n",
        step,
        if warming { " (warming up)" } else { "" },
        rounded(&result.latest_counts),
        rounded(&result.predicted_counts),
        rounded(&result.signal_timings),
    );
    if let Some(lane) = result.busiest_lane() {
        out.push_str(&format!("  Longest Green: lane {}\n", lane + 1));
    }
    out
}

/// Per-lane averages table.
pub fn format_summary(log: &SimulationLog) -> String {
    let mut out = String::from("Lane  Mean Count  Mean Predicted  Mean Timing (s)  Max Timing (s)\n");
    for lane in log.summary() {
        out.push_str(&format!(
            "{:>4}  {:>10.1}  {:>14.1}  {:>15.1}  {:>14.1}\n",
            lane.lane + 1,
            lane.mean_count,
            lane.mean_predicted,
            lane.mean_timing,
            lane.max_timing
        ));
    }
    out
}

/// Write the log as pretty JSON.
pub fn write_json<W: Write>(log: &SimulationLog, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, log).context("Failed to write JSON")
}

/// Write the log as CSV, one row per step with three columns per lane.
pub fn write_csv<W: Write>(log: &SimulationLog, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let lanes = log.last().map_or(0, |s| s.result.num_lanes());

    let mut header = vec!["step".to_string()];
    for lane in 1..=lanes {
        header.push(format!("count_{}", lane));
        header.push(format!("predicted_{}", lane));
        header.push(format!("timing_{}", lane));
    }
    csv.write_record(&header)?;

    for logged in log.iter() {
        let r = &logged.result;
        let mut record = vec![logged.step.to_string()];
        for lane in 0..lanes {
            record.push(r.latest_counts[lane].to_string());
            record.push(format!("{:.4}", r.predicted_counts[lane]));
            record.push(format!("{:.4}", r.signal_timings[lane]));
        }
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Export to a file, or to stdout when no path is given.
pub fn export(log: &SimulationLog, path: Option<&Path>, format: Option<ExportFormat>) -> Result<()> {
    match path {
        Some(path) => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(path));
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            match format {
                ExportFormat::Json => write_json(log, file)?,
                ExportFormat::Csv => write_csv(log, file)?,
            }
            tracing::info!(path = %path.display(), steps = log.len(), "run exported");
            Ok(())
        }
        None => match format {
            Some(ExportFormat::Json) => write_json(log, io::stdout().lock()),
            Some(ExportFormat::Csv) => write_csv(log, io::stdout().lock()),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> SimulationLog {
        let mut log = SimulationLog::new();
        log.push(StepResult {
            latest_counts: vec![12.0, 8.0],
            predicted_counts: vec![6.0, 2.0],
            signal_timings: vec![90.0, 30.0],
        });
        log
    }

    #[test]
    fn test_format_step() {
        let log = sample_log();
        let text = format_step(1, &log.last().unwrap().result, false);
        assert!(text.starts_with("Time Step 1:"));
        assert!(text.contains("Predicted Counts: [6.0, 2.0]"));
        assert!(text.contains("Signal Timings (s): [90.0, 30.0]"));
        assert!(text.contains("Longest Green: lane 1"));
    }

    #[test]
    fn test_format_step_while_warming() {
        let log = sample_log();
        let text = format_step(1, &log.last().unwrap().result, true);
        assert!(text.starts_with("Time Step 1 (warming up):"));
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample_log(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("step,count_1,predicted_1,timing_1,count_2,predicted_2,timing_2")
        );
        assert_eq!(lines.next(), Some("1,12,6.0000,90.0000,8,2.0000,30.0000"));
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&sample_log(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["steps"][0]["step"], 1);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("run.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("run.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("run")), ExportFormat::Json);
    }

    #[test]
    fn test_summary_table() {
        let table = format_summary(&sample_log());
        assert_eq!(table.lines().count(), 3);
    }
}
