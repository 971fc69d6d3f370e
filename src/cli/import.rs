use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::args::resolve_input;
use crate::error::Result;
use crate::exporter::{write_accepted, write_rejected, write_report, OutputPaths};
use crate::fmt::seconds;
use crate::models::Delimiter;
use crate::processor::{process_lines, read_data_lines, RowSink, TracingSink};
use crate::reports::{format_report, summarize, ImportSummary};
use crate::settings::{load_settings, Settings};

pub struct ImportOutcome {
    pub summary: ImportSummary,
    pub accepted_path: Option<PathBuf>,
    pub rejected_path: Option<PathBuf>,
    pub report_path: PathBuf,
    pub report: String,
}

pub fn run(input: &str) -> Result<()> {
    let (source, delimiter) = resolve_input(input)?;
    let settings = load_settings();
    tracing::info!(file = %source.display(), delimiter = %delimiter.as_char(), "processing input file");

    let outcome = import(&source, delimiter, &settings, &mut TracingSink)?;
    for line in outcome.report.lines() {
        tracing::debug!("{line}");
    }
    print_summary(&outcome);
    Ok(())
}

/// Process `source`, write the output files and build the report.
pub fn import<S: RowSink + ?Sized>(
    source: &Path,
    delimiter: Delimiter,
    settings: &Settings,
    sink: &mut S,
) -> Result<ImportOutcome> {
    let options = settings.process_options();
    let started = Instant::now();
    let lines = read_data_lines(source)?;
    let result = process_lines(&lines, delimiter, &options, sink);
    let summary = summarize(&result, started.elapsed());

    let paths = OutputPaths::for_source(source, settings.output_dir().as_deref());
    let accepted_path = write_accepted(&result.accepted, delimiter, &paths.accepted)?;
    let rejected_path = write_rejected(&result.rejected, &paths.rejected)?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = format_report(&summary, source, &generated_at);
    let report_path = write_report(&report, &paths.report)?;

    tracing::info!(
        total = summary.total,
        valid = summary.accepted,
        invalid = summary.rejected,
        seconds = %seconds(summary.elapsed),
        "import complete"
    );
    for (reason, count) in &summary.reasons {
        tracing::info!(%reason, count, "rejection reason");
    }

    Ok(ImportOutcome {
        summary,
        accepted_path,
        rejected_path,
        report_path,
        report,
    })
}

fn print_summary(outcome: &ImportOutcome) {
    let s = &outcome.summary;
    println!(
        "{} records processed in {}s: {} valid, {} invalid",
        s.total,
        seconds(s.elapsed),
        s.accepted.to_string().green(),
        s.rejected.to_string().red()
    );

    if !s.reasons.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Rejection Reason", "Count"]);
        for (reason, count) in &s.reasons {
            table.add_row(vec![Cell::new(reason), Cell::new(count)]);
        }
        println!("{table}");
    }

    match &outcome.accepted_path {
        Some(path) => println!("Wrote {}", path.display()),
        None => println!("{}", "No valid records; cleaned file not written.".yellow()),
    }
    if let Some(path) = &outcome.rejected_path {
        println!("Wrote {}", path.display());
    }
    println!("Wrote {}", outcome.report_path.display());
}
