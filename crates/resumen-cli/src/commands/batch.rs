//! Batch command - convert multiple statement PDFs and consolidate them.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{StreamExt, stream};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use resumen_core::models::config::ResumenConfig;
use resumen_core::models::statement::{StatementTable, sanitize_filename};
use resumen_core::statement::{AccountStatementParser, StatementParser};

use super::process::{self, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file tables
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for per-file tables
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Skip writing the consolidated table
    #[arg(long)]
    no_consolidate: bool,

    /// Also generate a per-file status summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    table: Option<StatementTable>,
    lines_skipped: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = process::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Parse each file on its own blocking worker. `buffered` bounds the
    // number in flight and yields results in file order, so the
    // consolidated table keeps the input ordering.
    let jobs = args.jobs.max(1);
    let mut tasks = stream::iter(files.into_iter().map(|path| {
        let config = config.clone();
        tokio::task::spawn_blocking(move || process_single_file(path, &config))
    }))
    .buffered(jobs);

    let mut results = Vec::new();
    while let Some(joined) = tasks.next().await {
        let result = joined?;

        if let Some(err) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), err);
            } else {
                error!("Failed to process {}: {}", result.path.display(), err);
                anyhow::bail!("Processing failed: {}", err);
            }
        }

        results.push(result);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful_count = results.iter().filter(|r| r.table.is_some()).count();
    let failed_count = results.len() - successful_count;

    // Per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for (result, table) in results.iter().filter_map(|r| r.table.as_ref().map(|t| (r, t))) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("resumen");

            let extension = match args.format {
                OutputFormat::Csv => "csv",
                OutputFormat::Json => "json",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = process::format_table(table, args.format)?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Per-file status summary
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Consolidated table across all successful files, in input order.
    // This consumes the per-file tables, so it runs last.
    if !args.no_consolidate {
        let consolidated = consolidate(&mut results);

        if consolidated.is_empty() {
            eprintln!(
                "{} No transactions found in any input file",
                style("!").yellow()
            );
        } else {
            let label = consolidated
                .period_label()
                .unwrap_or_else(|| "sin_periodo".to_string());
            let filename = format!(
                "{}_{}.csv",
                config.output.consolidated_prefix,
                sanitize_filename(&label)
            );

            let consolidated_path = args
                .output_dir
                .as_ref()
                .map(|d| d.join(&filename))
                .unwrap_or_else(|| PathBuf::from(&filename));

            let content = process::format_table(&consolidated, OutputFormat::Csv)?;
            fs::write(&consolidated_path, content)?;
            println!(
                "{} Consolidated table ({} rows) written to {}",
                style("✓").green(),
                consolidated.len(),
                consolidated_path.display()
            );
        }
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful_count).green(),
        style(failed_count).red()
    );

    if failed_count > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for result in results.iter().filter(|r| r.error.is_some()) {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Merge every per-file table into one consolidated table, preserving the
/// input file order. Tables are taken out of `results`, not cloned.
fn consolidate(results: &mut [FileResult]) -> StatementTable {
    let mut consolidated = StatementTable::default();
    for result in results {
        if let Some(table) = result.table.take() {
            consolidated.extend(table);
        }
    }
    consolidated
}

fn process_single_file(path: PathBuf, config: &ResumenConfig) -> FileResult {
    let file_start = Instant::now();

    match parse_file(&path, config) {
        Ok((table, lines_skipped)) => FileResult {
            path,
            table: Some(table),
            lines_skipped,
            error: None,
            processing_time_ms: file_start.elapsed().as_millis() as u64,
        },
        Err(e) => FileResult {
            path,
            table: None,
            lines_skipped: 0,
            error: Some(e.to_string()),
            processing_time_ms: file_start.elapsed().as_millis() as u64,
        },
    }
}

fn parse_file(path: &PathBuf, config: &ResumenConfig) -> anyhow::Result<(StatementTable, usize)> {
    let text = process::extract_pdf_text(path, config)?;

    let parser = AccountStatementParser::new();
    let result = parser.parse(&text);

    Ok((
        StatementTable::from_records(&result.records),
        result.lines_skipped,
    ))
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "records",
        "lines_skipped",
        "period",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(table) = &result.table {
            wtr.write_record([
                filename,
                "success",
                &table.len().to_string(),
                &result.lines_skipped.to_string(),
                &table.period_label().unwrap_or_default(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumen_core::models::statement::TransactionRecord;

    fn file_result(name: &str, dates: &[&str]) -> FileResult {
        let records: Vec<TransactionRecord> = dates
            .iter()
            .map(|d| TransactionRecord {
                date: d.to_string(),
                description: "Pago de servicios".to_string(),
                operation_id: "987654".to_string(),
                value: "10.00".to_string(),
                balance: "20.00".to_string(),
            })
            .collect();

        FileResult {
            path: PathBuf::from(name),
            table: Some(StatementTable::from_records(&records)),
            lines_skipped: 0,
            error: None,
            processing_time_ms: 0,
        }
    }

    #[test]
    fn test_consolidate_moves_tables_in_input_order() {
        let mut results = vec![
            file_result("a.pdf", &["01-03-2024", "02-03-2024"]),
            file_result("b.pdf", &["03-03-2024"]),
        ];

        let consolidated = consolidate(&mut results);

        assert_eq!(consolidated.len(), 3);
        let dates: Vec<&str> = consolidated.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["01-03-2024", "02-03-2024", "03-03-2024"]);
        assert!(results.iter().all(|r| r.table.is_none()));
    }

    #[test]
    fn test_consolidate_skips_failed_files() {
        let mut results = vec![
            file_result("a.pdf", &["01-03-2024"]),
            FileResult {
                path: PathBuf::from("b.pdf"),
                table: None,
                lines_skipped: 0,
                error: Some("broken".to_string()),
                processing_time_ms: 0,
            },
        ];

        assert_eq!(consolidate(&mut results).len(), 1);
    }
}
