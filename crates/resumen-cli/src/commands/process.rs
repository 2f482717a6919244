//! Process command - convert a single statement PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use resumen_core::models::config::ResumenConfig;
use resumen_core::models::statement::StatementTable;
use resumen_core::pdf::{PdfExtractor, PdfProcessor};
use resumen_core::statement::{AccountStatementParser, StatementParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input statement PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Show scan statistics after processing
    #[arg(long)]
    show_stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV table
    Csv,
    /// JSON rows
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Extracting text...");
    pb.set_position(20);

    let text = extract_pdf_text(&args.input, &config)?;

    pb.set_message("Parsing transactions...");
    pb.set_position(60);

    let parser = AccountStatementParser::new();
    let result = parser.parse(&text);
    let table = StatementTable::from_records(&result.records);

    pb.finish_with_message("Done");

    if table.is_empty() {
        eprintln!(
            "{} No transactions found in {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    let output = format_table(&table, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_stats {
        println!();
        println!(
            "{} {} logical lines scanned, {} skipped",
            style("ℹ").blue(),
            result.lines_scanned,
            result.lines_skipped
        );
        println!(
            "{} Parse time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the pipeline configuration, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ResumenConfig> {
    match config_path {
        Some(path) => Ok(ResumenConfig::from_file(Path::new(path))?),
        None => Ok(ResumenConfig::default()),
    }
}

/// Read a PDF from disk and extract its embedded text.
pub fn extract_pdf_text(path: &Path, config: &ResumenConfig) -> anyhow::Result<String> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let page_count = extractor.page_count();
    debug!("PDF has {} pages", page_count);

    let mut text = extractor.extract_text()?;
    if config.pdf.max_pages > 0 && (page_count as usize) > config.pdf.max_pages {
        debug!("Keeping only the first {} pages", config.pdf.max_pages);
        text = truncate_to_pages(&text, page_count, config.pdf.max_pages);
    }

    if text.trim().len() < config.pdf.min_text_length {
        anyhow::bail!("No text extracted from {}", path.display());
    }

    Ok(text)
}

/// Keep the leading `max_pages` share of the extracted text, splitting lines
/// evenly across pages the same way `PdfExtractor::extract_page_text` does.
fn truncate_to_pages(text: &str, page_count: u32, max_pages: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let lines_per_page = lines.len() / page_count.max(1) as usize;
    let keep = (lines_per_page * max_pages).min(lines.len());
    lines[..keep].join("\n")
}

/// Render a table in the requested output format.
pub fn format_table(table: &StatementTable, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_table_csv(table),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.rows)?),
        OutputFormat::Text => Ok(format_table_text(table)),
    }
}

// Column headers match the original statement layout.
const CSV_HEADERS: [&str; 5] = [
    "Fecha",
    "Descripción",
    "ID de la Operación",
    "Valor",
    "Saldo",
];

fn format_table_csv(table: &StatementTable) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADERS)?;

    for row in &table.rows {
        wtr.write_record([
            row.date.as_str(),
            row.description.as_str(),
            &row.operation_id.map(|id| id.to_string()).unwrap_or_default(),
            &row.value.map(|v| v.to_string()).unwrap_or_default(),
            &row.balance.map(|b| b.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_table_text(table: &StatementTable) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transactions: {}\n", table.len()));
    if let Some(label) = table.period_label() {
        output.push_str(&format!("Period: {}\n", label));
    }
    output.push('\n');

    for row in &table.rows {
        output.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            row.date,
            row.operation_id.map(|id| id.to_string()).unwrap_or_default(),
            row.description,
            row.value.map(|v| v.to_string()).unwrap_or_default(),
            row.balance.map(|b| b.to_string()).unwrap_or_default(),
        ));
    }

    output
}
