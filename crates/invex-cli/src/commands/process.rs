//! Process command - extract a structured record from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use invex_core::pdf::{PdfTextProvider, TextProvider};
use invex_core::{ExtractionConfig, ExtractionPipeline, InvoiceRecord, RawDocument};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = ExtractionPipeline::new(&config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = retrieve(&args.input)?;
    if let Some(reason) = &document.failure {
        eprintln!(
            "{} Text retrieval failed: {} (emitting a failed record)",
            style("!").yellow(),
            reason
        );
    }

    let record = pipeline.process(&document);
    let output = format_record(&record, args.format)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load pipeline configuration, falling back to the built-in defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtractionConfig> {
    match config_path {
        Some(path) => Ok(ExtractionConfig::from_file(Path::new(path))?),
        None => Ok(ExtractionConfig::default()),
    }
}

/// Retrieve raw text from a supported input file.
///
/// PDFs go through the PDF provider; plain-text files are read directly
/// (useful for pre-extracted or test inputs). Retrieval failures become
/// failed documents, not errors.
pub(crate) fn retrieve(path: &Path) -> anyhow::Result<RawDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(PdfTextProvider::new().retrieve(path)),
        "txt" | "text" => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(match fs::read_to_string(path) {
                Ok(text) => RawDocument::new(filename, text),
                Err(e) => RawDocument::failed(filename, e.to_string()),
            })
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub(crate) fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

pub(crate) const CSV_HEADER: [&str; 12] = [
    "filename",
    "vendor",
    "invoice_number",
    "date",
    "amount",
    "currency",
    "currency_symbol",
    "currency_region",
    "category",
    "invoice_type",
    "is_complete",
    "extraction_status",
];

pub(crate) fn csv_row(record: &InvoiceRecord) -> [String; 12] {
    [
        record.filename.clone(),
        record.vendor.clone(),
        record.invoice_number.clone(),
        record.date.clone(),
        record.amount.to_string(),
        record.currency.clone(),
        record.currency_symbol.clone(),
        record.currency_region.clone(),
        record.category.clone(),
        record.invoice_type.label().to_string(),
        record.is_complete.to_string(),
        record.extraction_status.label().to_string(),
    ]
}

fn format_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("File:     {}\n", record.filename));
    output.push_str(&format!("Vendor:   {}\n", record.vendor));
    output.push_str(&format!("Invoice:  {}\n", record.invoice_number));
    output.push_str(&format!("Date:     {}\n", record.date));
    if record.currency_symbol.is_empty() {
        output.push_str(&format!("Amount:   {:.2} {}\n", record.amount, record.currency));
    } else {
        output.push_str(&format!(
            "Amount:   {}{:.2} ({})\n",
            record.currency_symbol, record.amount, record.currency
        ));
    }
    output.push_str(&format!("Region:   {}\n", record.currency_region));
    output.push_str(&format!("Category: {}\n", record.category));
    output.push_str(&format!("Type:     {}\n", record.invoice_type.label()));
    output.push_str(&format!("Status:   {}\n", record.extraction_status.label()));

    output
}
