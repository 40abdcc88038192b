//! Run batch sales predictions over a CSV file of orders.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use salecast::config;
use salecast::logging;
use salecast::ml;
use salecast::pipeline::{self, BatchTable, PredictionEngine, format};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct CliOptions {
    input: PathBuf,
    output: PathBuf,
    model_path: Option<PathBuf>,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let model =
        ml::load_model(options.model_path.as_deref(), &settings).map_err(|err| err.to_string())?;
    let engine = PredictionEngine::new(model);

    let table = BatchTable::from_path(&options.input).map_err(|err| err.to_string())?;
    tracing::info!(
        "Read {} rows from {}",
        table.row_count(),
        options.input.display()
    );

    let augmented = pipeline::predict_table(&engine, &table).map_err(|err| err.to_string())?;

    let file = File::create(&options.output)
        .map_err(|err| format!("Failed to create {}: {err}", options.output.display()))?;
    format::write_csv(&augmented, BufWriter::new(file)).map_err(|err| err.to_string())?;

    tracing::info!(
        "Wrote {} predictions to {}",
        augmented.row_count(),
        options.output.display()
    );
    println!(
        "Wrote {} predictions to {}",
        augmented.row_count(),
        options.output.display()
    );
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut model_path: Option<PathBuf> = None;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--input" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--input requires a value".to_string())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--output requires a value".to_string())?;
                output = Some(PathBuf::from(value));
            }
            "--model" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--model requires a value".to_string())?;
                model_path = Some(PathBuf::from(value));
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let input = input.ok_or_else(|| "--input is required".to_string())?;
    Ok(CliOptions {
        input,
        output: output.unwrap_or_else(|| PathBuf::from(format::EXPORT_FILE_NAME)),
        model_path,
    })
}

fn help_text() -> String {
    [
        "salecast-batch",
        "",
        "Predict sales for every row of a CSV order table.",
        "",
        "The input must contain the columns QUANTITYORDERED, PRICEEACH, DAY",
        "and WEEKDAY; extra columns pass through to the output unchanged.",
        "",
        "Usage:",
        "  salecast-batch --input FILE [--output FILE] [--model FILE]",
        "",
        "Options:",
        "  --input FILE   CSV file of orders",
        "  --output FILE  Output CSV path (default sales_predictions.csv)",
        "  --model FILE   Regression model JSON (defaults to settings, then bundled)",
    ]
    .join("\n")
}
