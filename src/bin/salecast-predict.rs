//! Predict the sales value for a single order given on the command line.

use std::path::PathBuf;

use salecast::config;
use salecast::logging;
use salecast::ml;
use salecast::pipeline::{self, PredictionEngine, RawOrder, format};

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
    quantity: u32,
    price: f32,
    day: i32,
    weekday: i32,
    model_path: Option<PathBuf>,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let model =
        ml::load_model(options.model_path.as_deref(), &settings).map_err(|err| err.to_string())?;
    let engine = PredictionEngine::new(model);

    let order = RawOrder {
        quantity: options.quantity,
        unit_price: options.price,
        day_of_month: options.day,
        weekday: options.weekday,
    };
    let result = pipeline::predict_order(&engine, &order).map_err(|err| err.to_string())?;

    println!(
        "Weekend: {}",
        if result.derived.is_weekend { "yes" } else { "no" }
    );
    println!("Revenue per unit: {:.2}", result.derived.revenue_per_unit);
    println!(
        "Predicted sales: {}",
        format::format_currency_with(result.predicted_sales, &settings.currency_symbol)
    );
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut quantity: Option<u32> = None;
    let mut price: Option<f32> = None;
    let mut day: Option<i32> = None;
    let mut weekday: Option<i32> = None;
    let mut model_path: Option<PathBuf> = None;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--quantity" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--quantity requires a value".to_string())?;
                let parsed = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid --quantity value: {value}"))?;
                if parsed == 0 {
                    return Err("--quantity must be at least 1".to_string());
                }
                quantity = Some(parsed);
            }
            "--price" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--price requires a value".to_string())?;
                let parsed = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --price value: {value}"))?;
                if !parsed.is_finite() || parsed < 0.0 {
                    return Err("--price must be a non-negative number".to_string());
                }
                price = Some(parsed);
            }
            "--day" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--day requires a value".to_string())?;
                let parsed = value
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid --day value: {value}"))?;
                if !(1..=31).contains(&parsed) {
                    return Err("--day must be between 1 and 31".to_string());
                }
                day = Some(parsed);
            }
            "--weekday" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--weekday requires a value".to_string())?;
                let parsed = value
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid --weekday value: {value}"))?;
                if !(0..=6).contains(&parsed) {
                    return Err("--weekday must be between 0 (Monday) and 6 (Sunday)".to_string());
                }
                weekday = Some(parsed);
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

    Ok(CliOptions {
        quantity: quantity.ok_or_else(|| "--quantity is required".to_string())?,
        price: price.ok_or_else(|| "--price is required".to_string())?,
        day: day.ok_or_else(|| "--day is required".to_string())?,
        weekday: weekday.ok_or_else(|| "--weekday is required".to_string())?,
        model_path,
    })
}

fn help_text() -> String {
    [
        "salecast-predict",
        "",
        "Predict the sales value for one order.",
        "",
        "Usage:",
        "  salecast-predict --quantity N --price P --day D --weekday W [--model FILE]",
        "",
        "Options:",
        "  --quantity N   Units ordered (integer, >= 1)",
        "  --price P      Price per unit (>= 0)",
        "  --day D        Day of the month (1-31)",
        "  --weekday W    Day of the week (0=Monday .. 6=Sunday)",
        "  --model FILE   Regression model JSON (defaults to settings, then bundled)",
    ]
    .join("\n")
}
