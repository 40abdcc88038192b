//! Feature derivation and prediction pipeline.
//!
//! One pipeline serves both entry points: a single order typed in by hand and
//! a CSV table of orders. Both paths build the same fixed-order feature
//! vector, so equal inputs produce equal predictions regardless of how they
//! arrived.

pub mod engine;
pub mod features;
pub mod format;
pub mod table;
pub mod vector;

use thiserror::Error;

pub use engine::PredictionEngine;
pub use features::{DerivedFields, RawOrder, derive, is_weekend, revenue_per_unit};
pub use table::BatchTable;
pub use vector::{FEATURE_VECTOR_LEN, to_feature_vector};

/// Errors surfaced by the prediction pipeline.
///
/// Every failure is scoped to the request that triggered it; the loaded
/// model stays usable for later requests and nothing is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input table lacks one or more required columns.
    #[error("Input table is missing required columns: {}", missing.join(", "))]
    InputSchema { missing: Vec<String> },
    /// A feature row does not match the width the model expects.
    #[error("Feature row has {got} values but the model expects {expected}")]
    ModelInput { expected: usize, got: usize },
    /// The input file is not a well-formed CSV table.
    #[error("Failed to parse input table: {0}")]
    Parse(#[from] csv::Error),
    /// A required column holds a value that does not parse as a number.
    #[error("Row {row}, column {column}: invalid numeric value {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    /// Reading or writing a table file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a single-order prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePrediction {
    /// Fields derived from the raw order before prediction.
    pub derived: DerivedFields,
    /// Model output in sales units.
    pub predicted_sales: f32,
}

/// Derive features for one order and predict its sales value.
pub fn predict_order(
    engine: &PredictionEngine,
    order: &RawOrder,
) -> Result<SinglePrediction, PipelineError> {
    let derived = derive(order);
    let features = to_feature_vector(order, &derived);
    let predicted_sales = engine.predict_one(&features)?;
    Ok(SinglePrediction {
        derived,
        predicted_sales,
    })
}

/// Run the batch pipeline over an uploaded table.
///
/// Returns a new table holding every original column and row, in order, plus
/// the derived and prediction columns. Schema violations are reported before
/// any prediction is attempted.
pub fn predict_table(
    engine: &PredictionEngine,
    table: &BatchTable,
) -> Result<BatchTable, PipelineError> {
    let orders = table.orders()?;
    let derived: Vec<DerivedFields> = orders.iter().map(derive).collect();
    let rows: Vec<Vec<f32>> = orders
        .iter()
        .zip(&derived)
        .map(|(order, fields)| to_feature_vector(order, fields))
        .collect();
    let predictions = engine.predict_batch(&rows)?;
    Ok(format::augment_table(table, &derived, &predictions))
}
