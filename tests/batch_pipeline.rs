//! End-to-end batch pipeline tests against the bundled model.

use salecast::ml::GbdtRegressor;
use salecast::pipeline::{
    self, BatchTable, PipelineError, PredictionEngine, RawOrder, format,
};
use tempfile::tempdir;

const ORDERS_CSV: &str = "\
QUANTITYORDERED,PRICEEACH,DAY,WEEKDAY,PRODUCTLINE
10,45.0,12,1,Classic Cars
20,55.5,23,5,Planes
";

fn bundled_engine() -> PredictionEngine {
    PredictionEngine::new(GbdtRegressor::bundled().expect("bundled model loads"))
}

#[test]
fn file_round_trip_appends_three_columns_and_keeps_rows() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("orders.csv");
    let output_path = dir.path().join(format::EXPORT_FILE_NAME);
    std::fs::write(&input_path, ORDERS_CSV).unwrap();

    let engine = bundled_engine();
    let table = BatchTable::from_path(&input_path).unwrap();
    let augmented = pipeline::predict_table(&engine, &table).unwrap();

    let file = std::fs::File::create(&output_path).unwrap();
    format::write_csv(&augmented, file).unwrap();

    let written = BatchTable::from_path(&output_path).unwrap();
    assert_eq!(written.row_count(), table.row_count());
    assert_eq!(written.headers().len(), table.headers().len() + 3);
    assert_eq!(
        &written.headers()[table.headers().len()..],
        [
            format::IS_WEEKEND_COLUMN,
            format::REVENUE_PER_UNIT_COLUMN,
            format::PREDICTED_SALES_COLUMN
        ]
    );

    // Original cells survive the round trip byte-identical.
    for (before, after) in table.rows().iter().zip(written.rows()) {
        assert_eq!(&after[..before.len()], &before[..]);
    }
}

#[test]
fn batch_predictions_match_the_single_path() {
    let engine = bundled_engine();
    let table = BatchTable::from_reader(ORDERS_CSV.as_bytes()).unwrap();
    let augmented = pipeline::predict_table(&engine, &table).unwrap();

    let orders = [
        RawOrder {
            quantity: 10,
            unit_price: 45.0,
            day_of_month: 12,
            weekday: 1,
        },
        RawOrder {
            quantity: 20,
            unit_price: 55.5,
            day_of_month: 23,
            weekday: 5,
        },
    ];
    for (row, order) in augmented.rows().iter().zip(&orders) {
        let single = pipeline::predict_order(&engine, order).unwrap();
        let batch_value: f32 = row.last().unwrap().parse().unwrap();
        assert_eq!(batch_value, single.predicted_sales);
        let weekend_cell = &row[row.len() - 3];
        assert_eq!(weekend_cell == "1", single.derived.is_weekend);
    }
}

#[test]
fn derived_columns_hold_the_documented_values() {
    let engine = bundled_engine();
    let table = BatchTable::from_reader(ORDERS_CSV.as_bytes()).unwrap();
    let augmented = pipeline::predict_table(&engine, &table).unwrap();

    let first = &augmented.rows()[0];
    let second = &augmented.rows()[1];
    assert_eq!(first[5], "0");
    assert_eq!(first[6], "450");
    assert_eq!(second[5], "1");
    assert_eq!(second[6], "1110");
}

#[test]
fn missing_required_column_is_fatal_for_the_request() {
    let engine = bundled_engine();
    let csv = "QUANTITYORDERED,PRICEEACH,DAY\n10,45.0,12\n";
    let table = BatchTable::from_reader(csv.as_bytes()).unwrap();
    let err = pipeline::predict_table(&engine, &table).unwrap_err();
    match err {
        PipelineError::InputSchema { missing } => assert_eq!(missing, vec!["WEEKDAY"]),
        other => panic!("expected InputSchema, got {other:?}"),
    }

    // The engine stays usable after a failed request.
    let ok = BatchTable::from_reader(ORDERS_CSV.as_bytes()).unwrap();
    assert!(pipeline::predict_table(&engine, &ok).is_ok());
}

#[test]
fn rerun_produces_byte_identical_output() {
    let engine = bundled_engine();
    let table = BatchTable::from_reader(ORDERS_CSV.as_bytes()).unwrap();
    let first = format::to_csv_bytes(&pipeline::predict_table(&engine, &table).unwrap()).unwrap();
    let second = format::to_csv_bytes(&pipeline::predict_table(&engine, &table).unwrap()).unwrap();
    assert_eq!(first, second);
}
