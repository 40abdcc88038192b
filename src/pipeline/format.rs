//! Result rendering: currency strings and augmented CSV output.

use std::io;

use super::PipelineError;
use super::features::DerivedFields;
use super::table::BatchTable;

/// Derived column holding the 0/1 weekend flag.
pub const IS_WEEKEND_COLUMN: &str = "IS_WEEKEND";
/// Derived column holding quantity times unit price.
pub const REVENUE_PER_UNIT_COLUMN: &str = "REVENUE_PER_UNIT";
/// Column holding the model output.
pub const PREDICTED_SALES_COLUMN: &str = "PREDICTED_SALES";

/// Default filename offered for the batch output.
pub const EXPORT_FILE_NAME: &str = "sales_predictions.csv";

/// Format one prediction as a dollar string with two decimals.
///
/// Rounding here is presentation only; exported values are never rounded.
pub fn format_currency(value: f32) -> String {
    format_currency_with(value, "$")
}

/// Format one prediction with a configurable currency symbol.
pub fn format_currency_with(value: f32, symbol: &str) -> String {
    format!("{symbol}{value:.2}")
}

/// Append the derived and prediction columns to the original table.
///
/// Original columns and row order are preserved untouched; the output has
/// exactly three more columns and the same number of rows. Callers pass
/// slices produced from the table's own rows, so the lengths line up by
/// construction.
pub fn augment_table(
    table: &BatchTable,
    derived: &[DerivedFields],
    predictions: &[f32],
) -> BatchTable {
    debug_assert_eq!(table.row_count(), derived.len());
    debug_assert_eq!(table.row_count(), predictions.len());

    let mut headers = table.headers().to_vec();
    headers.push(IS_WEEKEND_COLUMN.to_string());
    headers.push(REVENUE_PER_UNIT_COLUMN.to_string());
    headers.push(PREDICTED_SALES_COLUMN.to_string());

    let rows = table
        .rows()
        .iter()
        .zip(derived.iter().zip(predictions))
        .map(|(row, (fields, &prediction))| {
            let mut out = row.clone();
            out.push(if fields.is_weekend { "1" } else { "0" }.to_string());
            out.push(number_cell(fields.revenue_per_unit));
            out.push(number_cell(prediction));
            out
        })
        .collect();
    BatchTable::new(headers, rows)
}

/// Serialize a table to CSV with a header row.
pub fn write_csv<W: io::Write>(table: &BatchTable, writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize a table to UTF-8 CSV bytes suitable for download or storage.
pub fn to_csv_bytes(table: &BatchTable) -> Result<Vec<u8>, PipelineError> {
    let mut out = Vec::new();
    write_csv(table, &mut out)?;
    Ok(out)
}

/// Render a numeric cell without rounding. `f32` display is the shortest
/// string that round-trips, so exported values stay exact.
fn number_cell(value: f32) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> BatchTable {
        let csv = "\
QUANTITYORDERED,PRICEEACH,DAY,WEEKDAY,PRODUCTLINE
10,45.0,12,1,Classic Cars
20,55.5,23,5,Planes
";
        BatchTable::from_reader(csv.as_bytes()).unwrap()
    }

    fn sample_derived() -> Vec<DerivedFields> {
        vec![
            DerivedFields {
                is_weekend: false,
                revenue_per_unit: 450.0,
            },
            DerivedFields {
                is_weekend: true,
                revenue_per_unit: 1110.0,
            },
        ]
    }

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(450.0), "$450.00");
        assert_eq!(format_currency(3405.235), "$3405.24");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn currency_symbol_is_configurable() {
        assert_eq!(format_currency_with(450.0, "€"), "€450.00");
        assert_eq!(format_currency_with(450.0, "$"), format_currency(450.0));
    }

    #[test]
    fn augment_adds_exactly_three_columns() {
        let table = sample_table();
        let out = augment_table(&table, &sample_derived(), &[3100.5, 4200.25]);
        assert_eq!(out.headers().len(), table.headers().len() + 3);
        assert_eq!(
            &out.headers()[table.headers().len()..],
            [
                IS_WEEKEND_COLUMN,
                REVENUE_PER_UNIT_COLUMN,
                PREDICTED_SALES_COLUMN
            ]
        );
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn original_cells_pass_through_unchanged() {
        let table = sample_table();
        let out = augment_table(&table, &sample_derived(), &[3100.5, 4200.25]);
        for (before, after) in table.rows().iter().zip(out.rows()) {
            assert_eq!(&after[..before.len()], &before[..]);
        }
        assert_eq!(out.rows()[0][5], "0");
        assert_eq!(out.rows()[1][5], "1");
        assert_eq!(out.rows()[1][6], "1110");
        assert_eq!(out.rows()[1][7], "4200.25");
    }

    #[test]
    fn csv_output_has_a_header_row() {
        let table = sample_table();
        let out = augment_table(&table, &sample_derived(), &[3100.5, 4200.25]);
        let bytes = to_csv_bytes(&out).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "QUANTITYORDERED,PRICEEACH,DAY,WEEKDAY,PRODUCTLINE,\
             IS_WEEKEND,REVENUE_PER_UNIT,PREDICTED_SALES"
        );
        assert_eq!(lines.count(), 2);
    }
}
