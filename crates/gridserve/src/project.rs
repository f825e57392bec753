//! Projection of fetched records into the response's string matrix.

use crate::date::DateFormatter;
use crate::field::Fields;
use crate::record::Record;

/// Renders `rows` into cells.
///
/// Row order is kept as fetched and cells follow field order. See
/// [`Field::render`](crate::Field::render) for how a single cell is produced.
///
/// # Panics
///
/// Panics if a required field of any row has no value.
pub fn render_rows<R: Record>(
    fields: &Fields,
    rows: &[R],
    dates: &dyn DateFormatter,
) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| fields.iter().map(|field| field.render(row, dates)).collect())
        .collect()
}
