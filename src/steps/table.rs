//! Step data table helpers

use crate::common::{Error, Result};

/// Read two named columns of a table whose first row is the header
///
/// Returns one `(key, value)` pair per data row, in table order.
pub fn column_pairs(
    rows: &[Vec<String>],
    key_column: &str,
    value_column: &str,
) -> Result<Vec<(String, String)>> {
    let (header, data) = rows
        .split_first()
        .ok_or_else(|| Error::MalformedTable("table is empty".to_string()))?;

    let position = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MalformedTable(format!("missing '{}' column", name)))
    };
    let key_idx = position(key_column)?;
    let value_idx = position(value_column)?;

    data.iter()
        .enumerate()
        .map(|(i, row)| match (row.get(key_idx), row.get(value_idx)) {
            (Some(key), Some(value)) => Ok((key.clone(), value.clone())),
            _ => Err(Error::MalformedTable(format!(
                "row {} has {} cells",
                i + 1,
                row.len()
            ))),
        })
        .collect()
}
