//! JSON export: the raw log structure, pretty-printed.

use vitals_types::Log;

use crate::error::Result;

/// Serialize the whole log for export.
///
/// The output is accepted as-is by [`Repository::deserialize`](crate::Repository::deserialize).
pub fn render(log: &Log) -> Result<String> {
    Ok(serde_json::to_string_pretty(log)?)
}
