//! The response returned for every redraw request.

use serde::{Deserialize, Serialize};

/// One page of rendered rows plus the counts the widget's pager needs.
///
/// Serialized with the legacy field names the widget still reads:
///
/// ```
/// use gridserve::Response;
///
/// let response = Response {
///     echo: 4,
///     total_records: 12,
///     display_records: 2,
///     data: vec![vec!["1".into(), "Ann".into()]],
/// };
/// assert_eq!(
///     response.to_json().unwrap(),
///     r#"{"sEcho":4,"iTotalRecords":12,"iTotalDisplayRecords":2,"aaData":[["1","Ann"]]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Response {
    /// The request's `draw` token.
    #[serde(rename = "sEcho")]
    pub echo: i64,
    /// Record count with no filter applied.
    #[serde(rename = "iTotalRecords")]
    pub total_records: u64,
    /// Record count after the active filter, before paging.
    #[serde(rename = "iTotalDisplayRecords")]
    pub display_records: u64,
    /// Rendered rows, cells in field order.
    #[serde(rename = "aaData")]
    pub data: Vec<Vec<String>>,
}

impl Response {
    /// Encodes the response body.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
