//! The request a table widget posts for every redraw.
//!
//! Field names follow the widget's server-side processing convention and must
//! not change: `draw`, `columns`, `order`, `start`, `length`, `search`, and
//! the nested `data`, `name`, `searchable`, `orderable`, `value`, `regex`,
//! `column`, `dir`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Window used when the requested `start`/`length` pair is unusable.
pub const DEFAULT_WINDOW: Range<usize> = 0..10;

/// One table redraw request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Opaque correlation token, echoed back as `sEcho`.
    pub draw: i64,
    pub columns: Vec<Column>,
    /// Requested ordering; only the first entry is honored.
    pub order: Vec<Order>,
    pub start: i64,
    pub length: i64,
    /// Global search across every exposed field.
    pub search: Search,
}

/// Per-column state sent by the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column index into the exposed field list.
    pub data: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub searchable: bool,
    pub orderable: bool,
    pub search: Search,
}

/// A search box value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Search {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub regex: bool,
}

impl Search {
    /// Returns the search text if it is present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }
}

/// One ordering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Column index into the exposed field list.
    pub column: i64,
    /// `"asc"` or `"desc"`; anything but `"desc"` sorts ascending.
    pub dir: String,
}

/// Which of the three query plans a request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode<'a> {
    /// At least one column search is set: `(column index, search)` pairs,
    /// AND-combined.
    Columns(Vec<(i64, &'a str)>),
    /// No column search, but a global one: OR across every field.
    Global(&'a str),
    /// Neither.
    Unfiltered,
}

impl SearchMode<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Columns(_) => "columns",
            SearchMode::Global(_) => "global",
            SearchMode::Unfiltered => "unfiltered",
        }
    }
}

impl Request {
    /// Decodes a request body.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Returns the row window to fetch.
    ///
    /// Falls back to [`DEFAULT_WINDOW`] when `start` is negative or
    /// `length` is not positive.
    pub fn window(&self) -> Range<usize> {
        let end = match self.start.checked_add(self.length) {
            Some(end) if self.start >= 0 && self.start < end => end,
            _ => return DEFAULT_WINDOW,
        };
        match (usize::try_from(self.start), usize::try_from(end)) {
            (Ok(start), Ok(end)) => start..end,
            _ => DEFAULT_WINDOW,
        }
    }

    /// Returns the first ordering instruction, if any.
    pub fn first_order(&self) -> Option<&Order> {
        self.order.first()
    }

    /// Selects the query plan.
    ///
    /// Column searches take precedence; the global search is only looked at
    /// when every column search is empty.
    pub fn mode(&self) -> SearchMode<'_> {
        let columns: Vec<(i64, &str)> = self
            .columns
            .iter()
            .filter_map(|column| column.search.text().map(|text| (column.data, text)))
            .collect();

        if !columns.is_empty() {
            SearchMode::Columns(columns)
        } else if let Some(text) = self.search.text() {
            SearchMode::Global(text)
        } else {
            SearchMode::Unfiltered
        }
    }
}
