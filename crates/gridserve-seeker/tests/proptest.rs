//! Property-based tests for request handling using proptest.

use gridserve::{Column, DataTable, Field, Record, Request, Response, Search, Value};
use gridserve_seeker::MemoryStore;
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct Item {
    id: i64,
    label: String,
}

impl Record for Item {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Int(self.id),
            "label" => Value::String(&self.label),
            _ => Value::None,
        }
    }
}

const ROWS: i64 = 25;

fn store() -> MemoryStore<Item> {
    (1..=ROWS)
        .map(|id| Item {
            id,
            label: format!("item {id}"),
        })
        .collect()
}

fn table() -> DataTable<Item> {
    DataTable::new(vec![Field::int("id"), Field::string("label")])
}

fn search(value: &str) -> Search {
    Search {
        value: Some(value.to_string()),
        regex: false,
    }
}

fn request(draw: i64, start: i64, length: i64, id_search: &str, global: &str) -> Request {
    Request {
        draw,
        columns: vec![
            Column {
                data: 0,
                name: None,
                searchable: true,
                orderable: true,
                search: search(id_search),
            },
            Column {
                data: 1,
                name: None,
                searchable: true,
                orderable: true,
                search: search(""),
            },
        ],
        order: vec![],
        start,
        length,
        search: search(global),
    }
}

fn handle(request: &Request) -> Response {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(table().handle(&store(), request))
        .unwrap()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The draw token comes back untouched.
    #[test]
    fn echo_matches_draw(draw in any::<i64>()) {
        let response = handle(&request(draw, 0, 5, "", ""));
        prop_assert_eq!(response.echo, draw);
    }

    /// An unusable window always yields the first ten rows.
    #[test]
    fn bad_window_falls_back(start in -1000i64..0, length in -1000i64..1000) {
        let response = handle(&request(1, start, length, "", ""));
        let ids: Vec<String> = (1..=10).map(|id| id.to_string()).collect();
        let got: Vec<String> = response.data.iter().map(|row| row[0].clone()).collect();
        prop_assert_eq!(got, ids);
    }

    /// Non-positive lengths fall back too.
    #[test]
    fn non_positive_length_falls_back(start in 0i64..100, length in -100i64..=0) {
        let response = handle(&request(1, start, length, "", ""));
        prop_assert_eq!(response.data.len(), 10);
        prop_assert_eq!(&response.data[0][0], "1");
    }

    /// The unfiltered total never depends on the searches.
    #[test]
    fn total_is_constant(id_search in "[0-9a-z -]{0,8}", global in "[0-9a-z ]{0,8}") {
        let response = handle(&request(1, 0, 10, &id_search, &global));
        prop_assert_eq!(response.total_records, ROWS as u64);
        prop_assert!(response.display_records <= response.total_records);
        prop_assert!(response.data.len() as u64 <= response.display_records);
        prop_assert!(response.data.len() <= 10);
    }

    /// A search that does not parse for an Int column filters nothing.
    #[test]
    fn unparseable_int_search_is_no_filter(text in "[a-z]{1,8}") {
        let response = handle(&request(1, 0, 10, &text, ""));
        prop_assert_eq!(response.display_records, ROWS as u64);
    }

    /// A range whose bounds are reversed matches nothing.
    #[test]
    fn reversed_range_is_empty(low in 1i64..ROWS, gap in 1i64..10) {
        let high = low + gap;
        let response = handle(&request(1, 0, 10, &format!("{high}-{low}"), ""));
        prop_assert_eq!(response.display_records, 0);
        prop_assert!(response.data.is_empty());
    }

    /// An in-order range counts exactly the ids it covers.
    #[test]
    fn range_counts_covered_ids(low in 1i64..=ROWS, span in 0i64..ROWS) {
        let high = (low + span).min(ROWS);
        let response = handle(&request(1, 0, 100, &format!("{low} - {high}"), ""));
        prop_assert_eq!(response.display_records, (high - low + 1) as u64);
    }
}
