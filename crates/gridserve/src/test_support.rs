//! Fixtures shared by the unit tests: a sample record type, a filter
//! recorder, and a scripted storage backend that logs every query it runs.

use std::ops::Range;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::date::{DateFormatter, PatternFormatter};
use crate::record::Record;
use crate::storage::{
    Dir, FieldFilter, Filter, FilterOp, Filterable, Group, QueryBuilder, Relation, Storage,
};
use crate::value::{FieldValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub nickname: Option<String>,
    pub joined: DateTime<Utc>,
}

impl Record for Person {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Int(self.id),
            "name" => Value::String(&self.name),
            "nickname" => self.nickname.as_deref().map_or(Value::None, Value::String),
            "joined" => Value::Date(self.joined),
            _ => Value::None,
        }
    }
}

pub fn person(id: i64, name: &str, joined: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
        nickname: None,
        joined: PatternFormatter::default()
            .parse(joined)
            .expect("fixture date"),
    }
}

/// Collects top-level field filters.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub filters: Vec<FieldFilter>,
}

impl Filterable for Recorder {
    fn filter(mut self, field: &str, op: FilterOp, value: FieldValue) -> Self {
        self.filters.push(FieldFilter::new(field, op, value));
        self
    }
}

/// One terminal operation observed by [`Scripted`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    All {
        filters: Vec<Filter>,
        sort: Option<(String, Dir)>,
        range: Option<Range<usize>>,
    },
    Count {
        filters: Vec<Filter>,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
pub struct Unavailable;

/// Storage that returns canned rows and counts and records what was asked.
///
/// `count` answers `total` for an unfiltered query and `display` otherwise.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub rows: Vec<Person>,
    pub total: u64,
    pub display: u64,
    pub fail: bool,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl Scripted {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedQuery {
    storage: Scripted,
    root: Group,
    sort: Option<(String, Dir)>,
    range: Option<Range<usize>>,
}

impl Filterable for ScriptedQuery {
    fn filter(mut self, field: &str, op: FilterOp, value: FieldValue) -> Self {
        self.root = self.root.filter(field, op, value);
        self
    }
}

#[async_trait]
impl QueryBuilder<Person> for ScriptedQuery {
    type Error = Unavailable;

    fn group<F>(mut self, relation: Relation, build: F) -> Self
    where
        F: FnOnce(Group) -> Group,
    {
        self.root = self.root.group(relation, build);
        self
    }

    fn sort(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some((field.to_string(), dir));
        self
    }

    fn range(mut self, range: Range<usize>) -> Self {
        self.range = Some(range);
        self
    }

    async fn all(self) -> Result<Vec<Person>, Unavailable> {
        self.storage.calls.lock().expect("calls lock").push(Call::All {
            filters: self.root.into_filters(),
            sort: self.sort,
            range: self.range,
        });
        if self.storage.fail {
            return Err(Unavailable);
        }
        Ok(self.storage.rows.clone())
    }

    async fn count(self) -> Result<u64, Unavailable> {
        let filtered = !self.root.is_empty();
        self.storage.calls.lock().expect("calls lock").push(Call::Count {
            filters: self.root.into_filters(),
        });
        if self.storage.fail {
            return Err(Unavailable);
        }
        Ok(if filtered {
            self.storage.display
        } else {
            self.storage.total
        })
    }
}

impl Storage<Person> for Scripted {
    type Query = ScriptedQuery;

    fn query(&self) -> ScriptedQuery {
        ScriptedQuery {
            storage: self.clone(),
            root: Group::new(Relation::And),
            sort: None,
            range: None,
        }
    }
}
