//! Typed field descriptors and the ordered registry a table exposes.
//!
//! A [`Field`] names a record field and tags it with one of the twelve
//! [`FieldType`] variants. The tag decides, at request time, how a raw search
//! string is parsed, whether it may be read as a two-sided range, and how an
//! absent value is treated when rows are rendered.
//!
//! [`Fields`] is the ordered list a table exposes. A field's position in it is
//! the column index the widget sends back in requests.

use std::fmt;

use crate::date::DateFormatter;
use crate::record::Record;
use crate::value::{FieldValue, Value};

/// Runtime type tag of an exposed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    OptionalString,
    Int,
    OptionalInt,
    Float64,
    OptionalFloat64,
    Float32,
    OptionalFloat32,
    Bool,
    OptionalBool,
    Date,
    OptionalDate,
}

impl FieldType {
    /// All twelve variants, required ones first.
    pub const ALL: [FieldType; 12] = [
        FieldType::String,
        FieldType::Int,
        FieldType::Float64,
        FieldType::Float32,
        FieldType::Bool,
        FieldType::Date,
        FieldType::OptionalString,
        FieldType::OptionalInt,
        FieldType::OptionalFloat64,
        FieldType::OptionalFloat32,
        FieldType::OptionalBool,
        FieldType::OptionalDate,
    ];

    /// Returns `true` for the nullable variants.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            FieldType::OptionalString
                | FieldType::OptionalInt
                | FieldType::OptionalFloat64
                | FieldType::OptionalFloat32
                | FieldType::OptionalBool
                | FieldType::OptionalDate
        )
    }

    /// Returns `true` for string fields, which are matched with `like`.
    pub fn is_text(self) -> bool {
        matches!(self, FieldType::String | FieldType::OptionalString)
    }

    /// Returns `true` if a per-column search may be read as `low-high`.
    ///
    /// Numeric and date fields support ranges; strings and booleans do not.
    pub fn supports_range(self) -> bool {
        !matches!(
            self,
            FieldType::String
                | FieldType::OptionalString
                | FieldType::Bool
                | FieldType::OptionalBool
        )
    }

    /// Parses a search token into this type's native value.
    ///
    /// Strings are taken as-is. Numbers use Rust's `FromStr`, booleans accept
    /// exactly `true` or `false`, and dates go through `dates`. Returns `None`
    /// when the token does not parse.
    pub fn parse(self, raw: &str, dates: &dyn DateFormatter) -> Option<FieldValue> {
        match self {
            FieldType::String | FieldType::OptionalString => {
                Some(FieldValue::String(raw.to_string()))
            }
            FieldType::Int | FieldType::OptionalInt => raw.parse().ok().map(FieldValue::Int),
            FieldType::Float64 | FieldType::OptionalFloat64 => {
                raw.parse().ok().map(FieldValue::Float64)
            }
            FieldType::Float32 | FieldType::OptionalFloat32 => {
                raw.parse().ok().map(FieldValue::Float32)
            }
            FieldType::Bool | FieldType::OptionalBool => raw.parse().ok().map(FieldValue::Bool),
            FieldType::Date | FieldType::OptionalDate => dates.parse(raw).map(FieldValue::Date),
        }
    }

    /// Returns the display name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::OptionalString => "Option<String>",
            FieldType::Int => "Int",
            FieldType::OptionalInt => "Option<Int>",
            FieldType::Float64 => "Float64",
            FieldType::OptionalFloat64 => "Option<Float64>",
            FieldType::Float32 => "Float32",
            FieldType::OptionalFloat32 => "Option<Float32>",
            FieldType::Bool => "Bool",
            FieldType::OptionalBool => "Option<Bool>",
            FieldType::Date => "Date",
            FieldType::OptionalDate => "Option<Date>",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One exposed column: a record field name plus its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: &'static str,
    ty: FieldType,
}

impl Field {
    /// Creates a field descriptor.
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Field { name, ty }
    }

    /// A required text field, searched with `like`.
    pub const fn string(name: &'static str) -> Self {
        Field::new(name, FieldType::String)
    }

    /// A text field that may be absent; absent values render as `""`.
    pub const fn optional_string(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalString)
    }

    /// A required integer field. Column searches accept `low-high` ranges.
    pub const fn int(name: &'static str) -> Self {
        Field::new(name, FieldType::Int)
    }

    /// An integer field that may be absent.
    pub const fn optional_int(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalInt)
    }

    /// A required `f64` field. Column searches accept `low-high` ranges.
    pub const fn float64(name: &'static str) -> Self {
        Field::new(name, FieldType::Float64)
    }

    /// An `f64` field that may be absent.
    pub const fn optional_float64(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalFloat64)
    }

    /// A required `f32` field. Searches are parsed at `f32` precision.
    pub const fn float32(name: &'static str) -> Self {
        Field::new(name, FieldType::Float32)
    }

    /// An `f32` field that may be absent.
    pub const fn optional_float32(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalFloat32)
    }

    /// A required boolean field, searched as `true`/`false`.
    pub const fn bool(name: &'static str) -> Self {
        Field::new(name, FieldType::Bool)
    }

    /// A boolean field that may be absent.
    pub const fn optional_bool(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalBool)
    }

    /// A required date field, parsed and rendered through the table's
    /// [`DateFormatter`].
    pub const fn date(name: &'static str) -> Self {
        Field::new(name, FieldType::Date)
    }

    /// A date field that may be absent.
    pub const fn optional_date(name: &'static str) -> Self {
        Field::new(name, FieldType::OptionalDate)
    }

    /// The record field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type tag.
    pub fn ty(&self) -> FieldType {
        self.ty
    }

    /// Renders this field of `record` as a response cell.
    ///
    /// Absent optional values become an empty string and dates go through
    /// `dates`.
    ///
    /// # Panics
    ///
    /// Panics when a required field reads as [`Value::None`]. That means the
    /// registry does not match the record type, which is a programming error
    /// rather than bad input.
    pub fn render<R: Record>(&self, record: &R, dates: &dyn DateFormatter) -> String {
        match record.field_value(self.name) {
            Value::None if self.ty.is_optional() => String::new(),
            Value::None => panic!(
                "required field `{}` ({}) has no value; the field list does not match the record type",
                self.name, self.ty
            ),
            Value::String(s) => s.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float64(n) => format!("{n:?}"),
            Value::Float32(n) => format!("{n:?}"),
            Value::Bool(b) => b.to_string(),
            Value::Date(d) => dates.format(&d),
        }
    }
}

/// Ordered registry of exposed fields.
///
/// Built once per table and never mutated; the column indices the widget
/// sends are positions in this list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    fields: Vec<Field>,
}

impl Fields {
    /// Creates a registry from an ordered field list.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Fields {
            fields: fields.into_iter().collect(),
        }
    }

    /// Resolves a wire column index.
    ///
    /// Negative and out-of-range indices resolve to `None`.
    pub fn resolve(&self, index: i64) -> Option<&Field> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.fields.get(index))
    }

    /// Number of exposed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is exposed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Fields { fields }
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Fields::new(iter)
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::PatternFormatter;
    use chrono::{DateTime, Utc};

    struct Person {
        id: i64,
        name: String,
        nickname: Option<String>,
        joined: DateTime<Utc>,
        score: f64,
    }

    impl Record for Person {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "id" => Value::Int(self.id),
                "name" => Value::String(&self.name),
                "nickname" => self.nickname.as_deref().map_or(Value::None, Value::String),
                "joined" => Value::Date(self.joined),
                "score" => Value::Float64(self.score),
                _ => Value::None,
            }
        }
    }

    fn person() -> Person {
        Person {
            id: 1,
            name: "Ann".to_string(),
            nickname: None,
            joined: PatternFormatter::default().parse("2023-06-01").unwrap(),
            score: 2.0,
        }
    }

    #[test]
    fn optional_tags() {
        let (optional, required): (Vec<_>, Vec<_>) =
            FieldType::ALL.into_iter().partition(|ty| ty.is_optional());
        assert_eq!(optional.len(), 6);
        assert_eq!(required.len(), 6);
        assert!(!FieldType::Int.is_optional());
        assert!(FieldType::OptionalDate.is_optional());
    }

    #[test]
    fn constructors_tag_their_type() {
        let fields = [
            Field::string("a"),
            Field::int("a"),
            Field::float64("a"),
            Field::float32("a"),
            Field::bool("a"),
            Field::date("a"),
            Field::optional_string("a"),
            Field::optional_int("a"),
            Field::optional_float64("a"),
            Field::optional_float32("a"),
            Field::optional_bool("a"),
            Field::optional_date("a"),
        ];
        let tags: Vec<_> = fields.iter().map(Field::ty).collect();
        assert_eq!(tags, FieldType::ALL);
        assert!(fields.iter().all(|field| field.name() == "a"));
    }

    #[test]
    fn range_support_by_type() {
        assert!(FieldType::Int.supports_range());
        assert!(FieldType::OptionalFloat32.supports_range());
        assert!(FieldType::Date.supports_range());
        assert!(!FieldType::String.supports_range());
        assert!(!FieldType::OptionalBool.supports_range());
    }

    #[test]
    fn parse_per_type() {
        let dates = PatternFormatter::default();

        assert_eq!(
            FieldType::String.parse(" a b ", &dates),
            Some(FieldValue::String(" a b ".to_string()))
        );
        assert_eq!(FieldType::Int.parse("-42", &dates), Some(FieldValue::Int(-42)));
        assert_eq!(FieldType::Int.parse("4.2", &dates), None);
        assert_eq!(FieldType::Int.parse(" 4", &dates), None);
        assert_eq!(
            FieldType::OptionalFloat64.parse("4.5", &dates),
            Some(FieldValue::Float64(4.5))
        );
        assert_eq!(
            FieldType::Float32.parse("1e2", &dates),
            Some(FieldValue::Float32(100.0))
        );
        assert_eq!(FieldType::Bool.parse("true", &dates), Some(FieldValue::Bool(true)));
        assert_eq!(FieldType::Bool.parse("yes", &dates), None);
        assert_eq!(FieldType::Bool.parse("TRUE", &dates), None);
        assert!(matches!(
            FieldType::Date.parse("2020-01-02", &dates),
            Some(FieldValue::Date(_))
        ));
        assert_eq!(FieldType::OptionalDate.parse("02.01.2020", &dates), None);
    }

    #[test]
    fn resolve_guards_bounds() {
        let fields = Fields::new([Field::int("id"), Field::string("name")]);

        assert_eq!(fields.resolve(0).map(Field::name), Some("id"));
        assert_eq!(fields.resolve(1).map(Field::name), Some("name"));
        assert_eq!(fields.resolve(2), None);
        assert_eq!(fields.resolve(-1), None);
        assert_eq!(fields.resolve(i64::MAX), None);
        assert_eq!(Fields::default().resolve(0), None);
    }

    #[test]
    fn render_cells() {
        let dates = PatternFormatter::new("%d/%m/%Y");
        let p = person();

        assert_eq!(Field::int("id").render(&p, &dates), "1");
        assert_eq!(Field::string("name").render(&p, &dates), "Ann");
        assert_eq!(Field::float64("score").render(&p, &dates), "2.0");
        assert_eq!(Field::date("joined").render(&p, &dates), "01/06/2023");
        assert_eq!(Field::optional_string("nickname").render(&p, &dates), "");
    }

    #[test]
    #[should_panic(expected = "required field `nickname`")]
    fn render_required_absent_panics() {
        let dates = PatternFormatter::default();
        Field::string("nickname").render(&person(), &dates);
    }
}
