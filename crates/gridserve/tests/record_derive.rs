//! Tests for `#[derive(Record)]`.

#![cfg(feature = "derive")]

use chrono::{NaiveDate, TimeZone, Utc};
use gridserve::{DataTable, Field, FieldType, PatternFormatter, Record, Value};

#[derive(Record)]
struct Account {
    #[column(Int, id)]
    number: u32,

    #[column(String)]
    owner: String,

    #[column(String, rename = "alias")]
    nickname: Option<String>,

    #[column(Float64)]
    balance: f64,

    #[column(Float32)]
    rate: Option<f32>,

    #[column(Bool)]
    active: bool,

    #[column(Date)]
    opened: NaiveDate,

    #[column(Date)]
    closed: Option<NaiveDate>,

    #[column(skip)]
    #[allow(dead_code)]
    pin: String,

    #[allow(dead_code)]
    notes: String,
}

fn account() -> Account {
    Account {
        number: 42,
        owner: "Ann".into(),
        nickname: None,
        balance: 10.5,
        rate: Some(0.25),
        active: true,
        opened: NaiveDate::from_ymd_opt(2021, 3, 9).unwrap(),
        closed: None,
        pin: "1234".into(),
        notes: String::new(),
    }
}

#[derive(Record)]
struct Plain {
    #[column(Int)]
    id: i64,
}

#[test]
fn test_constants() {
    assert_eq!(Account::NUMBER, "number");
    assert_eq!(Account::OWNER, "owner");
    assert_eq!(Account::ALIAS, "alias");
    assert_eq!(Account::OPENED, "opened");
}

#[test]
fn test_id_field() {
    assert_eq!(<Account as Record>::ID_FIELD, "number");
    assert_eq!(<Plain as Record>::ID_FIELD, "id");
}

#[test]
fn test_field_values() {
    let account = account();

    assert_eq!(account.field_value("number"), Value::Int(42));
    assert_eq!(account.field_value("owner"), Value::String("Ann"));
    assert_eq!(account.field_value("alias"), Value::None);
    assert_eq!(account.field_value("balance"), Value::Float64(10.5));
    assert_eq!(account.field_value("rate"), Value::Float32(0.25));
    assert_eq!(account.field_value("active"), Value::Bool(true));
    assert_eq!(
        account.field_value("opened"),
        Value::Date(Utc.with_ymd_and_hms(2021, 3, 9, 0, 0, 0).unwrap())
    );
    assert_eq!(account.field_value("closed"), Value::None);
}

#[test]
fn test_skipped_and_unannotated_fields_read_as_none() {
    let account = account();
    assert_eq!(account.field_value("pin"), Value::None);
    assert_eq!(account.field_value("notes"), Value::None);
    assert_eq!(account.field_value("nickname"), Value::None);
}

#[test]
fn test_present_optionals() {
    let mut account = account();
    account.nickname = Some("annie".into());
    account.closed = NaiveDate::from_ymd_opt(2024, 1, 2);

    assert_eq!(account.field_value("alias"), Value::String("annie"));
    assert!(account.field_value("closed").is_date());
}

#[test]
fn test_fields_registry() {
    let fields = Account::fields();
    let listed: Vec<(&str, FieldType)> = fields.iter().map(|f| (f.name(), f.ty())).collect();

    assert_eq!(
        listed,
        vec![
            ("number", FieldType::Int),
            ("owner", FieldType::String),
            ("alias", FieldType::OptionalString),
            ("balance", FieldType::Float64),
            ("rate", FieldType::OptionalFloat32),
            ("active", FieldType::Bool),
            ("opened", FieldType::Date),
            ("closed", FieldType::OptionalDate),
        ]
    );
    assert_eq!(fields.resolve(1), Some(&Field::string("owner")));
}

#[test]
fn test_renders_through_table() {
    let table = DataTable::<Account>::new(Account::fields())
        .with_date_formatter(PatternFormatter::new("%d/%m/%Y"));

    assert_eq!(
        table.render(&[account()]),
        vec![vec![
            "42",
            "Ann",
            "",
            "10.5",
            "0.25",
            "true",
            "09/03/2021",
            ""
        ]]
    );
}

#[derive(Record)]
struct Blob {
    #[column(Int)]
    size: u64,

    #[column(Int)]
    parts: Option<usize>,
}

#[test]
fn test_unsigned_ints_in_range() {
    let blob = Blob {
        size: i64::MAX as u64,
        parts: Some(3),
    };
    assert_eq!(blob.field_value(Blob::SIZE), Value::Int(i64::MAX));
    assert_eq!(blob.field_value(Blob::PARTS), Value::Int(3));
}

#[test]
#[should_panic(expected = "field `size` does not fit in i64")]
fn test_unsigned_int_overflow_panics() {
    let blob = Blob {
        size: u64::MAX,
        parts: None,
    };
    blob.field_value(Blob::SIZE);
}
