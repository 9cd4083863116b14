mod common;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{field, required};
use schema_cast::{CastError, FieldType, Value};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    date(y, mo, d).and_time(time(h, mi))
}

#[test]
fn date_reads_iso_by_default() {
    let field = required(FieldType::Date);
    assert_eq!(field.cast("2019-01-01").unwrap(), Some(Value::Date(date(2019, 1, 1))));
}

#[test]
fn date_default_rejects_other_layouts() {
    let field = required(FieldType::Date);
    for raw in ["01-01-2019", "2019/01/01", "Jan 1 2019"] {
        assert!(
            matches!(field.cast(raw).unwrap_err(), CastError::InvalidDate { .. }),
            "{raw}"
        );
    }
}

#[test]
fn date_any_reads_loose_text() {
    let field = field(FieldType::Date, "any", true);
    assert_eq!(field.cast("10th Jan 1969").unwrap(), Some(Value::Date(date(1969, 1, 10))));
    assert_eq!(field.cast("March 3, 2020").unwrap(), Some(Value::Date(date(2020, 3, 3))));
    assert_eq!(field.cast("2014-06-10").unwrap(), Some(Value::Date(date(2014, 6, 10))));
}

#[test]
fn date_any_rejects_unresolvable_text() {
    let field = field(FieldType::Date, "any", true);
    assert!(matches!(
        field.cast("10th Jan nineteen sixty nine").unwrap_err(),
        CastError::InvalidDate { .. }
    ));
    assert!(field.cast("9 am").is_err());
}

#[test]
fn date_pattern_is_applied_literally() {
    let field = field(FieldType::Date, "fmt:%d/%m/%Y", true);
    assert_eq!(field.cast("10/06/2014").unwrap(), Some(Value::Date(date(2014, 6, 10))));

    let partial = common::field(FieldType::Date, "fmt:%Y-%m", true);
    assert_eq!(partial.cast("2014-06").unwrap(), Some(Value::Date(date(2014, 6, 1))));
}

#[test]
fn date_pattern_mismatches_fail() {
    let field = field(FieldType::Date, "fmt:%m/%d/%y", true);
    assert!(matches!(
        field.cast("2014/12/19").unwrap_err(),
        CastError::InvalidDate { .. }
    ));
    let literal = common::field(FieldType::Date, "fmt:DD/MM/YYYY", true);
    assert!(matches!(
        literal.cast("2014/12/19").unwrap_err(),
        CastError::InvalidDate { .. }
    ));
}

#[test]
fn date_passes_native_dates_for_every_format() {
    let value = date(2015, 1, 1);
    for format in ["default", "any", "fmt:%Y-%m-%d"] {
        let field = field(FieldType::Date, format, true);
        assert_eq!(field.cast(value).unwrap(), Some(Value::Date(value)), "{format}");
    }
}

#[test]
fn time_reads_iso_by_default() {
    let field = required(FieldType::Time);
    assert_eq!(field.cast("06:00:00").unwrap(), Some(Value::Time(time(6, 0))));
    assert!(matches!(
        field.cast("3 am").unwrap_err(),
        CastError::InvalidTime { .. }
    ));
}

#[test]
fn time_any_and_pattern() {
    let loose = field(FieldType::Time, "any", true);
    assert_eq!(loose.cast("3:00 am").unwrap(), Some(Value::Time(time(3, 0))));
    assert_eq!(loose.cast("4:30pm").unwrap(), Some(Value::Time(time(16, 30))));

    let pattern = field(FieldType::Time, "fmt:%H:%M", true);
    assert_eq!(pattern.cast("3:00").unwrap(), Some(Value::Time(time(3, 0))));
}

#[test]
fn time_rejects_non_text_input() {
    let field = field(FieldType::Time, "fmt:any", true);
    assert!(matches!(field.cast(3.0).unwrap_err(), CastError::InvalidTime { .. }));
    let empty_object = Value::Object(serde_json::Map::new());
    assert!(matches!(
        field.cast(empty_object).unwrap_err(),
        CastError::InvalidTime { .. }
    ));
    assert!(matches!(
        field.cast(Value::Array(Vec::new())).unwrap_err(),
        CastError::InvalidTime { .. }
    ));
}

#[test]
fn time_passes_native_times_for_every_format() {
    let value = time(12, 0);
    for format in ["default", "any", "fmt:any"] {
        let field = field(FieldType::Time, format, true);
        assert_eq!(field.cast(value).unwrap(), Some(Value::Time(value)), "{format}");
    }
}

#[test]
fn datetime_reads_iso_with_zone() {
    let field = required(FieldType::DateTime);
    assert_eq!(
        field.cast("2014-01-01T06:00:00Z").unwrap(),
        Some(Value::DateTime(datetime(2014, 1, 1, 6, 0)))
    );
    assert_eq!(
        field.cast("2014-01-01T07:00:00+01:00").unwrap(),
        Some(Value::DateTime(datetime(2014, 1, 1, 6, 0)))
    );
}

#[test]
fn datetime_default_rejects_prose() {
    let field = required(FieldType::DateTime);
    assert!(matches!(
        field.cast("Mon 1st Jan 2014 9 am").unwrap_err(),
        CastError::InvalidDateTime { .. }
    ));
}

#[test]
fn datetime_any_guesses_prose() {
    let field = field(FieldType::DateTime, "any", true);
    assert_eq!(
        field.cast("10th Jan 1969 9 am").unwrap(),
        Some(Value::DateTime(datetime(1969, 1, 10, 9, 0)))
    );
    assert_eq!(
        field.cast("Mon 1st Jan 2014 9 am").unwrap(),
        Some(Value::DateTime(datetime(2014, 1, 1, 9, 0)))
    );
    assert_eq!(
        field.cast("10th Jan 1969").unwrap(),
        Some(Value::DateTime(datetime(1969, 1, 10, 0, 0)))
    );
    assert!(matches!(
        field.cast("the land before time").unwrap_err(),
        CastError::InvalidDateTime { .. }
    ));
}

#[test]
fn datetime_pattern() {
    let field = field(FieldType::DateTime, "fmt:%d/%m/%y %H:%M", true);
    assert_eq!(
        field.cast("21/11/06 16:30").unwrap(),
        Some(Value::DateTime(datetime(2006, 11, 21, 16, 30)))
    );
    let invalid = common::field(FieldType::DateTime, "fmt:notavalidformat", true);
    assert!(matches!(
        invalid.cast("21/11/06 16:30").unwrap_err(),
        CastError::InvalidDateTime { .. }
    ));
}

#[test]
fn datetime_passes_native_values_for_every_format() {
    let value = datetime(2015, 1, 1, 12, 0);
    for format in ["default", "any", "fmt:any"] {
        let field = field(FieldType::DateTime, format, true);
        assert_eq!(field.cast(value).unwrap(), Some(Value::DateTime(value)), "{format}");
    }
}

#[test]
fn datetime_rejects_non_ascii_digits() {
    for format in ["default", "any"] {
        let field = field(FieldType::DateTime, format, true);
        let err = field.cast("2014-01-01T06:00:0\u{0660}").unwrap_err();
        assert!(
            matches!(err, CastError::InvalidDateTime { .. }),
            "{format} gave {err:?}"
        );
    }
    let field = required(FieldType::Date);
    assert!(matches!(
        field.cast("2014-01-0\u{0661}").unwrap_err(),
        CastError::InvalidDate { .. }
    ));
}
