use chrono::{Datelike, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use crate::server::util::time::{parse_permissive, DATE_TIME_OUTPUT_FORMAT};

/// Column holding the order timestamp used by every date filter.
pub(crate) const ORDER_DATE_FIELD: &str = "OrderDate";

/// One cell of a source row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(#[serde(serialize_with = "serialize_date_time")] NaiveDateTime),
}

fn serialize_date_time<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATE_TIME_OUTPUT_FORMAT))
}

impl FieldValue {
    /// Coerce to a date-time; anything unparsable is `None` and never matches a date filter.
    fn coerce_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::String(s) => parse_permissive(s).ok().map(|parsed| parsed.value),
            _ => None,
        }
    }
}

/// One order row, serialized as a JSON object in column order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderRecord {
    fields: Vec<(String, FieldValue)>,
    order_date: Option<NaiveDateTime>,
}

impl OrderRecord {
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        let order_date = fields
            .iter()
            .find(|(name, _)| name == ORDER_DATE_FIELD)
            .and_then(|(_, value)| value.coerce_date_time());
        Self { fields, order_date }
    }

    pub fn order_date(&self) -> Option<NaiveDateTime> {
        self.order_date
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Whether the order falls in the given calendar month.
    pub fn placed_in(&self, month: u32, year: i32) -> bool {
        self.order_date
            .is_some_and(|dt| dt.month() == month && dt.year() == year)
    }
}

impl Serialize for OrderRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn record(order_date: FieldValue) -> OrderRecord {
        OrderRecord::new(vec![
            ("OrderID".to_string(), FieldValue::Int(7)),
            (ORDER_DATE_FIELD.to_string(), order_date),
            ("Customer".to_string(), FieldValue::String("Acme".to_string())),
        ])
    }

    #[test]
    fn order_date_is_coerced_from_text() {
        let r = record(FieldValue::String("2024-03-05".to_string()));
        assert_eq!(r.order_date().map(|d| d.date()), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert!(r.placed_in(3, 2024));
        assert!(!r.placed_in(3, 2023));
    }

    #[test]
    fn unparsable_order_date_is_none() {
        assert_eq!(record(FieldValue::String("soon".to_string())).order_date(), None);
        assert_eq!(record(FieldValue::Float(45000.5)).order_date(), None);
        assert_eq!(record(FieldValue::Null).order_date(), None);
        assert_eq!(OrderRecord::new(vec![]).order_date(), None);
        assert!(!record(FieldValue::Null).placed_in(1, 2024));
    }

    #[test]
    fn serializes_fields_in_column_order() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 15, 0).unwrap();
        let r = record(FieldValue::DateTime(dt));
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"OrderID":7,"OrderDate":"2024-03-05T09:15:00","Customer":"Acme"}"#
        );
    }

    #[test]
    fn text_dates_are_passed_through_verbatim() {
        let r = record(FieldValue::String("03/05/2024".to_string()));
        assert_eq!(r.get(ORDER_DATE_FIELD), Some(&FieldValue::String("03/05/2024".to_string())));
        assert_eq!(serde_json::to_value(&r).unwrap()["OrderDate"], "03/05/2024");
    }
}
