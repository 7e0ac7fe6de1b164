//! The admin-configured field set, passed explicitly to every component that
//! reads or writes daily-log metrics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::types::{DailyLog, FieldDefinition};

/// Ordered snapshot of the field definitions (creation order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Coerce submitted values into one number per current field.
    ///
    /// Missing, null, non-numeric and non-finite values become `0`. Keys that
    /// are not part of the schema are dropped.
    pub fn coerce(&self, values: &Map<String, Value>) -> BTreeMap<String, f64> {
        self.names()
            .map(|name| (name.to_owned(), coerce_value(values.get(name))))
            .collect()
    }

    /// Latest-value row: a cell per field, `N/A` when there is no log or the
    /// log lacks the field.
    pub fn latest_cells(&self, log: Option<&DailyLog>) -> Vec<MetricCell> {
        self.names()
            .map(|name| {
                log.and_then(|l| l.metrics.get(name))
                    .map_or(MetricCell::NotAvailable, |v| MetricCell::Value(*v))
            })
            .collect()
    }

    /// Chart point for one log: every field present, absent ones as `0`.
    pub fn weekly_point(&self, log: &DailyLog) -> WeeklyPoint {
        let values = self
            .names()
            .map(|name| {
                (
                    name.to_owned(),
                    log.metrics.get(name).copied().unwrap_or(0.0),
                )
            })
            .collect();
        WeeklyPoint {
            date: log.date,
            day: log.date.format("%a").to_string(),
            values,
        }
    }
}

/// Form-number coercion of a single submitted value.
pub fn coerce_value(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// A latest-value table cell: a number, or `"N/A"` when never reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricCell {
    Value(f64),
    NotAvailable,
}

impl MetricCell {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotAvailable => None,
        }
    }
}

impl Serialize for MetricCell {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => s.serialize_f64(*v),
            Self::NotAvailable => s.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPoint {
    pub date: NaiveDate,
    /// Abbreviated weekday, e.g. `Mon`.
    pub day: String,
    pub values: BTreeMap<String, f64>,
}
