//! Property values and their comparable projection.

use chrono::{DateTime, Utc};
use std::fmt;

/// A typed property value read from an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value.
    Null,
    /// Checkbox-style property.
    Bool(bool),
    /// Numeric property.
    Number(f64),
    /// Free text.
    Text(String),
    /// Date or datetime property.
    Date(DateTime<Utc>),
    /// Multi-value property (tags, aliases, links).
    List(Vec<Value>),
}

/// Comparable projection of a truthy [`Value`].
///
/// Dates collapse to epoch milliseconds so they compare numerically against each other.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Compared numerically against other numbers. Ranks before any text key.
    Number(f64),
    /// Compared with natural, case-insensitive collation.
    Text(String),
}

impl Value {
    /// Whether the value counts as present for sorting purposes.
    ///
    /// Null, `false`, zero, NaN, blank text and empty lists are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.trim().is_empty(),
            Value::Date(_) => true,
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Reduce to a comparable key, or `None` when the value sorts as null.
    pub fn sort_key(&self) -> Option<SortKey> {
        if !self.is_truthy() {
            return None;
        }
        match self {
            Value::Number(n) => Some(SortKey::Number(*n)),
            Value::Date(d) => Some(SortKey::Number(d.timestamp_millis() as f64)),
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    None
                } else {
                    Some(SortKey::Text(text))
                }
            }
        }
    }
}

/// Integral numbers render without a fractional part (`3`, not `3.0`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn falsy_values_have_no_sort_key() {
        assert_eq!(Value::Null.sort_key(), None);
        assert_eq!(Value::Bool(false).sort_key(), None);
        assert_eq!(Value::Number(0.0).sort_key(), None);
        assert_eq!(Value::Number(f64::NAN).sort_key(), None);
        assert_eq!(Value::Text("   ".into()).sort_key(), None);
        assert_eq!(Value::List(vec![]).sort_key(), None);
    }

    #[test]
    fn numbers_keep_numeric_key() {
        assert_eq!(Value::Number(4.5).sort_key(), Some(SortKey::Number(4.5)));
    }

    #[test]
    fn dates_become_epoch_millis() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(
            Value::Date(date).sort_key(),
            Some(SortKey::Number(date.timestamp_millis() as f64))
        );
    }

    #[test]
    fn booleans_and_lists_become_text() {
        assert_eq!(
            Value::Bool(true).sort_key(),
            Some(SortKey::Text("true".into()))
        );
        let tags = Value::List(vec!["a".into(), Value::Number(2.0)]);
        assert_eq!(tags.sort_key(), Some(SortKey::Text("a, 2".into())));
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(1.25).to_string(), "1.25");
    }
}
