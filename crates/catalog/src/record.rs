use std::fmt;

/// A single named field value on a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(s) => s.to_lowercase().contains(needle),
            FieldValue::List(items) => items.iter().any(|s| s.to_lowercase().contains(needle)),
        }
    }

    /// Exact equality for text fields, membership for list fields.
    pub fn matches_value(&self, value: &str) -> bool {
        match self {
            FieldValue::Text(s) => *s == value,
            FieldValue::List(items) => items.iter().any(|s| s == value),
        }
    }

    /// Every distinct value this field contributes to a facet.
    pub fn values(&self) -> Vec<&'a str> {
        match self {
            FieldValue::Text(s) => vec![*s],
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// A flat row of reference data addressed by field name.
///
/// Returning `None` means the field is absent on this record. Fields a
/// table searches or filters on must be present on every record; that is
/// checked once by [`crate::Table::new`].
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
