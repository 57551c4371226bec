//! Entity records as exchanged with the record store, plus create/update DTOs.
//!
//! Records are read leniently: optional text and counters may be absent or
//! null. Update DTOs skip unset fields so they serialize as partial updates.

pub mod billing;
pub mod client;
pub mod post;
pub mod report;
pub mod user;

/// Serde helpers for loosely typed numeric fields.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl Number {
        fn as_f64(&self) -> Option<f64> {
            match self {
                Number::Int(v) => Some(*v as f64),
                Number::Float(v) => Some(*v),
                Number::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    /// Accept an integer, a float, a numeric string or null.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Number>::deserialize(deserializer)?;
        Ok(value.and_then(|n| match n {
            Number::Int(v) => Some(v),
            other => other.as_f64().map(|f| f.round() as i64),
        }))
    }

    /// Accept a float, an integer, a numeric string or null.
    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Number>::deserialize(deserializer)?;
        Ok(value.and_then(|n| n.as_f64()))
    }
}

/// Reject blank strings in `validator` custom checks.
pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}
