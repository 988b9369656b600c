use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A currency lookup entry: `code -> fraction digits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Currency {
    pub code: String,
    pub fraction: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Currency {
    /// Builds a transient `Currency` value (not yet persisted) from a code
    /// and fraction. Used by `Money` and by the catalogue service before
    /// insertion.
    pub fn new(code: String, fraction: i16) -> Self {
        let now = Utc::now();
        Self {
            code: code.to_uppercase(),
            fraction,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_valid_fraction(fraction: i16) -> bool {
        (1..=3).contains(&fraction)
    }
}
