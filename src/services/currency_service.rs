use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Currency;
use crate::repositories::CurrencyRepository;

/// Thin wrapper over the currency catalogue lookup.
#[derive(Clone)]
pub struct CurrencyService {
    currencies: CurrencyRepository,
}

impl CurrencyService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            currencies: CurrencyRepository::new(pool),
        }
    }

    pub async fn create(&self, code: &str, fraction: i16) -> Result<Currency> {
        if !Currency::is_valid_fraction(fraction) {
            return Err(AppError::Validation(
                "fraction must be between 1 and 3".to_string(),
            ));
        }

        self.currencies.create(code, fraction).await
    }

    pub async fn get(&self, code: &str) -> Result<Currency> {
        self.currencies
            .get(code)
            .await?
            .ok_or_else(|| AppError::CurrencyNotFound(code.to_string()))
    }
}
