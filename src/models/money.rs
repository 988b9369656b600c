use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Currency;

/// Integer minor-unit amount tagged with a currency.
///
/// Arithmetic is checked, not saturating: overflow is a precondition
/// violation the caller is expected to have ruled out (spec note: amounts
/// stay well inside `i64` for any realistic wallet balance), so it panics
/// rather than silently clamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn add(a: Money, b: Money) -> Result<Money> {
        if a.currency.code != b.currency.code {
            return Err(AppError::CurrencyMismatch);
        }
        Ok(Money::new(
            a.amount
                .checked_add(b.amount)
                .expect("money addition overflowed i64"),
            a.currency,
        ))
    }

    pub fn subtract(a: Money, b: Money) -> Result<Money> {
        if a.currency.code != b.currency.code {
            return Err(AppError::CurrencyMismatch);
        }
        Ok(Money::new(
            a.amount
                .checked_sub(b.amount)
                .expect("money subtraction overflowed i64"),
            a.currency,
        ))
    }

    pub fn compare(a: Money, b: Money) -> Result<std::cmp::Ordering> {
        if a.currency.code != b.currency.code {
            return Err(AppError::CurrencyMismatch);
        }
        Ok(a.amount.cmp(&b.amount))
    }

    pub fn multiply(m: Money, n: i64) -> Money {
        Money::new(
            m.amount.checked_mul(n).expect("money multiply overflowed i64"),
            m.currency,
        )
    }

    /// Presentation-only conversion to major units. Never used in equality
    /// checks or persisted.
    pub fn as_major(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.currency.fraction as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency::new("USD".to_string(), 2)
    }

    fn inr() -> Currency {
        Currency::new("INR".to_string(), 2)
    }

    #[test]
    fn add_same_currency() {
        let a = Money::new(500, usd());
        let b = Money::new(250, usd());
        let sum = Money::add(a, b).unwrap();
        assert_eq!(sum.amount, 750);
    }

    #[test]
    fn add_mismatched_currency_errors() {
        let a = Money::new(500, usd());
        let b = Money::new(250, inr());
        assert!(matches!(Money::add(a, b), Err(AppError::CurrencyMismatch)));
    }

    #[test]
    fn as_major_divides_by_fraction() {
        let m = Money::new(1050, usd());
        assert!((m.as_major() - 10.50).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "overflowed")]
    fn add_overflow_panics() {
        let a = Money::new(i64::MAX, usd());
        let b = Money::new(1, usd());
        let _ = Money::add(a, b);
    }
}
