//! Renewal payload: the four negotiable fields of a policy
//!
//! Terms arrive from outside the engine (a prompt, a config file, a batch
//! strategy) so they are validated before they can touch a product line.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Longest cover a single policy can buy (50 years)
pub const MAX_DURATION_MONTHS: u32 = 600;

/// Ceiling on premium and max payout; keeps monthly income and claims finite
pub const MAX_AMOUNT: f64 = 1e12;

/// Premium, duration, maximum payout and franchise of a policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyTerms {
    pub premium: f64,
    pub duration: u32,
    pub max_payout: f64,
    pub franchise: f64,
}

impl PolicyTerms {
    /// Build validated terms
    pub fn new(premium: f64, duration: u32, max_payout: f64, franchise: f64) -> Result<Self> {
        let terms = Self {
            premium,
            duration,
            max_payout,
            franchise,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Parse `premium duration max_payout franchise`, separated by
    /// whitespace and/or commas
    pub fn parse(input: &str) -> Result<Self> {
        let fields: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        if fields.len() != 4 {
            return Err(GameError::InvalidRenewalInput(format!(
                "expected 4 values (premium duration max_payout franchise), got {}",
                fields.len()
            )));
        }

        let premium = parse_amount("premium", fields[0])?;
        let duration = fields[1].parse::<u32>().map_err(|_| {
            GameError::InvalidRenewalInput(format!(
                "duration must be a whole number of months, got '{}'",
                fields[1]
            ))
        })?;
        let max_payout = parse_amount("max payout", fields[2])?;
        let franchise = parse_amount("franchise", fields[3])?;

        Self::new(premium, duration, max_payout, franchise)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.premium.is_finite() || self.premium <= 0.0 {
            return Err(invalid(format!("premium must be positive, got {}", self.premium)));
        }
        if self.premium > MAX_AMOUNT {
            return Err(invalid(format!("premium {} exceeds {}", self.premium, MAX_AMOUNT)));
        }
        if self.duration == 0 {
            return Err(invalid("duration must be at least one month".to_string()));
        }
        if self.duration > MAX_DURATION_MONTHS {
            return Err(invalid(format!(
                "duration {} exceeds {} months",
                self.duration, MAX_DURATION_MONTHS
            )));
        }
        if !self.max_payout.is_finite() || self.max_payout <= 0.0 {
            return Err(invalid(format!("max payout must be positive, got {}", self.max_payout)));
        }
        if self.max_payout > MAX_AMOUNT {
            return Err(invalid(format!("max payout {} exceeds {}", self.max_payout, MAX_AMOUNT)));
        }
        if !self.franchise.is_finite() || self.franchise < 0.0 {
            return Err(invalid(format!("franchise cannot be negative, got {}", self.franchise)));
        }
        if self.franchise >= self.max_payout {
            return Err(invalid(format!(
                "franchise {} must be below max payout {}",
                self.franchise, self.max_payout
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidRenewalInput(msg)
}

fn parse_amount(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| invalid(format!("{} must be a number, got '{}'", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whitespace_and_commas() {
        let expected = PolicyTerms {
            premium: 20.0,
            duration: 6,
            max_payout: 20000.0,
            franchise: 1500.0,
        };
        assert_eq!(PolicyTerms::parse("20 6 20000 1500").unwrap(), expected);
        assert_eq!(PolicyTerms::parse("20.0, 6, 20000, 1500").unwrap(), expected);
        assert_eq!(PolicyTerms::parse("  20\t6,20000 1500\n").unwrap(), expected);
    }

    #[test]
    fn test_parse_wrong_count() {
        let err = PolicyTerms::parse("20 6 20000").unwrap_err();
        assert!(matches!(err, GameError::InvalidRenewalInput(_)));
        assert!(PolicyTerms::parse("").is_err());
        assert!(PolicyTerms::parse("1 2 3 4 5").is_err());
    }

    #[test]
    fn test_parse_bad_numbers() {
        assert!(PolicyTerms::parse("abc 6 20000 1500").is_err());
        assert!(PolicyTerms::parse("20 6.5 20000 1500").is_err());
        assert!(PolicyTerms::parse("20 -6 20000 1500").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(PolicyTerms::new(20.0, 6, 20000.0, 1500.0).is_ok());
        assert!(PolicyTerms::new(20.0, 6, 20000.0, 0.0).is_ok());
        assert!(PolicyTerms::new(0.0, 6, 20000.0, 1500.0).is_err());
        assert!(PolicyTerms::new(20.0, 0, 20000.0, 1500.0).is_err());
        assert!(PolicyTerms::new(20.0, 6, -1.0, 0.0).is_err());
        assert!(PolicyTerms::new(20.0, 6, 20000.0, -5.0).is_err());
        assert!(PolicyTerms::new(20.0, 6, 1000.0, 1000.0).is_err());
        assert!(PolicyTerms::new(f64::NAN, 6, 1000.0, 0.0).is_err());
        assert!(PolicyTerms::parse("inf 6 1000 0").is_err());
    }

    #[test]
    fn test_rejects_oversized_terms() {
        let err = PolicyTerms::parse("20 4294967295 20000 1500").unwrap_err();
        assert!(matches!(err, GameError::InvalidRenewalInput(_)));
        assert!(PolicyTerms::new(20.0, MAX_DURATION_MONTHS, 20000.0, 1500.0).is_ok());
        assert!(PolicyTerms::new(20.0, MAX_DURATION_MONTHS + 1, 20000.0, 1500.0).is_err());

        // Finite on their own, but the sale price would overflow to infinity
        let err = PolicyTerms::parse("1e308 12 1e308 0").unwrap_err();
        assert!(matches!(err, GameError::InvalidRenewalInput(_)));
        assert!(PolicyTerms::new(MAX_AMOUNT, 12, MAX_AMOUNT, 0.0).is_ok());
        assert!(PolicyTerms::new(MAX_AMOUNT * 2.0, 12, 1000.0, 0.0).is_err());
        assert!(PolicyTerms::new(20.0, 12, MAX_AMOUNT * 2.0, 0.0).is_err());
    }
}
