use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// A single dated amount recorded under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: u64,
    pub date: String,
}

impl Transaction {
    pub fn new(amount: u64, date: impl Into<String>) -> Self {
        Self {
            amount,
            date: date.into(),
        }
    }

    /// Builds a transaction after checking the amount is positive and the
    /// date is not blank.
    pub fn validated(amount: u64, date: impl Into<String>) -> Result<Self> {
        let date = date.into();
        if amount == 0 {
            return Err(TrackerError::InvalidInput(
                "amount must be a positive integer".into(),
            ));
        }
        if date.trim().is_empty() {
            return Err(TrackerError::InvalidInput("date must not be empty".into()));
        }
        Ok(Self::new(amount, date.trim()))
    }
}
