//! Income repository
//!
//! Holds the single tracked income record in `income.json`.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::NextCheckError;
use crate::models::{IncomeId, IncomeRecord, Money};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    income: Option<IncomeRecord>,
}

/// Repository for the income record
pub struct IncomeRepository {
    path: PathBuf,
    income: RwLock<Option<IncomeRecord>>,
}

impl IncomeRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            income: RwLock::new(None),
        }
    }

    /// Load the record from disk
    pub fn load(&self) -> Result<(), NextCheckError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut income = self
            .income
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *income = file_data.income;

        Ok(())
    }

    /// Save the record to disk
    pub fn save(&self) -> Result<(), NextCheckError> {
        let income = self
            .income
            .read()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = IncomeData {
            income: income.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get the income record, if one has been set up
    pub fn get(&self) -> Result<Option<IncomeRecord>, NextCheckError> {
        let income = self
            .income
            .read()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(income.clone())
    }

    /// Apply a change to the income record, creating it on first use
    fn modify<F>(&self, f: F) -> Result<IncomeRecord, NextCheckError>
    where
        F: FnOnce(&mut IncomeRecord),
    {
        let mut income = self
            .income
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let record =
            income.get_or_insert_with(|| IncomeRecord::new(IncomeId::new(1), Money::zero(), None));
        f(record);
        Ok(record.clone())
    }

    /// Overwrite the most recent pay date without touching `last_pay`
    pub fn set_recent_pay(&self, date: NaiveDate) -> Result<IncomeRecord, NextCheckError> {
        self.modify(|record| {
            record.recent_pay = Some(date.format(crate::models::DATE_FORMAT).to_string());
        })
    }

    /// Set the paycheck amount
    pub fn set_amount(&self, amount: Money) -> Result<IncomeRecord, NextCheckError> {
        self.modify(|record| record.amount = amount)
    }

    /// Advance the most recent pay date of the record with the given ID
    pub fn advance_recent_pay(
        &self,
        id: IncomeId,
        new_date: NaiveDate,
    ) -> Result<IncomeRecord, NextCheckError> {
        let mut income = self
            .income
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let record = income
            .as_mut()
            .filter(|r| r.id == id)
            .ok_or_else(|| NextCheckError::income_not_found(id.to_string()))?;

        record.advance_recent_pay(new_date);
        debug!(income_id = %id, recent_pay = %new_date, "income_recent_pay_advanced");
        Ok(record.clone())
    }
}
