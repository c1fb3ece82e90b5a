//! Storage layer for nextcheck
//!
//! The calculator reads its inputs through two narrow traits, [`IncomeStore`]
//! and [`ExpenseStore`]. [`Storage`] implements both on top of JSON files with
//! atomic writes; [`crate::api::ApiClient`] implements them against the remote
//! income/expense service.

pub mod expenses;
pub mod file_io;
pub mod income;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use income::IncomeRepository;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::paths::NextCheckPaths;
use crate::error::{NextCheckError, NextCheckResult};
use crate::models::{Expense, IncomeId, IncomeRecord};

/// Source of the income record and sink for pay date advances
#[async_trait]
pub trait IncomeStore: Send + Sync {
    /// Fetch the tracked income record
    async fn get_income(&self) -> NextCheckResult<IncomeRecord>;

    /// Replace the most recent pay date, returning the updated record
    async fn update_recent_pay(
        &self,
        id: IncomeId,
        new_date: NaiveDate,
    ) -> NextCheckResult<IncomeRecord>;
}

/// Source of the recurring expense list
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// All expenses, in the order they should be listed
    async fn list_expenses(&self) -> NextCheckResult<Vec<Expense>>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: NextCheckPaths,
    pub income: IncomeRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: NextCheckPaths) -> Result<Self, NextCheckError> {
        paths.ensure_directories()?;

        Ok(Self {
            income: IncomeRepository::new(paths.income_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &NextCheckPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), NextCheckError> {
        self.income.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), NextCheckError> {
        self.income.save()?;
        self.expenses.save()?;
        Ok(())
    }
}

#[async_trait]
impl IncomeStore for Storage {
    async fn get_income(&self) -> NextCheckResult<IncomeRecord> {
        self.income
            .get()?
            .ok_or_else(|| NextCheckError::income_not_found("local income record"))
    }

    async fn update_recent_pay(
        &self,
        id: IncomeId,
        new_date: NaiveDate,
    ) -> NextCheckResult<IncomeRecord> {
        let updated = self.income.advance_recent_pay(id, new_date)?;
        if let Err(e) = self.income.save() {
            // Keep memory consistent with what is on disk
            self.income.load()?;
            return Err(e);
        }
        Ok(updated)
    }
}

#[async_trait]
impl ExpenseStore for Storage {
    async fn list_expenses(&self) -> NextCheckResult<Vec<Expense>> {
        self.expenses.get_all()
    }
}
