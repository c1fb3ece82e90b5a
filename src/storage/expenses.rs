//! Expense repository
//!
//! Keeps expenses in insertion order in `expenses.json`; that order is the
//! order the due list is shown in.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::NextCheckError;
use crate::models::{DueDay, Expense, ExpenseId, Money};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Repository for recurring expenses
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), NextCheckError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *expenses = file_data.expenses;

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), NextCheckError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = ExpenseData {
            expenses: expenses.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, NextCheckError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(expenses.clone())
    }

    /// Add a new expense, allocating the next free ID
    pub fn add(
        &self,
        name: impl Into<String>,
        amount: Money,
        due_day: DueDay,
    ) -> Result<Expense, NextCheckError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = expenses
            .iter()
            .map(|e| e.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(ExpenseId::new(1));

        let expense = Expense::new(id, name, amount, due_day);
        expense
            .validate()
            .map_err(|e| NextCheckError::Validation(e.to_string()))?;

        expenses.push(expense.clone());
        Ok(expense)
    }

    /// Remove an expense by ID
    pub fn remove(&self, id: ExpenseId) -> Result<Expense, NextCheckError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| NextCheckError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| NextCheckError::expense_not_found(id.to_string()))?;

        Ok(expenses.remove(index))
    }
}
