//! HTTP client for the income/expense service
//!
//! Endpoints:
//! - `GET  {base}/income/{id}`   -> income record
//! - `PUT  {base}/income/{id}`   body `{"recent_pay": "YYYY-MM-DD"}`, 200 on success
//! - `GET  {base}/expenses`      -> expense list

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{NextCheckError, NextCheckResult};
use crate::models::{Expense, IncomeId, IncomeRecord, RecentPayUpdate};
use crate::storage::{ExpenseStore, IncomeStore};

/// Client for the remote service, bound to one income record
pub struct ApiClient {
    base_url: String,
    income_id: IncomeId,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client with a request timeout
    pub fn new(
        base_url: impl Into<String>,
        income_id: IncomeId,
        timeout: Duration,
    ) -> NextCheckResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(NextCheckError::Config("API base URL is empty".into()));
        }

        // One client for all requests (connection pooling)
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NextCheckError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            income_id,
            http,
        })
    }

    pub fn income_id(&self) -> IncomeId {
        self.income_id
    }

    fn income_url(&self, id: IncomeId) -> String {
        format!("{}/income/{}", self.base_url, id)
    }

    fn expenses_url(&self) -> String {
        format!("{}/expenses", self.base_url)
    }
}

#[async_trait]
impl IncomeStore for ApiClient {
    async fn get_income(&self) -> NextCheckResult<IncomeRecord> {
        let url = self.income_url(self.income_id);
        let resp = self.http.get(&url).send().await?;

        match resp.status() {
            StatusCode::OK => Ok(resp.json().await?),
            StatusCode::NOT_FOUND => Err(NextCheckError::income_not_found(
                self.income_id.to_string(),
            )),
            status => Err(NextCheckError::Http(format!("GET {} returned {}", url, status))),
        }
    }

    async fn update_recent_pay(
        &self,
        id: IncomeId,
        new_date: NaiveDate,
    ) -> NextCheckResult<IncomeRecord> {
        let url = self.income_url(id);
        let body = RecentPayUpdate {
            recent_pay: new_date,
        };

        let resp = self
            .http
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NextCheckError::UpdateFailed {
                status: None,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let text = resp.text().await.unwrap_or_default();
            warn!(income_id = %id, status = status.as_u16(), "income_update_rejected");
            return Err(NextCheckError::UpdateFailed {
                status: Some(status.as_u16()),
                message: if text.is_empty() {
                    "Failed to update income data".to_string()
                } else {
                    text
                },
            });
        }

        let record: IncomeRecord = resp.json().await.map_err(|e| NextCheckError::UpdateFailed {
            status: Some(status.as_u16()),
            message: format!("invalid response body: {}", e),
        })?;

        debug!(income_id = %id, recent_pay = %new_date, "income_update_accepted");
        Ok(record)
    }
}

#[async_trait]
impl ExpenseStore for ApiClient {
    async fn list_expenses(&self) -> NextCheckResult<Vec<Expense>> {
        let url = self.expenses_url();
        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(NextCheckError::Http(format!(
                "GET {} returned {}",
                url,
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }
}
