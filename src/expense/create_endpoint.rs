//! Defines the endpoint for recording an expense ("pengeluaran").
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    balance::BalanceData,
    expense::core::record_expense,
    response::{ApiResponse, render},
    validation::{FieldError, join_field_errors, validate_amount, validate_date},
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection holding the balance and expense tables.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for recording an expense.
///
/// Both fields are optional so that absent or null values surface as
/// validation errors instead of being rejected by the JSON deserializer.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    /// The amount to subtract from the balance.
    pub jumlah: Option<i64>,
    /// The date the expense occurred, e.g. "2024-01-01".
    pub tanggal: Option<Date>,
}

/// A route handler for recording an expense and decreasing the balance,
/// returns the updated balance in the response envelope.
///
/// Expenses the balance cannot cover are rejected with the fixed message
/// "Tabungan tidak cukup" and leave the database unchanged.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Json(request): Json<ExpenseRequest>,
) -> Response {
    let (amount, date) = match validate_expense_request(&request) {
        Ok(validated) => validated,
        Err(field_errors) => {
            return Error::Validation(join_field_errors(&field_errors)).into_response();
        }
    };

    let mut connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLock.into_response();
        }
    };

    match record_expense(amount, date, &mut connection) {
        Ok(balance) => render(StatusCode::OK, ApiResponse::data(BalanceData::from(balance))),
        Err(error) => error.into_response(),
    }
}

/// Collect the validation failures for every field before reporting, so a
/// request missing both fields lists both messages.
fn validate_expense_request(request: &ExpenseRequest) -> Result<(i64, Date), Vec<FieldError>> {
    let mut errors = Vec::new();

    let amount = match validate_amount(request.jumlah) {
        Ok(amount) => Some(amount),
        Err(error) => {
            errors.push(error);
            None
        }
    };
    let date = match validate_date(request.tanggal) {
        Ok(date) => Some(date),
        Err(error) => {
            errors.push(error);
            None
        }
    };

    match (amount, date) {
        (Some(amount), Some(date)) => Ok((amount, date)),
        _ => Err(errors),
    }
}
