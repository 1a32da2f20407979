//! Defines the endpoint for recording an income ("pemasukan").
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    balance::BalanceData,
    income::core::record_income,
    response::{ApiResponse, render},
    validation::{join_field_errors, validate_amount},
};

/// The state needed to record an income.
#[derive(Debug, Clone)]
pub struct CreateIncomeState {
    /// The database connection holding the balance and income tables.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for recording an income.
///
/// `jumlah` is optional so that an absent or null field surfaces as a
/// validation error instead of being rejected by the JSON deserializer.
#[derive(Debug, Deserialize)]
pub struct IncomeRequest {
    /// The amount to add to the balance.
    pub jumlah: Option<i64>,
}

/// A route handler for recording an income and increasing the balance,
/// returns the updated balance in the response envelope.
pub async fn create_income_endpoint(
    State(state): State<CreateIncomeState>,
    Json(request): Json<IncomeRequest>,
) -> Response {
    let amount = match validate_amount(request.jumlah) {
        Ok(amount) => amount,
        Err(field_error) => {
            return Error::Validation(join_field_errors(&[field_error])).into_response();
        }
    };

    let mut connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLock.into_response();
        }
    };

    match record_income(amount, &mut connection) {
        Ok(balance) => render(StatusCode::OK, ApiResponse::data(BalanceData::from(balance))),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode, response::Response};
    use rusqlite::Connection;

    use crate::{
        balance::{BalanceData, get_balance},
        db::initialize,
        income::count_incomes,
        response::ApiResponse,
    };

    use super::{CreateIncomeState, IncomeRequest, create_income_endpoint};

    fn get_test_state() -> CreateIncomeState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateIncomeState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    async fn response_body(response: Response) -> ApiResponse<BalanceData> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");
        serde_json::from_slice(&bytes).expect("response body is not a valid envelope")
    }

    #[tokio::test]
    async fn can_record_income() {
        let state = get_test_state();

        let response = create_income_endpoint(
            State(state.clone()),
            Json(IncomeRequest {
                jumlah: Some(10000),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_body(response).await;
        assert_eq!(body.errors, None);
        assert_eq!(body.data, Some(BalanceData { jumlah: 10000 }));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_incomes(&connection).unwrap(), 1);
    }

    #[tokio::test]
    async fn rejects_null_amount_without_side_effects() {
        let state = get_test_state();

        let response =
            create_income_endpoint(State(state.clone()), Json(IncomeRequest { jumlah: None }))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_body(response).await;
        assert_eq!(body.data, None);
        assert_eq!(body.errors.as_deref(), Some("jumlah: Jumlah tidak boleh null"));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_incomes(&connection).unwrap(), 0);
        assert_eq!(get_balance(&connection).unwrap().total, 0);
    }

    #[tokio::test]
    async fn rejects_negative_amount_without_side_effects() {
        let state = get_test_state();

        let response = create_income_endpoint(
            State(state.clone()),
            Json(IncomeRequest {
                jumlah: Some(-10000),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_body(response).await;
        assert_eq!(
            body.errors.as_deref(),
            Some("jumlah: Jumlah harus lebih besar dari atau sama dengan 1")
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_incomes(&connection).unwrap(), 0);
    }
}
