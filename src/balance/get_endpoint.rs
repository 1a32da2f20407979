//! Defines the endpoint for querying the current balance.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    balance::{BalanceData, core::get_balance},
    response::{ApiResponse, render},
};

/// The state needed to query the balance.
#[derive(Debug, Clone)]
pub struct GetBalanceState {
    /// The database connection holding the balance row.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetBalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for querying the current balance.
pub async fn get_balance_endpoint(State(state): State<GetBalanceState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLock.into_response();
        }
    };

    match get_balance(&connection) {
        Ok(balance) => render(StatusCode::OK, ApiResponse::data(BalanceData::from(balance))),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        balance::{BalanceData, get_endpoint::GetBalanceState},
        db::initialize,
        response::ApiResponse,
    };

    use super::get_balance_endpoint;

    fn get_test_state() -> GetBalanceState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        GetBalanceState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn returns_zero_balance_with_no_transactions() {
        let state = get_test_state();

        let response = get_balance_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ApiResponse<BalanceData> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.errors, None);
        assert_eq!(body.data, Some(BalanceData { jumlah: 0 }));
    }

    #[tokio::test]
    async fn returns_current_total() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            connection
                .execute("UPDATE balance SET total = 12500 WHERE id = 1", ())
                .unwrap();
        }

        let response = get_balance_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ApiResponse<BalanceData> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.data, Some(BalanceData { jumlah: 12500 }));
    }
}
