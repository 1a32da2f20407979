//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    balance::get_balance_endpoint,
    endpoints,
    expense::create_expense_endpoint,
    income::create_income_endpoint,
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::TABUNGAN, get(get_balance_endpoint))
        .route(endpoints::PEMASUKAN, post(create_income_endpoint))
        .route(endpoints::PENGELUARAN, post(create_expense_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
