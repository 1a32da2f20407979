//! Moneytary is a JSON REST API for tracking personal finances: income
//! ("pemasukan") and expense ("pengeluaran") transactions are recorded
//! against a single running balance ("tabungan").
//!
//! Every endpoint answers with a uniform envelope `{ "data": ..., "errors":
//! ... }` where exactly one of the two fields is populated. Expenses that
//! would drive the balance negative are rejected, and each mutation commits
//! the transaction row and the updated balance in a single unit of work.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod balance;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod income;
mod logging;
mod response;
mod routing;
mod validation;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::response::{ApiResponse, render};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body failed field validation.
    ///
    /// Carries the field-qualified messages already joined into the flat
    /// string reported to the client, e.g.
    /// `"jumlah: Jumlah tidak boleh null"`.
    #[error("{0}")]
    Validation(String),

    /// The running balance cannot cover the requested expense.
    ///
    /// Raised after validation passes but before any row is written, so a
    /// rejected expense leaves no trace in the database.
    #[error("Tabungan tidak cukup")]
    InsufficientFunds,

    /// The requested resource could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLock,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Client errors carry their message in the envelope verbatim.
            Error::Validation(_) | Error::InsufficientFunds => {
                render(StatusCode::BAD_REQUEST, ApiResponse::error(self.to_string()))
            }
            Error::NotFound => render(StatusCode::NOT_FOUND, ApiResponse::error(self.to_string())),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Terjadi kesalahan pada server"),
                )
            }
        }
    }
}
