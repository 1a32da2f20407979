use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// The running total of all recorded income and expenses.
///
/// The total never goes below zero: expenses that would overdraw it are
/// rejected before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    /// The id for the balance row.
    pub id: DatabaseId,
    /// The running total.
    pub total: i64,
}

/// The wire representation of the balance carried in the response envelope.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceData {
    /// The running total.
    pub jumlah: i64,
}

impl From<Balance> for BalanceData {
    fn from(balance: Balance) -> Self {
        Self {
            jumlah: balance.total,
        }
    }
}

pub fn create_balance_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS balance (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            total INTEGER NOT NULL CHECK (total >= 0)
        )",
        (),
    )?;

    // Seed the single row so reads always succeed, even before the first
    // transaction is recorded.
    connection.execute(
        "INSERT OR IGNORE INTO balance (id, total) VALUES (1, 0)",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_balance(row: &rusqlite::Row) -> Result<Balance, rusqlite::Error> {
    let id = row.get(0)?;
    let total = row.get(1)?;

    Ok(Balance { id, total })
}

/// Get the current balance.
///
/// # Errors
/// Returns [Error] if the database has not been initialized or the query
/// fails.
pub fn get_balance(connection: &Connection) -> Result<Balance, Error> {
    let balance = connection
        .prepare("SELECT id, total FROM balance WHERE id = 1")?
        .query_row([], map_row_to_balance)?;

    Ok(balance)
}

/// Overwrite the balance total.
///
/// Taking [rusqlite::Transaction] restricts callers to a unit of work that
/// also inserts the matching income or expense row, so the balance and the
/// transaction history cannot drift apart.
pub(crate) fn set_balance_total(
    transaction: &rusqlite::Transaction,
    total: i64,
) -> Result<(), Error> {
    transaction.execute("UPDATE balance SET total = ?1 WHERE id = 1", params![total])?;

    Ok(())
}



#[cfg(test)]
mod balance_data_tests {
    use super::{Balance, BalanceData};

    #[test]
    fn carries_the_total_as_jumlah() {
        let balance = Balance { id: 1, total: 7500 };

        assert_eq!(BalanceData::from(balance), BalanceData { jumlah: 7500 });
    }
}
