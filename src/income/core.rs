use rusqlite::{Connection, params};
use time::OffsetDateTime;

use crate::{
    Error,
    balance::{Balance, get_balance, set_balance_total},
    database_id::DatabaseId,
};

/// An income ("pemasukan") transaction. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    /// The id for the income row.
    pub id: DatabaseId,
    /// The amount added to the balance, always at least one.
    pub amount: i64,
    /// When the income was recorded.
    pub created_at: OffsetDateTime,
}

pub fn create_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY,
            amount INTEGER NOT NULL CHECK (amount >= 1),
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_income(row: &rusqlite::Row) -> Result<Income, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let created_at = row.get(2)?;

    Ok(Income {
        id,
        amount,
        created_at,
    })
}

/// Record an income of `amount` and increase the balance by the same amount.
///
/// The income row and the updated balance are committed in a single SQL
/// transaction; on any error neither is persisted. The caller is expected to
/// have validated `amount` already.
///
/// # Errors
/// Returns [Error::SqlError] if the unit of work cannot be committed.
pub fn record_income(amount: i64, connection: &mut Connection) -> Result<Balance, Error> {
    let transaction = connection.transaction()?;

    let balance = get_balance(&transaction)?;
    let new_total = balance.total + amount;

    transaction.execute(
        "INSERT INTO income (amount, created_at) VALUES (?1, ?2)",
        params![amount, OffsetDateTime::now_utc()],
    )?;
    set_balance_total(&transaction, new_total)?;

    transaction.commit()?;

    Ok(Balance {
        total: new_total,
        ..balance
    })
}

/// Retrieve an income by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a recorded income.
pub fn get_income(id: DatabaseId, connection: &Connection) -> Result<Income, Error> {
    let income = connection
        .prepare("SELECT id, amount, created_at FROM income WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row_to_income)?;

    Ok(income)
}

/// Count the recorded incomes.
pub fn count_incomes(connection: &Connection) -> Result<i64, Error> {
    let count = connection
        .prepare("SELECT COUNT(id) FROM income")?
        .query_row([], |row| row.get(0))?;

    Ok(count)
}

/// Delete every income row.
///
/// Clearing the history is a maintenance operation, not a reversal: the
/// balance is left untouched.
pub fn delete_all_incomes(connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM income", ())?;

    Ok(())
}

#[cfg(test)]
mod create_income_table_tests {
    use rusqlite::Connection;

    use super::create_income_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_income_table(&connection));
    }
}
