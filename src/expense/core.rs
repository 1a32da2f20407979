use rusqlite::{Connection, params};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    balance::{Balance, get_balance, set_balance_total},
    database_id::DatabaseId,
};

/// An expense ("pengeluaran") transaction. Immutable once recorded.
///
/// The amount is stored as supplied by the client (positive); the recorder
/// applies it to the balance as a negative delta.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The id for the expense row.
    pub id: DatabaseId,
    /// The amount subtracted from the balance, always at least one.
    pub amount: i64,
    /// The date the expense occurred, as supplied by the client.
    pub date: Date,
    /// When the expense was recorded.
    pub created_at: OffsetDateTime,
}

pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            amount INTEGER NOT NULL CHECK (amount >= 1),
            date TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_expense(row: &rusqlite::Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let created_at = row.get(3)?;

    Ok(Expense {
        id,
        amount,
        date,
        created_at,
    })
}

/// Record an expense of `amount` on `date` and decrease the balance by the
/// same amount.
///
/// The insufficient-funds check runs before any row is written: an expense
/// the balance cannot cover is rejected with no side effects. On success the
/// expense row and the updated balance are committed in a single SQL
/// transaction. The caller is expected to have validated `amount` already.
///
/// # Errors
/// Returns
/// - [Error::InsufficientFunds] if the balance would go below zero,
/// - [Error::SqlError] if the unit of work cannot be committed.
pub fn record_expense(
    amount: i64,
    date: Date,
    connection: &mut Connection,
) -> Result<Balance, Error> {
    let transaction = connection.transaction()?;

    let balance = get_balance(&transaction)?;
    let new_total = balance.total - amount;

    if new_total < 0 {
        // Dropping the transaction rolls it back, though nothing has been
        // written at this point.
        return Err(Error::InsufficientFunds);
    }

    transaction.execute(
        "INSERT INTO expense (amount, date, created_at) VALUES (?1, ?2, ?3)",
        params![amount, date, OffsetDateTime::now_utc()],
    )?;
    set_balance_total(&transaction, new_total)?;

    transaction.commit()?;

    Ok(Balance {
        total: new_total,
        ..balance
    })
}

/// Retrieve an expense by its `id`.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a recorded expense.
pub fn get_expense(id: DatabaseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, date, created_at FROM expense WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row_to_expense)?;

    Ok(expense)
}

/// Count the recorded expenses.
pub fn count_expenses(connection: &Connection) -> Result<i64, Error> {
    let count = connection
        .prepare("SELECT COUNT(id) FROM expense")?
        .query_row([], |row| row.get(0))?;

    Ok(count)
}

/// Delete every expense row, leaving the balance untouched.
pub fn delete_all_expenses(connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM expense", ())?;

    Ok(())
}
