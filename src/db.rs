/*! This module defines the initialization of the application's database. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, balance::create_balance_table, expense::create_expense_table,
    income::create_income_table,
};

/// Create the application tables and seed the balance row at zero.
///
/// Runs inside a single exclusive transaction so a partially created schema
/// is never visible. Safe to call on an already initialized database.
///
/// # Errors
/// Returns an error if a table cannot be created or the transaction cannot
/// be committed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_balance_table(&transaction)?;
    create_income_table(&transaction)?;
    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
