//! Expense ("pengeluaran") transactions.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the table it is stored in
//! - The recorder that appends an expense row and decreases the balance,
//!   rejecting expenses the balance cannot cover
//! - The endpoint handler for `POST /api/tabungan/pengeluaran`

mod core;
mod create_endpoint;

pub use core::{Expense, create_expense_table, map_row_to_expense, record_expense};
pub use create_endpoint::create_expense_endpoint;

#[cfg(test)]
pub use core::{count_expenses, delete_all_expenses, get_expense};
