//! Income ("pemasukan") transactions.
//!
//! This module contains everything related to income:
//! - The `Income` model and the table it is stored in
//! - The recorder that appends an income row and increases the balance
//! - The endpoint handler for `POST /api/tabungan/pemasukan`

mod core;
mod create_endpoint;

pub use core::{Income, create_income_table, map_row_to_income, record_income};
pub use create_endpoint::create_income_endpoint;

#[cfg(test)]
pub use core::{count_incomes, delete_all_incomes, get_income};
