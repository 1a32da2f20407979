//! The API endpoint URIs.

/// The route to query the current balance.
pub const TABUNGAN: &str = "/api/tabungan/";
/// The route to record an income.
pub const PEMASUKAN: &str = "/api/tabungan/pemasukan";
/// The route to record an expense.
pub const PENGELUARAN: &str = "/api/tabungan/pengeluaran";
