//! Field-qualified validation for the request bodies.
//!
//! Failures are collected as structured [FieldError]s and only flattened to
//! the wire format (`"field: message"`, joined with `", "`) at the response
//! boundary.

use std::fmt::Display;

use time::Date;

/// Message reported when the amount is absent or null.
pub const AMOUNT_NULL: &str = "Jumlah tidak boleh null";
/// Message reported when the amount is below one.
pub const AMOUNT_TOO_SMALL: &str = "Jumlah harus lebih besar dari atau sama dengan 1";
/// Message reported when the date is absent or null.
pub const DATE_NULL: &str = "Tanggal tidak boleh null";

/// A single validation failure scoped to one request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The JSON field the failure refers to.
    pub field: &'static str,
    /// The constraint message for that field.
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the `jumlah` field shared by the income and expense requests.
///
/// The amount must be present and at least one.
pub fn validate_amount(amount: Option<i64>) -> Result<i64, FieldError> {
    match amount {
        None => Err(FieldError {
            field: "jumlah",
            message: AMOUNT_NULL,
        }),
        Some(amount) if amount < 1 => Err(FieldError {
            field: "jumlah",
            message: AMOUNT_TOO_SMALL,
        }),
        Some(amount) => Ok(amount),
    }
}

/// Validate the `tanggal` field of the expense request.
pub fn validate_date(date: Option<Date>) -> Result<Date, FieldError> {
    date.ok_or(FieldError {
        field: "tanggal",
        message: DATE_NULL,
    })
}

/// Join `errors` into the flat string carried by the response envelope.
///
/// Errors keep the order in which they were collected, which follows the
/// field declaration order of the request body.
pub fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod validate_amount_tests {
    use super::{AMOUNT_NULL, AMOUNT_TOO_SMALL, validate_amount};

    #[test]
    fn accepts_positive_amount() {
        assert_eq!(validate_amount(Some(10000)), Ok(10000));
    }

    #[test]
    fn accepts_amount_of_one() {
        assert_eq!(validate_amount(Some(1)), Ok(1));
    }

    #[test]
    fn rejects_missing_amount() {
        let error = validate_amount(None).unwrap_err();

        assert_eq!(error.field, "jumlah");
        assert_eq!(error.message, AMOUNT_NULL);
    }

    #[test]
    fn rejects_negative_amount() {
        let error = validate_amount(Some(-10000)).unwrap_err();

        assert_eq!(error.field, "jumlah");
        assert_eq!(error.message, AMOUNT_TOO_SMALL);
    }

    #[test]
    fn rejects_zero_amount() {
        let error = validate_amount(Some(0)).unwrap_err();

        assert_eq!(error.message, AMOUNT_TOO_SMALL);
    }
}

#[cfg(test)]
mod validate_date_tests {
    use time::macros::date;

    use super::{DATE_NULL, validate_date};

    #[test]
    fn accepts_present_date() {
        assert_eq!(
            validate_date(Some(date!(2024 - 01 - 01))),
            Ok(date!(2024 - 01 - 01))
        );
    }

    #[test]
    fn rejects_missing_date() {
        let error = validate_date(None).unwrap_err();

        assert_eq!(error.field, "tanggal");
        assert_eq!(error.message, DATE_NULL);
    }
}

#[cfg(test)]
mod join_field_errors_tests {
    use super::{FieldError, join_field_errors};

    #[test]
    fn formats_single_error_as_field_colon_message() {
        let errors = [FieldError {
            field: "jumlah",
            message: "Jumlah tidak boleh null",
        }];

        assert_eq!(join_field_errors(&errors), "jumlah: Jumlah tidak boleh null");
    }

    #[test]
    fn joins_multiple_errors_in_order() {
        let errors = [
            FieldError {
                field: "jumlah",
                message: "Jumlah tidak boleh null",
            },
            FieldError {
                field: "tanggal",
                message: "Tanggal tidak boleh null",
            },
        ];

        assert_eq!(
            join_field_errors(&errors),
            "jumlah: Jumlah tidak boleh null, tanggal: Tanggal tidak boleh null"
        );
    }
}
