//! Error types for the wallet ledger.

/// Ledger-level errors (business rule violations).
///
/// Every variant is a plain tag so callers can compare errors by identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("phone has already registered")]
    PhoneAlreadyRegistered,

    #[error("amount must be positive")]
    AmountMustBePositive,

    #[error("not enough balance")]
    NotEnoughBalance,

    #[error("account not found")]
    AccountNotFound,

    #[error("payment not found")]
    PaymentNotFound,

    #[error("favorite payment not found")]
    FavoriteNotFound,

    /// Only produced under the strict reject policy.
    #[error("payment is not in progress and cannot be rejected")]
    PaymentNotRejectable,

    /// The account counter has reached `i64::MAX`.
    #[error("no account ids left")]
    AccountIdsExhausted,
}

/// Persistence errors (flat-file export and import).
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_display() {
        assert_eq!(
            LedgerError::PhoneAlreadyRegistered.to_string(),
            "phone has already registered"
        );
        assert_eq!(
            LedgerError::FavoriteNotFound.to_string(),
            "favorite payment not found"
        );
    }

    #[test]
    fn test_parse_error_names_line() {
        let err = PersistError::Parse {
            line: 3,
            reason: "expected 3 fields, got 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record on line 3: expected 3 fields, got 2"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PersistError = io_err.into();
        assert!(matches!(err, PersistError::Io(_)));
    }
}
