//! Database ID type definition and parsing of IDs taken from request paths.

use crate::Error;

/// Alias for the integer type used for mapping to transaction IDs.
///
/// IDs are assigned by the database, start at 1 and are never reused.
pub type TransactionId = i64;

/// Parse a path segment into a [TransactionId].
///
/// Only positive decimal integers are well-formed IDs.
///
/// # Errors
/// Returns [Error::InvalidIdentifier] if `raw` is not a well-formed ID. Note
/// that a well-formed ID may still not refer to a stored transaction.
pub fn parse_transaction_id(raw: &str) -> Result<TransactionId, Error> {
    match raw.parse::<TransactionId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidIdentifier(raw.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::parse_transaction_id;

    #[test]
    fn parses_positive_integer() {
        assert_eq!(parse_transaction_id("42"), Ok(42));
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["not-a-valid-id", "", "0", "-3", "1.5", " 7"] {
            assert_eq!(
                parse_transaction_id(raw),
                Err(Error::InvalidIdentifier(raw.to_owned())),
                "want {raw:?} to be rejected"
            );
        }
    }
}
