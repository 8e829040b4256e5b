use thiserror::Error;

/// Every way a contact operation can fail.
///
/// The first three kinds come from the validation layer and are raised before
/// anything is written. `NotFound` is detected before any mutation as well.
/// `Persistence` wraps a storage fault; the enclosing transaction has already
/// been rolled back when it is returned.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("missing required field '{0}'")]
    MissingField(String),
    #[error("field '{field}' exceeds {max} characters")]
    FieldTooLong { field: String, max: usize },
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("contact {0} not found")]
    NotFound(i64),
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl ContactError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }

    pub fn too_long(field: &str, max: usize) -> Self {
        Self::FieldTooLong {
            field: field.to_string(),
            max,
        }
    }

    /// True for errors caused by the caller's input rather than the store
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::FieldTooLong { .. } | Self::InvalidDate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ContactError::missing("firstName").to_string(),
            "missing required field 'firstName'"
        );
        assert_eq!(
            ContactError::too_long("zip", 5).to_string(),
            "field 'zip' exceeds 5 characters"
        );
        assert_eq!(
            ContactError::InvalidDate("not-a-date".to_string()).to_string(),
            "invalid date 'not-a-date'"
        );
        assert_eq!(ContactError::NotFound(7).to_string(), "contact 7 not found");
    }

    #[test]
    fn test_is_validation() {
        assert!(ContactError::missing("lastName").is_validation());
        assert!(ContactError::too_long("state", 2).is_validation());
        assert!(ContactError::InvalidDate(String::new()).is_validation());
        assert!(!ContactError::NotFound(1).is_validation());
        assert!(!ContactError::Persistence(sqlx::Error::RowNotFound).is_validation());
    }
}
