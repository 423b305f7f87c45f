use crate::error::{AppResult, DomainError};

pub mod item;
pub mod link;
pub mod location;
pub mod player;
pub mod room;
pub mod types;

/// Shared request-field validation: non-empty and within the length bound,
/// counted in characters. Runs before any backend call.
pub(crate) fn validate_text(field: &'static str, value: &str, max: usize) -> AppResult<()> {
    if value.is_empty() {
        return Err(DomainError::InvalidArgument {
            field,
            message: "cannot be empty".into(),
        });
    }
    if value.chars().count() > max {
        return Err(DomainError::InvalidArgument {
            field,
            message: format!("longer than {max} characters"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_empty_rejected() {
        assert!(validate_text("name", "", 10).is_err());
    }

    #[test]
    fn t_overlong_rejected() {
        assert!(validate_text("name", "abcdef", 5).is_err());
        assert!(validate_text("name", "abcde", 5).is_ok());
    }

    #[test]
    fn t_length_counts_chars_not_bytes() {
        assert!(validate_text("name", "ééééé", 5).is_ok());
    }
}
