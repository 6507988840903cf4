//! Form field normalization shared by list, item and reservation drafts.

use super::entity::{DomainError, DomainResult};

/// Trim a required text field, failing when nothing is left.
pub fn required_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank values become `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("Name", "  Stroller ").unwrap(), "Stroller");
        assert_eq!(
            required_text("Name", "   "),
            Err(DomainError::InvalidInput("Name is required".into()))
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" hi ".into())), Some("hi".into()));
    }
}
