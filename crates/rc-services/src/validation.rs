use rc_core::error::{AppError, Result};

/// Rejects empty content and content longer than `max_len` characters.
pub fn validate_content(content: &str, max_len: usize, kind: &str) -> Result<()> {
    if content.is_empty() {
        return Err(AppError::ValidationError(format!("{kind} content must not be empty")));
    }
    let len = content.chars().count();
    if len > max_len {
        return Err(AppError::ValidationError(format!(
            "{kind} content is too long: {len} characters, limit is {max_len}"
        )));
    }
    Ok(())
}
