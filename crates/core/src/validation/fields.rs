//! Bounds and length checks for toy, tag and master fields.

use crate::error::CoreError;

/// Maximum toy name length, in characters.
pub const MAX_TOY_NAME_LEN: usize = 255;

/// Maximum toy description length, in characters.
pub const MAX_TOY_DESCRIPTION_LEN: usize = 4000;

/// Maximum tag name length, in characters.
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Maximum master `info` length, in characters.
pub const MAX_MASTER_INFO_LEN: usize = 2000;

/// Maximum attachment link length, in characters.
pub const MAX_ATTACHMENT_LINK_LEN: usize = 2048;

/// Maximum number of attachment links accepted in a single request.
pub const MAX_ATTACHMENTS_PER_REQUEST: usize = 32;

/// Price must be a finite, non-negative number.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

/// Quantity must be non-negative.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "quantity must be non-negative, got {quantity}"
        )));
    }
    Ok(())
}

/// Check the trimmed character length of `value` against `[min, max]`.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate a batch of attachment links.
pub fn validate_attachment_links(links: &[String]) -> Result<(), CoreError> {
    if links.len() > MAX_ATTACHMENTS_PER_REQUEST {
        return Err(CoreError::Validation(format!(
            "at most {MAX_ATTACHMENTS_PER_REQUEST} attachments are allowed, got {}",
            links.len()
        )));
    }
    for link in links {
        validate_length("attachment link", link, 1, MAX_ATTACHMENT_LINK_LEN)?;
    }
    Ok(())
}
