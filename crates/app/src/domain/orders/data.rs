//! Order Data

use validator::{Validate, ValidationError};

/// Shortest accepted phone number, counting a leading `+`.
pub const MIN_PHONE_LEN: usize = 10;

/// Customer and shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CheckoutDetails {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    /// Letters, whitespace and hyphens; see [`validate_street`].
    #[validate(length(max = 100), custom = "validate_street")]
    pub street: String,

    #[validate(length(min = 1, max = 20))]
    pub building: String,

    #[validate(length(max = 20))]
    pub apartment: Option<String>,
    pub floor: Option<i16>,
}

/// Digits with an optional leading `+`, at least [`MIN_PHONE_LEN`] characters long.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    let well_formed = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());

    if !well_formed || phone.len() < MIN_PHONE_LEN {
        let mut error = ValidationError::new("phone");
        error.message = Some("phone must be at least 10 digits, optionally prefixed by +".into());

        return Err(error);
    }

    Ok(())
}

/// Letters, whitespace and hyphens, with at least one letter.
pub fn validate_street(street: &str) -> Result<(), ValidationError> {
    let allowed = street
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-');

    if !allowed || !street.chars().any(char::is_alphabetic) {
        let mut error = ValidationError::new("street");
        error.message = Some("street may only contain letters, spaces and hyphens".into());

        return Err(error);
    }

    Ok(())
}
