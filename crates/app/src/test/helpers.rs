//! Test Helpers

use crate::domain::orders::data::CheckoutDetails;

/// Checkout details that pass validation.
pub(crate) fn checkout_details() -> CheckoutDetails {
    CheckoutDetails {
        name: "Alice Example".to_string(),
        email: "alice@example.com".to_string(),
        phone: "+375291234567".to_string(),
        street: "Nezavisimosti Avenue".to_string(),
        building: "12".to_string(),
        apartment: Some("34".to_string()),
        floor: Some(3),
    }
}
