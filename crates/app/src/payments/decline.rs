//! Card decline code to user-facing message mapping.

/// Maps a provider decline code to a friendly message, falling back to
/// the provider's raw message for codes outside the table.
#[must_use]
pub fn decline_message<'a>(code: Option<&str>, raw_message: &'a str) -> &'a str {
    match code {
        Some("incorrect_number") => "The card number is incorrect.",
        Some("invalid_number") => "The card number is invalid.",
        Some("invalid_expiry_month") => "The card's expiration month is invalid.",
        Some("invalid_expiry_year") => "The card's expiration year is invalid.",
        Some("invalid_cvc") => "The card's CVC is invalid.",
        Some("expired_card") => "The card has expired.",
        Some("incorrect_cvc") => "The CVC number is incorrect.",
        Some("card_declined") => "The card was declined. Please try another card.",
        Some("processing_error") => "An error occurred while processing the card.",
        Some("incorrect_zip") => "The card's postal code is incorrect.",
        Some("insufficient_funds") => "The card has insufficient funds.",
        Some("lost_card") => "The card has been reported lost.",
        Some("stolen_card") => "The card has been reported stolen.",
        Some("generic_decline") => "The card was declined.",
        _ => raw_message,
    }
}
