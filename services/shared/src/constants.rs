/// Shared constants for the raffle ticket form
///
/// This module centralizes the field limits and candidate sets so the form,
/// the surface checks and the renderer agree on the same numbers.

/// Mobile operator prefixes offered in the phone selector, in display order.
///
/// The first entry is the default selection.
pub const PHONE_OPERATORS: [&str; 5] = ["0414", "0424", "0412", "0416", "0426"];

/// Maximum characters kept in the buyer's full name
pub const FULL_NAME_MAX_CHARS: usize = 30;

/// Digits in a local phone number (after the operator prefix)
pub const PHONE_LOCAL_DIGITS: usize = 7;

/// Trailing digits of the Pago Móvil confirmation entered as proof of payment
pub const PAYMENT_REFERENCE_DIGITS: usize = 6;

/// Lowest ticket count a buyer can select
pub const MIN_TICKET_COUNT: u32 = 1;

/// Default unit price in cents (100.00)
pub const DEFAULT_UNIT_PRICE_CENTS: u64 = 10_000;

/// Largest unit price in cents accepted from configuration
///
/// Any count up to `u32::MAX` multiplied by this price still fits in a `u64`.
pub const MAX_UNIT_PRICE_CENTS: u64 = u64::MAX / u32::MAX as u64;

/// How long the "copied" marker stays visible after a clipboard write
pub const COPY_FEEDBACK_MS: u64 = 2_000;

/// Minimum time the loading overlay stays up, measured from request start
pub const SUBMISSION_FLOOR_MS: u64 = 2_000;
