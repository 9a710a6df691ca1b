use crate::PricingError;

const RELOCATE_SUFFIX: &str = "_relocate";

/// The confirmation number to give a reservation moved to another hotel.
///
/// `ABC123` becomes `ABC123_relocate1`, `ABC123_relocate1` becomes
/// `ABC123_relocate2`, and so on. A bare `_relocate` suffix counts as one.
pub fn relocated_confirmation_number(
    confirmation_number: &str,
) -> Result<String, PricingError> {
    let unusable =
        || PricingError::RelocationSuffix(confirmation_number.to_string());
    let (base, count) = match split_suffix(confirmation_number) {
        None => (confirmation_number, 0),
        Some((base, Some(count))) => (base, count),
        // digits too long for a counter
        Some((_, None)) => return Err(unusable()),
    };
    let next = count.checked_add(1).ok_or_else(unusable)?;
    Ok(format!("{base}{RELOCATE_SUFFIX}{next}"))
}

/// `None` when there is no numeric relocation suffix. The inner `None` is a
/// suffix whose digits don't fit a `u64`.
fn split_suffix(confirmation_number: &str) -> Option<(&str, Option<u64>)> {
    let index = confirmation_number.rfind(RELOCATE_SUFFIX)?;
    let (base, suffix) = confirmation_number.split_at(index);
    let digits = &suffix[RELOCATE_SUFFIX.len()..];
    if digits.is_empty() {
        return Some((base, Some(1)));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((base, digits.parse().ok()))
}
