//! Pure derived-value helpers. Everything here is a function of the page
//! state passed in and is recomputed on every render.

pub mod budget;
pub mod format;
pub mod goal;
pub mod narrative;

use rust_decimal::Decimal;

/// `part / whole * 100`, saturating at the `Decimal` bounds. Zero when `whole`
/// is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Sum that pins at the `Decimal` bounds rather than panicking.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
