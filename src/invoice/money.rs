//! Exact decimal helpers. Values are only rounded when rendered.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

const DISPLAY_SCALE: i64 = 2;

pub fn hundred() -> BigDecimal {
    BigDecimal::from(100)
}

/// Round to cents, half away from zero.
pub fn round_for_display(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(DISPLAY_SCALE, RoundingMode::HalfUp)
}

/// Render with exactly two decimals, e.g. `120.00`.
pub fn format_amount(value: &BigDecimal) -> String {
    round_for_display(value).to_string()
}

/// True when `value` renders as zero.
pub fn is_zero_at_display(value: &BigDecimal) -> bool {
    round_for_display(value).is_zero()
}

pub fn sum<'a, I>(values: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    values
        .into_iter()
        .fold(BigDecimal::zero(), |total, value| total + value)
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub fn percentage_of(part: &BigDecimal, whole: &BigDecimal) -> BigDecimal {
    if whole.is_zero() {
        return BigDecimal::zero();
    }
    let scaled = part * &hundred();
    &scaled / whole
}

/// `percentage` percent of `whole`.
pub fn portion_of(whole: &BigDecimal, percentage: &BigDecimal) -> BigDecimal {
    let scaled = whole * percentage;
    &scaled / &hundred()
}
