//! Operator edits to a nightly breakdown.

use jiff::civil::Date;
use payloads::PricingDay;
use payloads::requests::{DayEdit, PriceField};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::PricingError;

fn field_mut(day: &mut PricingDay, field: PriceField) -> &mut Decimal {
    match field {
        PriceField::Price => &mut day.price,
        PriceField::RootPrice => &mut day.root_price,
    }
}

/// Spread `total` over the days on `field`.
///
/// Each day gets `total / n` truncated to cents and the last day absorbs the
/// remainder, so the field sums to exactly `total`.
pub fn distribute_total(
    days: &[PricingDay],
    total: Decimal,
    field: PriceField,
) -> Result<Vec<PricingDay>, PricingError> {
    if days.is_empty() {
        return Err(PricingError::NoDays);
    }
    if total < Decimal::ZERO {
        return Err(PricingError::NegativeAmount);
    }
    if total.round_dp(2) != total {
        return Err(PricingError::SubCentAmount);
    }

    let n = Decimal::from(days.len());
    let per_day = (total / n).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let last = total - per_day * (n - Decimal::ONE);

    let mut days = days.to_vec();
    let last_index = days.len() - 1;
    for (i, day) in days.iter_mut().enumerate() {
        *field_mut(day, field) = if i == last_index { last } else { per_day };
        day.recompute()?;
    }
    Ok(days)
}

/// Overwrite the fields of one night given in `edit`. Every returned night
/// has its total recomputed, not only the edited one.
pub fn edit_day(
    days: &[PricingDay],
    date: Date,
    edit: &DayEdit,
) -> Result<Vec<PricingDay>, PricingError> {
    let values = [edit.price, edit.root_price, edit.commission_rate];
    if values.iter().flatten().any(|v| *v < Decimal::ZERO) {
        return Err(PricingError::NegativeAmount);
    }

    let mut days = days.to_vec();
    let day = days
        .iter_mut()
        .find(|d| d.date == date)
        .ok_or(PricingError::UnknownDay(date))?;
    if let Some(price) = edit.price {
        day.price = price;
    }
    if let Some(root_price) = edit.root_price {
        day.root_price = root_price;
    }
    if let Some(commission_rate) = edit.commission_rate {
        day.commission_rate = commission_rate;
    }
    for day in &mut days {
        day.recompute()?;
    }
    Ok(days)
}
