//! Commission totals and the deposit policy built on them.

use payloads::RoomSelection;
use payloads::requests::DepositOption;
use payloads::responses::{CommissionSummary, DepositQuote};
use rust_decimal::Decimal;

use crate::PricingError;

fn add(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b).ok_or(PricingError::AmountOutOfRange)
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::AmountOutOfRange)
}

/// Restore every night's total from its price, root price and rate.
pub fn recompute_totals(
    rooms: &mut [RoomSelection],
) -> Result<(), PricingError> {
    for day in rooms.iter_mut().flat_map(|r| r.pricing_by_day.iter_mut()) {
        day.recompute()?;
    }
    Ok(())
}

/// Aggregate the nightly breakdown of every room.
///
/// Nightly totals are derived from each day's inputs, so a breakdown stored
/// without (or with a stale) `total_price_with_commission` still sums
/// correctly.
pub fn summarize(
    rooms: &[RoomSelection],
) -> Result<CommissionSummary, PricingError> {
    let mut total_amount = Decimal::ZERO;
    let mut total_with_commission = Decimal::ZERO;
    let mut one_night_cost = Decimal::ZERO;
    let mut number_of_nights = 0;

    for room in rooms {
        let count = Decimal::from(room.count);
        for day in &room.pricing_by_day {
            total_amount = add(total_amount, mul(day.root_price, count)?)?;
            total_with_commission =
                add(total_with_commission, mul(day.checked_total()?, count)?)?;
        }
        if let Some(first) = room.pricing_by_day.first() {
            // rooms without a root price fall back to the chosen price
            let nightly = if first.root_price.is_zero() {
                first.price
            } else {
                first.root_price
            };
            one_night_cost = add(one_night_cost, mul(nightly, count)?)?;
        }
        number_of_nights = number_of_nights.max(room.pricing_by_day.len());
    }

    let total_commission = total_with_commission
        .checked_sub(total_amount)
        .ok_or(PricingError::AmountOutOfRange)?;
    Ok(CommissionSummary {
        total_amount,
        total_commission,
        number_of_nights: number_of_nights as u32,
        one_night_cost,
        final_deposit: add(total_commission, one_night_cost)?,
    })
}

/// The amount to capture for a deposit option.
///
/// Every option, not only a custom amount, must land in `(0, full amount]`.
pub fn deposit_amount(
    summary: &CommissionSummary,
    option: DepositOption,
) -> Result<Decimal, PricingError> {
    let max = summary.full_amount();
    let amount = match option {
        DepositOption::CommissionOnly => summary.total_commission,
        DepositOption::CommissionPlusOneNight => summary.final_deposit,
        DepositOption::FullAmount => max,
        DepositOption::Custom(amount) => amount,
    };
    if amount <= Decimal::ZERO || amount > max {
        return Err(PricingError::InvalidDeposit { max });
    }
    Ok(amount)
}

/// The fixed deposit tiers shown at payment capture.
pub fn deposit_options(summary: &CommissionSummary) -> Vec<DepositQuote> {
    [
        DepositOption::CommissionOnly,
        DepositOption::CommissionPlusOneNight,
        DepositOption::FullAmount,
    ]
    .into_iter()
    .map(|option| DepositQuote {
        option,
        amount: match option {
            DepositOption::CommissionOnly => summary.total_commission,
            DepositOption::CommissionPlusOneNight => summary.final_deposit,
            _ => summary.full_amount(),
        },
    })
    .collect()
}
