use askama::Template;
use jiff::civil::Date;
use payloads::Reservation;
use payloads::responses::CommissionSummary;
use pricing::PricingError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub date: Date,
    pub room: String,
    pub count: u32,
    /// Nightly price the guest pays, commission included.
    pub nightly: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub confirmation_number: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub hotel_name: String,
    pub checkin: Date,
    pub checkout: Date,
    pub status: &'static str,
    pub lines: Vec<ReceiptLine>,
    pub summary: CommissionSummary,
    pub paid: Decimal,
    pub balance_due: Decimal,
    pub issued_on: Date,
}

impl Receipt {
    /// Nightly totals are recomputed from each day's rates rather than taken
    /// from the stored breakdown.
    pub fn compose(
        reservation: &Reservation,
        issued_on: Date,
    ) -> Result<Self, PricingError> {
        let mut rooms = reservation.picked_rooms_type.clone();
        pricing::recompute_totals(&mut rooms)?;

        let mut lines = Vec::new();
        for room in &rooms {
            for day in &room.pricing_by_day {
                let nightly = day.total_price_with_commission;
                lines.push(ReceiptLine {
                    date: day.date,
                    room: room.display_name.clone(),
                    count: room.count,
                    nightly,
                    line_total: nightly
                        .checked_mul(Decimal::from(room.count))
                        .ok_or(PricingError::AmountOutOfRange)?,
                });
            }
        }
        lines.sort_by_key(|line| line.date);

        let summary = pricing::summarize(&rooms)?;
        let balance_due = summary
            .full_amount()
            .saturating_sub(reservation.paid_amount)
            .max(Decimal::ZERO);
        Ok(Self {
            confirmation_number: reservation.confirmation_number.clone(),
            guest_name: reservation.name.clone(),
            guest_email: reservation.email.clone(),
            guest_phone: reservation.phone.clone(),
            hotel_name: reservation.hotel_name.clone(),
            checkin: reservation.checkin_date,
            checkout: reservation.checkout_date,
            status: reservation.status.label(),
            lines,
            summary,
            paid: reservation.paid_amount,
            balance_due,
            issued_on,
        })
    }

    pub fn to_html(&self) -> Result<String, askama::Error> {
        ReceiptTemplate::from(self).render()
    }
}

struct ReceiptRow<'a> {
    date: Date,
    room: &'a str,
    count: u32,
    nightly: String,
    line_total: String,
}

#[derive(Template)]
#[template(path = "receipt.html")]
struct ReceiptTemplate<'a> {
    confirmation_number: &'a str,
    issued_on: Date,
    status: &'a str,
    guest_name: &'a str,
    guest_email: &'a str,
    guest_phone: &'a str,
    hotel_name: &'a str,
    checkin: Date,
    checkout: Date,
    nights: u32,
    rows: Vec<ReceiptRow<'a>>,
    total_amount: String,
    commission: String,
    full_amount: String,
    paid: String,
    balance_due: String,
}

impl<'a> From<&'a Receipt> for ReceiptTemplate<'a> {
    fn from(receipt: &'a Receipt) -> Self {
        Self {
            confirmation_number: &receipt.confirmation_number,
            issued_on: receipt.issued_on,
            status: receipt.status,
            guest_name: &receipt.guest_name,
            guest_email: &receipt.guest_email,
            guest_phone: &receipt.guest_phone,
            hotel_name: &receipt.hotel_name,
            checkin: receipt.checkin,
            checkout: receipt.checkout,
            nights: receipt.summary.number_of_nights,
            rows: receipt
                .lines
                .iter()
                .map(|line| ReceiptRow {
                    date: line.date,
                    room: &line.room,
                    count: line.count,
                    nightly: money(line.nightly),
                    line_total: money(line.line_total),
                })
                .collect(),
            total_amount: money(receipt.summary.total_amount),
            commission: money(receipt.summary.total_commission),
            full_amount: money(receipt.summary.full_amount()),
            paid: money(receipt.paid),
            balance_due: money(receipt.balance_due),
        }
    }
}

/// Two decimal places, always.
fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount.to_string()
}
