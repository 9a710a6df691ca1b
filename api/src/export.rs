//! Spreadsheet export of the reservation table.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use payloads::Reservation;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const COLUMNS: [&str; 14] = [
    "Confirmation Number",
    "Name",
    "Phone",
    "Hotel Name",
    "Status",
    "Checkin Date",
    "Checkout Date",
    "Payment Status",
    "Total Amount",
    "Paid Amount",
    "Room Type",
    "Room Count",
    "Paid Onsite",
    "Created At",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

pub fn export_filename(today: Date) -> String {
    format!("reservations_{today}.xlsx")
}

/// One flat row per reservation, in [`COLUMNS`] order.
pub fn export_row(reservation: &Reservation) -> [Cell; 14] {
    let room_types = reservation
        .picked_rooms_type
        .iter()
        .map(|r| r.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let created_at = reservation
        .created_at
        .to_zoned(TimeZone::UTC)
        .strftime("%Y-%m-%d %H:%M")
        .to_string();
    [
        Cell::Text(reservation.confirmation_number.clone()),
        Cell::Text(reservation.name.clone()),
        Cell::Text(reservation.phone.clone()),
        Cell::Text(reservation.hotel_name.clone()),
        Cell::Text(reservation.status.label().to_string()),
        Cell::Text(reservation.checkin_date.to_string()),
        Cell::Text(reservation.checkout_date.to_string()),
        Cell::Text(reservation.payment_status.label().to_string()),
        Cell::Number(reservation.total_amount),
        Cell::Number(reservation.paid_amount),
        Cell::Text(room_types),
        Cell::Number(Decimal::from(reservation.room_count())),
        Cell::Text(if reservation.paid_onsite { "Yes" } else { "No" }.into()),
        Cell::Text(created_at),
    ]
}

#[tracing::instrument(skip(reservations), fields(rows = reservations.len()))]
pub fn reservations_workbook(
    reservations: &[Reservation],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Reservations")?;
    for (col, title) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, (title.len() as f64).max(12.0) + 2.0)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (index, reservation) in reservations.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in export_row(reservation).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                Cell::Number(value) => {
                    let value = value.to_f64().unwrap_or_default();
                    sheet.write_number_with_format(row, col, value, &money)?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}
