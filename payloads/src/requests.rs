use crate::{HotelId, PricingDay, RoomSelection};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const SEARCH_MAX_LEN: usize = 255;

/// A room type and how many of them, as picked in a reservation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_type: String,
    pub count: u32,
}

/// Validation result for the rooms picked in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRequestValidation {
    Valid,
    NoRooms,
    MissingRoomType,
    ZeroCount,
    DuplicateRoomType(String),
}

impl RoomRequestValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::NoRooms => Some("At least one room must be selected".into()),
            Self::MissingRoomType => Some("Every room needs a room type".into()),
            Self::ZeroCount => {
                Some("Room count must be at least 1".into())
            }
            Self::DuplicateRoomType(room_type) => {
                Some(format!("Room type {room_type} was selected twice"))
            }
        }
    }
}

/// Validate the rooms of a quote or relocation before any pricing happens.
///
/// Rules:
/// - at least one room
/// - every room names a room type
/// - every count is at least 1
/// - no room type appears twice
pub fn validate_room_requests(rooms: &[RoomRequest]) -> RoomRequestValidation {
    if rooms.is_empty() {
        return RoomRequestValidation::NoRooms;
    }
    let mut seen = std::collections::HashSet::new();
    for room in rooms {
        if room.room_type.trim().is_empty() {
            return RoomRequestValidation::MissingRoomType;
        }
        if room.count < 1 {
            return RoomRequestValidation::ZeroCount;
        }
        if !seen.insert(room.room_type.as_str()) {
            return RoomRequestValidation::DuplicateRoomType(
                room.room_type.clone(),
            );
        }
    }
    RoomRequestValidation::Valid
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub hotel_id: HotelId,
    pub checkin: Date,
    /// Exclusive.
    pub checkout: Date,
    pub rooms: Vec<RoomRequest>,
}

/// Which per-day amount an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Price,
    RootPrice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributeTotal {
    pub days: Vec<PricingDay>,
    pub total: Decimal,
    pub field: PriceField,
}

/// Fields to overwrite on a single pricing day. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEdit {
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub root_price: Option<Decimal>,
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditDay {
    pub days: Vec<PricingDay>,
    pub date: Date,
    pub edit: DayEdit,
}

/// Replace the priced rooms of a reservation with edited ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePricing {
    pub rooms: Vec<RoomSelection>,
}

/// Move a reservation to another hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateReservation {
    pub target_hotel_id: HotelId,
    /// Room types at the target hotel. If empty, the reservation's current
    /// room types and counts are kept.
    #[serde(default)]
    pub rooms: Vec<RoomRequest>,
}

/// How much to capture when payment is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum DepositOption {
    CommissionOnly,
    CommissionPlusOneNight,
    FullAmount,
    Custom(Decimal),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureDeposit {
    pub option: DepositOption,
}

/// Fixed predicates offered above the reservation table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReservationFilter {
    #[default]
    All,
    CheckinToday,
    CheckoutToday,
    PaymentTriggered,
    Unpaid,
    Paid,
    Cancelled,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    ConfirmationNumber,
    Name,
    HotelName,
    Status,
    CheckinDate,
    CheckoutDate,
    TotalAmount,
    PaidAmount,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Advance the three-state sort toggle for a column header click.
///
/// The clicked column cycles asc → desc → unsorted. Clicking a column other
/// than the sorted one starts it at asc.
pub fn toggle_sort(
    current: Option<SortState>,
    column: SortColumn,
) -> Option<SortState> {
    let asc = SortState {
        column,
        direction: SortDirection::Asc,
    };
    match current {
        Some(state) if state.column == column => match state.direction {
            SortDirection::Asc => Some(SortState {
                column,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(asc),
    }
}

/// Query string of the reservation table and export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationQuery {
    #[serde(default)]
    pub filter: ReservationFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<crate::HotelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortColumn>,
    /// Ignored without `sort`; defaults to asc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    /// 1-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ReservationQuery {
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort.map(|column| SortState {
            column,
            direction: self.direction.unwrap_or(SortDirection::Asc),
        })
    }

    pub fn set_sort(&mut self, state: Option<SortState>) {
        self.sort = state.map(|s| s.column);
        self.direction = state.map(|s| s.direction);
    }

    /// The search term, if it has any content.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyQuery {
    pub from: Date,
    /// Exclusive.
    pub to: Date,
}
