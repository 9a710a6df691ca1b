use api::backend::BackendService;
use api::time::TimeSource;

pub mod mock;
use api::{Config, telemetry};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use payloads::{
    Hotel, HotelId, PaymentStatus, RateCalendarEntry, Reservation,
    ReservationId, ReservationStatus, RoomType, requests::RoomRequest,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
    pub time_source: TimeSource,
    /// The in-memory booking backend the app talks to.
    pub backend: BackendService,
}

/// Functions to populate test data
///
/// Using anyhow::Result lets us get a backtrace from when the error was fist
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    /// Insert the two sample hotels.
    pub fn seed_hotels(&self) -> (Hotel, Hotel) {
        let seaside = seaside_hotel();
        let harbor = harbor_hotel();
        self.backend.insert_hotel(seaside.clone());
        self.backend.insert_hotel(harbor.clone());
        (seaside, harbor)
    }

    /// Insert a confirmed, unpaid reservation priced from the hotel's rates.
    pub fn book(
        &self,
        hotel: &Hotel,
        booking: Booking,
    ) -> anyhow::Result<Reservation> {
        let picked = pricing::price_rooms(
            hotel,
            &booking.rooms,
            booking.checkin,
            booking.checkout,
        )?;
        let summary = pricing::summarize(&picked)?;
        let reservation = Reservation {
            id: ReservationId(booking.id.clone()),
            confirmation_number: format!("HB-{}", booking.id),
            name: booking.guest.clone(),
            phone: "555-0100".into(),
            email: format!(
                "{}@example.com",
                booking.guest.to_lowercase().replace(' ', ".")
            ),
            hotel_id: hotel.id.clone(),
            hotel_name: hotel.name.clone(),
            status: ReservationStatus::Confirmed,
            checkin_date: booking.checkin,
            checkout_date: booking.checkout,
            payment_status: PaymentStatus::Unpaid,
            total_amount: summary.total_amount,
            paid_amount: Decimal::ZERO,
            commission: summary.total_commission,
            picked_rooms_type: picked,
            paid_onsite: false,
            payment_triggered: false,
            created_at: self.time_source.now(),
        };
        self.backend.insert_reservation(reservation.clone());
        Ok(reservation)
    }

    /// The mocked "today" seen by the app.
    pub fn today(&self) -> Date {
        self.time_source.today(&TimeZone::UTC)
    }
}

/// What to book with [`TestApp::book`].
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub guest: String,
    pub checkin: Date,
    pub checkout: Date,
    pub rooms: Vec<RoomRequest>,
}

impl Booking {
    /// One double room.
    pub fn new(id: &str, guest: &str, checkin: Date, checkout: Date) -> Self {
        Self {
            id: id.into(),
            guest: guest.into(),
            checkin,
            checkout,
            rooms: vec![room("dbl", 1)],
        }
    }

    pub fn rooms(mut self, rooms: Vec<RoomRequest>) -> Self {
        self.rooms = rooms;
        self
    }
}

pub fn room(room_type: &str, count: u32) -> RoomRequest {
    RoomRequest {
        room_type: room_type.into(),
        count,
    }
}

fn room_type(
    key: &str,
    display_name: &str,
    price: i64,
    root_price: i64,
    commission_rate: i64,
) -> RoomType {
    RoomType {
        room_type: key.into(),
        display_name: display_name.into(),
        price: Decimal::from(price),
        root_price: Decimal::from(root_price),
        commission_rate: Decimal::from(commission_rate),
        rate_calendar: vec![],
    }
}

/// Doubles at 100 (root 80, 10%) with a 150 (root 120) night on 2025-01-02,
/// and suites at 200 (root 160, 15%).
pub fn seaside_hotel() -> Hotel {
    let mut double = room_type("dbl", "Double", 100, 80, 10);
    double.rate_calendar = vec![RateCalendarEntry {
        date: "2025-01-02".into(),
        price: Some(Decimal::from(150)),
        root_price: Some(Decimal::from(120)),
        commission_rate: Some(Decimal::from(10)),
    }];
    Hotel {
        id: HotelId("h-seaside".into()),
        name: "Seaside Inn".into(),
        city: Some("Nice".into()),
        room_types: vec![double, room_type("suite", "Suite", 200, 160, 15)],
    }
}

/// Doubles at 90 (root 70, 10%) and twins at 80 (root 60, 10%).
pub fn harbor_hotel() -> Hotel {
    Hotel {
        id: HotelId("h-harbor".into()),
        name: "Harbor Hotel".into(),
        city: Some("Marseille".into()),
        room_types: vec![
            room_type("dbl", "Double", 90, 70, 10),
            room_type("twin", "Twin", 80, 60, 10),
        ],
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    #[cfg(any(feature = "mock-time", test))]
    let time_source = TimeSource::new("2025-01-01T00:00:00Z".parse().unwrap());

    #[cfg(not(any(feature = "mock-time", test)))]
    let time_source = TimeSource::new();

    let mut config = Config {
        backend_url: "http://127.0.0.1:9".into(),
        backend_token: secrecy::SecretBox::new(Box::new(
            "test-token".to_string(),
        )),
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        time_zone: TimeZone::UTC,
    };
    let backend = BackendService::new(&config);

    let server =
        api::build(&mut config, time_source.clone(), backend.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: reqwest::Client::new(),
        },
        time_source,
        backend,
    }
}

/// Launch the server on an OS-assigned port with an empty mock backend.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
