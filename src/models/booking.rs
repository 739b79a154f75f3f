//! Booking model and related types

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{item::ItemShort, user::UserShort, Page};
use crate::error::{AppError, AppResult};

/// Booking lifecycle status.
///
/// Owners move a booking from `Waiting` to `Approved` or `Rejected`.
/// `Canceled` and `Past` are stored and listed but no endpoint sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
    Past,
}

impl BookingStatus {
    /// Whether the booking still holds its interval on the item
    pub fn holds_interval(self) -> bool {
        !matches!(self, BookingStatus::Rejected | BookingStatus::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
            BookingStatus::Past => "PAST",
        }
    }
}

/// Booking row joined with the booked item's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub item_id: i64,
    pub item_name: String,
    pub booker_id: i64,
    pub status: BookingStatus,
}

impl Booking {
    /// Half-open interval overlap with `[start, end)`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date < end && start < self.end_date
    }

    /// Whether the booking matches a listing filter at `now`
    pub fn matches(&self, state: BookingState, now: DateTime<Utc>) -> bool {
        match state {
            BookingState::All => true,
            BookingState::Current => self.start_date < now && self.end_date > now,
            BookingState::Past => self.end_date < now,
            BookingState::Future => self.start_date > now,
            BookingState::Waiting => self.status == BookingStatus::Waiting,
            BookingState::Rejected => self.status == BookingStatus::Rejected,
        }
    }
}

/// Booking to be inserted
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub item_id: i64,
    pub booker_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Create booking request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(required(message = "itemId must be set"))]
    pub item_id: Option<i64>,
    #[validate(required(message = "start must be set"))]
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start: Option<DateTime<Utc>>,
    #[validate(required(message = "end must be set"))]
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end: Option<DateTime<Utc>>,
}

/// RFC 3339 timestamps, or timestamps without offset read as UTC
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Booking as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: UserShort,
    pub item: ItemShort,
}

impl From<Booking> for BookingDetails {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start_date,
            end: booking.end_date,
            status: booking.status,
            booker: UserShort {
                id: booking.booker_id,
            },
            item: ItemShort {
                id: booking.item_id,
                name: booking.item_name,
            },
        }
    }
}

/// Last/next booking shown on an item to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<Booking> for BookingShort {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start_date,
            end: booking.end_date,
        }
    }
}

/// Listing filter selected by the `state` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Parse an optional keyword; no keyword means `All`
    pub fn parse(state: Option<&str>) -> AppResult<Self> {
        state.map_or(Ok(BookingState::All), str::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }
}

impl FromStr for BookingState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(AppError::UnsupportedOperation(format!(
                "Unknown state: {}",
                other
            ))),
        }
    }
}

/// Query parameters for booking listings
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default: ALL)
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl BookingListQuery {
    pub fn state(&self) -> AppResult<BookingState> {
        BookingState::parse(self.state.as_deref())
    }

    pub fn page(&self) -> AppResult<Page> {
        Page::new(self.from, self.size)
    }
}

/// Query parameters for the approval endpoint
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approved: bool,
}
