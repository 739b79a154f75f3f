//! Booking management service
//!
//! Validates booking requests against users and items, drives the
//! owner's approve/reject decision and serves the filtered listings.

use chrono::{DateTime, Utc};

use crate::{
    error::{AccessDenied, AppError, AppResult},
    models::booking::{
        BookingDetails, BookingListQuery, BookingStatus, CreateBooking, NewBooking,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

/// Check a requested period, first failing rule wins
pub(crate) fn validate_period(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::Validation(
                "Booking end is before its start".to_string(),
            ));
        }
    }
    if let Some(start) = start {
        if start < now {
            return Err(AppError::Validation(
                "Booking start is in the past".to_string(),
            ));
        }
    }
    match (start, end) {
        (Some(start), Some(end)) if start == end => Err(AppError::Validation(
            "Booking start and end are equal".to_string(),
        )),
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AppError::Validation(
            "Booking start and end must be set".to_string(),
        )),
    }
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Request a booking of an item
    pub async fn create_booking(
        &self,
        user_id: i64,
        request: Option<CreateBooking>,
    ) -> AppResult<BookingDetails> {
        let request =
            request.ok_or_else(|| AppError::BadRequest("Missing booking info".to_string()))?;
        self.repository.get_user(user_id).await?;

        let item_id = request
            .item_id
            .ok_or_else(|| AppError::Validation("Missing item reference".to_string()))?;
        let item = self.repository.get_item(item_id).await?;

        if !item.available {
            return Err(AppError::Validation(format!(
                "Item {} is unavailable",
                item.id
            )));
        }

        if let (Some(start), Some(end)) = (request.start, request.end) {
            if self.repository.bookings.has_overlap(item.id, start, end).await? {
                return Err(AppError::BookingOverlap(format!(
                    "Item {} is already booked for the requested period",
                    item.id
                )));
            }
        }

        if item.owner_id == user_id {
            return Err(AppError::Denied(AccessDenied::OwnerCannotBook));
        }

        let (start, end) = validate_period(request.start, request.end, Utc::now())?;

        let booking = self
            .repository
            .bookings
            .create(&NewBooking {
                item_id: item.id,
                booker_id: user_id,
                start_date: start,
                end_date: end,
                status: BookingStatus::Waiting,
            })
            .await?;

        tracing::info!(booking_id = booking.id, item_id = item.id, booker_id = user_id, "Created booking");
        Ok(booking.into())
    }

    /// Approve or reject a booking as the item owner
    pub async fn update_status(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.get_booking(booking_id).await?;
        self.repository.get_user(user_id).await?;

        if approved && booking.status == BookingStatus::Approved {
            return Err(AppError::BadRequest(format!(
                "Booking {} is already confirmed",
                booking.id
            )));
        }

        let item = self.repository.get_item(booking.item_id).await?;
        let owner = self.repository.get_user(item.owner_id).await?;
        if owner.id != user_id {
            return Err(AppError::Denied(AccessDenied::NotItemOwner));
        }

        if booking.status != BookingStatus::Waiting {
            return Err(AppError::BadRequest(format!(
                "Booking {} is already {}",
                booking.id,
                booking.status.as_str().to_lowercase()
            )));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self
            .repository
            .bookings
            .update_status(booking.id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", booking.id)))?;

        tracing::info!(booking_id = updated.id, status = ?updated.status, "Booking status changed");
        Ok(updated.into())
    }

    /// Get a booking visible to its booker and to the item owner
    pub async fn get_booking(&self, user_id: i64, booking_id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.get_booking(booking_id).await?;
        let item = self.repository.get_item(booking.item_id).await?;
        let owner = self.repository.get_user(item.owner_id).await?;
        let booker = self.repository.get_user(booking.booker_id).await?;

        if user_id != owner.id && user_id != booker.id {
            return Err(AppError::Denied(AccessDenied::NotOwnerOrBooker));
        }

        Ok(booking.into())
    }

    /// Bookings made by the user
    pub async fn list_for_booker(
        &self,
        user_id: i64,
        query: &BookingListQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.get_user(user_id).await?;
        let state = query.state()?;
        let page = query.page()?;

        let bookings = self
            .repository
            .bookings
            .list_by_booker(user_id, state, Utc::now(), page)
            .await?;
        Ok(bookings.into_iter().map(BookingDetails::from).collect())
    }

    /// Bookings of the user's items
    pub async fn list_for_owner(
        &self,
        user_id: i64,
        query: &BookingListQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.get_user(user_id).await?;
        let state = query.state()?;
        let page = query.page()?;

        let bookings = self
            .repository
            .bookings
            .list_by_owner(user_id, state, Utc::now(), page)
            .await?;
        Ok(bookings.into_iter().map(BookingDetails::from).collect())
    }
}
