//! Bookings repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::{has_db_code, BookingStore, EXCLUSION_VIOLATION};
use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingState, BookingStatus, NewBooking},
        Page,
    },
};

const SELECT_BOOKING: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.item_id, i.name AS item_name,
           b.booker_id, b.status
    FROM bookings b
    JOIN items i ON i.id = b.item_id
"#;

/// Statuses that release the booked interval
const RELEASED: &str = "b.status NOT IN ('REJECTED', 'CANCELED')";

/// Whose bookings a listing returns
#[derive(Debug, Clone, Copy)]
enum Role {
    Booker,
    Owner,
}

impl Role {
    fn condition(self) -> &'static str {
        match self {
            Role::Booker => "b.booker_id = $1",
            Role::Owner => "i.owner_id = $1",
        }
    }
}

/// Extra condition of a listing filter, and whether it binds `now` as `$4`
fn state_condition(state: BookingState) -> (&'static str, bool) {
    match state {
        BookingState::All => ("", false),
        BookingState::Current => (" AND b.start_date < $4 AND b.end_date > $4", true),
        BookingState::Past => (" AND b.end_date < $4", true),
        BookingState::Future => (" AND b.start_date > $4", true),
        BookingState::Waiting => (" AND b.status = 'WAITING'", false),
        BookingState::Rejected => (" AND b.status = 'REJECTED'", false),
    }
}

fn listing_query(role: Role, state: BookingState) -> (String, bool) {
    let (filter, binds_now) = state_condition(state);
    let query = format!(
        "{} WHERE {}{} ORDER BY b.start_date DESC, b.id DESC LIMIT $2 OFFSET $3",
        SELECT_BOOKING,
        role.condition(),
        filter
    );
    (query, binds_now)
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn list(
        &self,
        role: Role,
        user_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>> {
        let (query, binds_now) = listing_query(role, state);
        tracing::debug!("Listing bookings for {:?} {} with state {}", role, user_id, state.as_str());

        let mut builder = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset);
        if binds_now {
            builder = builder.bind(now);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        let query = format!("{} WHERE b.id = $1", SELECT_BOOKING);
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        // The bookings_no_overlap exclusion constraint rejects concurrent overlapping inserts
        sqlx::query_as::<_, Booking>(
            r#"
            WITH b AS (
                INSERT INTO bookings (item_id, booker_id, start_date, end_date, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT b.id, b.start_date, b.end_date, b.item_id, i.name AS item_name,
                   b.booker_id, b.status
            FROM b
            JOIN items i ON i.id = b.item_id
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.booker_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if has_db_code(&e, EXCLUSION_VIOLATION) {
                AppError::BookingOverlap(format!(
                    "Item {} is already booked for the requested period",
                    booking.item_id
                ))
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            WITH b AS (
                UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *
            )
            SELECT b.id, b.start_date, b.end_date, b.item_id, i.name AS item_name,
                   b.booker_id, b.status
            FROM b
            JOIN items i ON i.id = b.item_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if has_db_code(&e, EXCLUSION_VIOLATION) {
                AppError::BookingOverlap(format!(
                    "Booking {} clashes with another booking of the item",
                    id
                ))
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(booking)
    }

    async fn has_overlap(
        &self,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let query = format!(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings b
                WHERE b.item_id = $1 AND {}
                  AND b.start_date < $3 AND b.end_date > $2
            )
            "#,
            RELEASED
        );
        let exists: bool = sqlx::query_scalar(&query)
            .bind(item_id)
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>> {
        self.list(Role::Booker, booker_id, state, now, page).await
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>> {
        self.list(Role::Owner, owner_id, state, now, page).await
    }

    async fn last_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>> {
        let query = format!(
            "{} WHERE b.item_id = $1 AND {} AND b.start_date <= $2 ORDER BY b.start_date DESC LIMIT 1",
            SELECT_BOOKING, RELEASED
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(item_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn next_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>> {
        let query = format!(
            "{} WHERE b.item_id = $1 AND {} AND b.start_date > $2 ORDER BY b.start_date ASC LIMIT 1",
            SELECT_BOOKING, RELEASED
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(item_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn has_started(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1 AND item_id = $2 AND start_date < $3
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
