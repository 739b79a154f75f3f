//! Repository layer for database operations
//!
//! Each entity has a store trait. [`Repository`] bundles one implementation
//! of each: PostgreSQL for the running server, [`memory::MemoryStore`] for
//! tests and local experiments.

pub mod bookings;
pub mod comments;
pub mod item_requests;
pub mod items;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingState, BookingStatus, NewBooking},
        comment::{Comment, CommentDetails},
        item::{CreateItem, Item},
        item_request::ItemRequest,
        user::{CreateUser, UpdateUser, User},
        Page,
    },
};

pub(crate) const UNIQUE_VIOLATION: &str = "23505";
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";
pub(crate) const EXCLUSION_VIOLATION: &str = "23P01";

/// Whether a database error carries the given SQLSTATE code
pub(crate) fn has_db_code(err: &sqlx::Error, code: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(code))
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn list(&self) -> AppResult<Vec<User>>;

    /// Fails with `Conflict` when the email is taken
    async fn create(&self, user: &CreateUser) -> AppResult<User>;

    /// Returns `None` when the user does not exist
    async fn update(&self, id: i64, user: &UpdateUser) -> AppResult<Option<User>>;

    /// Returns `false` when the user does not exist
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Item>>;

    async fn create(&self, owner_id: i64, item: &CreateItem) -> AppResult<Item>;

    /// Persist name, description and availability
    async fn update(&self, item: &Item) -> AppResult<Item>;

    async fn list_by_owner(&self, owner_id: i64, page: Page) -> AppResult<Vec<Item>>;

    /// Available items whose name or description contains `text`
    async fn search(&self, text: &str, page: Page) -> AppResult<Vec<Item>>;

    async fn list_by_requests(&self, request_ids: &[i64]) -> AppResult<Vec<Item>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>>;

    async fn create(
        &self,
        requester_id: i64,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<ItemRequest>;

    async fn update_description(&self, id: i64, description: &str)
        -> AppResult<Option<ItemRequest>>;

    /// Newest first
    async fn list_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>>;

    /// Requests of everyone but `user_id`, newest first
    async fn list_others(&self, user_id: i64, page: Page) -> AppResult<Vec<ItemRequest>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Booking>>;

    /// Insert a booking.
    ///
    /// Fails with `BookingOverlap` when another booking holding its interval
    /// overlaps, even if a concurrent insert raced the caller's own check.
    async fn create(&self, booking: &NewBooking) -> AppResult<Booking>;

    async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Option<Booking>>;

    /// Whether a booking of the item that still holds its interval overlaps `[start, end)`
    async fn has_overlap(
        &self,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Bookings made by `booker_id`, newest start first
    async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>>;

    /// Bookings of items owned by `owner_id`, newest start first
    async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>>;

    /// Latest booking of the item started at or before `now`
    async fn last_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>>;

    /// Earliest booking of the item starting after `now`
    async fn next_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>>;

    /// Whether `booker_id` has a booking of the item that started before `now`
    async fn has_started(&self, booker_id: i64, item_id: i64, now: DateTime<Utc>)
        -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> AppResult<Comment>;

    /// Oldest first, with author names
    async fn list_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>>;
}

/// Main repository struct holding one store per entity
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub items: Arc<dyn ItemStore>,
    pub requests: Arc<dyn ItemRequestStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            items: Arc::new(items::ItemsRepository::new(pool.clone())),
            requests: Arc::new(item_requests::ItemRequestsRepository::new(pool.clone())),
            bookings: Arc::new(bookings::BookingsRepository::new(pool.clone())),
            comments: Arc::new(comments::CommentsRepository::new(pool)),
        }
    }

    /// Create a repository whose stores share one in-memory database
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            items: Arc::new(store.clone()),
            requests: Arc::new(store.clone()),
            bookings: Arc::new(store.clone()),
            comments: Arc::new(store),
        }
    }
}

impl Repository {
    /// Fetch a user, failing with `NotFound` when absent
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Fetch an item, failing with `NotFound` when absent
    pub async fn get_item(&self, id: i64) -> AppResult<Item> {
        self.items
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Fetch an item request, failing with `NotFound` when absent
    pub async fn get_request(&self, id: i64) -> AppResult<ItemRequest> {
        self.requests
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item request with id {} not found", id)))
    }

    /// Fetch a booking, failing with `NotFound` when absent
    pub async fn get_booking(&self, id: i64) -> AppResult<Booking> {
        self.bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }
}
