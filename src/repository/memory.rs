//! In-memory implementation of every store, for tests and local runs
//!
//! All stores share one set of tables behind a single lock, so booking
//! listings can see item owners and an overlap check and its insert happen
//! under the same write guard.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{BookingStore, CommentStore, ItemRequestStore, ItemStore, UserStore};
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

#[derive(Debug, Clone)]
struct BookingRow {
    id: i64,
    item_id: i64,
    booker_id: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: BookingStatus,
}

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    requests: BTreeMap<i64, ItemRequest>,
    bookings: BTreeMap<i64, BookingRow>,
    comments: BTreeMap<i64, Comment>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn hydrate(&self, row: &BookingRow) -> Booking {
        Booking {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            item_id: row.item_id,
            item_name: self
                .items
                .get(&row.item_id)
                .map(|i| i.name.clone())
                .unwrap_or_default(),
            booker_id: row.booker_id,
            status: row.status,
        }
    }

    fn owner_of(&self, item_id: i64) -> Option<i64> {
        self.items.get(&item_id).map(|i| i.owner_id)
    }

    /// Whether a booking other than `except` holds part of `[start, end)` on the item
    fn overlaps(
        &self,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        except: Option<i64>,
    ) -> bool {
        self.bookings.values().any(|b| {
            b.item_id == item_id
                && Some(b.id) != except
                && b.status.holds_interval()
                && b.start_date < end
                && start < b.end_date
        })
    }

    /// Matching bookings, newest start first
    fn listing(
        &self,
        keep: impl Fn(&BookingRow) -> bool,
        state: BookingState,
        now: DateTime<Utc>,
    ) -> Vec<Booking> {
        let mut rows: Vec<Booking> = self
            .bookings
            .values()
            .filter(|&b| keep(b))
            .map(|b| self.hydrate(b))
            .filter(|b| b.matches(state, now))
            .collect();
        rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        rows
    }

    fn item_bookings(&self, item_id: i64) -> impl Iterator<Item = &BookingRow> {
        self.bookings
            .values()
            .filter(move |b| b.item_id == item_id && b.status.holds_interval())
    }
}

/// Shared in-memory database
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }

        let created = User {
            id: tables.next_id(),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, user: &UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &user.email {
            if tables.email_taken(email, Some(id)) {
                return Err(AppError::Conflict(format!(
                    "Email {} is already registered",
                    email
                )));
            }
        }

        let Some(existing) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &user.name {
            existing.name = name.clone();
        }
        if let Some(email) = &user.email {
            existing.email = email.clone();
        }
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let referenced = tables.items.values().any(|i| i.owner_id == id)
            || tables.requests.values().any(|r| r.requester_id == id)
            || tables.bookings.values().any(|b| b.booker_id == id)
            || tables.comments.values().any(|c| c.author_id == id);
        if referenced && tables.users.contains_key(&id) {
            return Err(AppError::Conflict(format!("User {} is still referenced", id)));
        }
        Ok(tables.users.remove(&id).is_some())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn create(&self, owner_id: i64, item: &CreateItem) -> AppResult<Item> {
        let mut tables = self.tables.write().await;
        let created = Item {
            id: tables.next_id(),
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available.unwrap_or(true),
            owner_id,
            request_id: item.request_id,
        };
        tables.items.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, item: &Item) -> AppResult<Item> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .items
            .get_mut(&item.id)
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item.id)))?;
        existing.name = item.name.clone();
        existing.description = item.description.clone();
        existing.available = item.available;
        Ok(existing.clone())
    }

    async fn list_by_owner(&self, owner_id: i64, page: Page) -> AppResult<Vec<Item>> {
        let tables = self.tables.read().await;
        let items = tables
            .items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(page.slice(items))
    }

    async fn search(&self, text: &str, page: Page) -> AppResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let tables = self.tables.read().await;
        let items = tables
            .items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(page.slice(items))
    }

    async fn list_by_requests(&self, request_ids: &[i64]) -> AppResult<Vec<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|i| i.request_id.is_some_and(|r| request_ids.contains(&r)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ItemRequestStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn create(
        &self,
        requester_id: i64,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<ItemRequest> {
        let mut tables = self.tables.write().await;
        let request = ItemRequest {
            id: tables.next_id(),
            description: description.to_string(),
            requester_id,
            created,
        };
        tables.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update_description(
        &self,
        id: i64,
        description: &str,
    ) -> AppResult<Option<ItemRequest>> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.get_mut(&id).map(|r| {
            r.description = description.to_string();
            r.clone()
        }))
    }

    async fn list_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ItemRequest> = tables
            .requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn list_others(&self, user_id: i64, page: Page) -> AppResult<Vec<ItemRequest>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ItemRequest> = tables
            .requests
            .values()
            .filter(|r| r.requester_id != user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(page.slice(rows))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables.bookings.get(&id).map(|b| tables.hydrate(b)))
    }

    async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let mut tables = self.tables.write().await;
        if booking.status.holds_interval()
            && tables.overlaps(booking.item_id, booking.start_date, booking.end_date, None)
        {
            return Err(AppError::BookingOverlap(format!(
                "Item {} is already booked for the requested period",
                booking.item_id
            )));
        }

        let row = BookingRow {
            id: tables.next_id(),
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
        };
        let created = tables.hydrate(&row);
        tables.bookings.insert(row.id, row);
        Ok(created)
    }

    async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Option<Booking>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.bookings.get(&id).cloned() else {
            return Ok(None);
        };
        if status.holds_interval()
            && tables.overlaps(row.item_id, row.start_date, row.end_date, Some(row.id))
        {
            return Err(AppError::BookingOverlap(format!(
                "Item {} is already booked for the requested period",
                row.item_id
            )));
        }

        let row = BookingRow { status, ..row };
        let updated = tables.hydrate(&row);
        tables.bookings.insert(row.id, row);
        Ok(Some(updated))
    }

    async fn has_overlap(
        &self,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        Ok(self.tables.read().await.overlaps(item_id, start, end, None))
    }

    async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        let rows = tables.listing(|b| b.booker_id == booker_id, state, now);
        Ok(page.slice(rows))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: DateTime<Utc>,
        page: Page,
    ) -> AppResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        let rows = tables.listing(|b| tables.owner_of(b.item_id) == Some(owner_id), state, now);
        Ok(page.slice(rows))
    }

    async fn last_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .item_bookings(item_id)
            .filter(|b| b.start_date <= now)
            .max_by_key(|b| b.start_date)
            .map(|b| tables.hydrate(b)))
    }

    async fn next_for_item(&self, item_id: i64, now: DateTime<Utc>) -> AppResult<Option<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .item_bookings(item_id)
            .filter(|b| b.start_date > now)
            .min_by_key(|b| b.start_date)
            .map(|b| tables.hydrate(b)))
    }

    async fn has_started(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .values()
            .any(|b| b.booker_id == booker_id && b.item_id == item_id && b.start_date < now))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> AppResult<Comment> {
        let mut tables = self.tables.write().await;
        let comment = Comment {
            id: tables.next_id(),
            text: text.to_string(),
            item_id,
            author_id,
            created,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.item_id == item_id)
            .filter_map(|c| {
                tables.users.get(&c.author_id).map(|author| CommentDetails {
                    id: c.id,
                    text: c.text.clone(),
                    author_name: author.name.clone(),
                    created: c.created,
                })
            })
            .collect())
    }
}
