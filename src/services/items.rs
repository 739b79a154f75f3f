//! Item catalog service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::BookingShort,
        item::{CreateItem, Item, ItemDetails, ItemSearchQuery, UpdateItem},
        Page,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List an item owned by `owner_id`
    pub async fn create_item(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        self.repository.get_user(owner_id).await?;
        item.validate()?;
        if let Some(request_id) = item.request_id {
            self.repository.get_request(request_id).await?;
        }

        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!(item_id = created.id, owner_id, "Created item");
        Ok(created)
    }

    /// Apply a partial update; only the owner may change an item
    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        patch: UpdateItem,
    ) -> AppResult<Item> {
        let mut item = self.repository.get_item(item_id).await?;
        if item.owner_id != user_id {
            return Err(AppError::Forbidden(format!(
                "User {} does not own item {}",
                user_id, item_id
            )));
        }

        if patch.owner_id.is_some_and(|owner| owner != item.owner_id) {
            return Err(AppError::Validation("Item owner cannot be changed".to_string()));
        }
        if patch.request_id.is_some_and(|request| Some(request) != item.request_id) {
            return Err(AppError::Validation(
                "Item request cannot be changed".to_string(),
            ));
        }
        patch.validate()?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }

        let updated = self.repository.items.update(&item).await?;
        tracing::info!(item_id, "Updated item");
        Ok(updated)
    }

    /// Item with comments, plus surrounding bookings when the caller owns it
    pub async fn get_item(&self, user_id: i64, item_id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.get_item(item_id).await?;
        let is_owner = item.owner_id == user_id;
        self.details(item, is_owner).await
    }

    /// Items of the owner ordered by id
    pub async fn list_owner_items(&self, owner_id: i64, page: Page) -> AppResult<Vec<ItemDetails>> {
        self.repository.get_user(owner_id).await?;

        let items = self.repository.items.list_by_owner(owner_id, page).await?;
        let mut details = Vec::with_capacity(items.len());
        for item in items {
            details.push(self.details(item, true).await?);
        }
        Ok(details)
    }

    /// Available items mentioning the text in their name or description
    pub async fn search(&self, query: &ItemSearchQuery) -> AppResult<Vec<Item>> {
        let page = Page::new(query.from, query.size)?;
        let text = query.text.as_deref().unwrap_or_default().trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("Searching items for '{}'", text);
        self.repository.items.search(text, page).await
    }

    async fn details(&self, item: Item, with_bookings: bool) -> AppResult<ItemDetails> {
        let comments = self.repository.comments.list_by_item(item.id).await?;
        let item_id = item.id;
        let mut details = ItemDetails::new(item, comments);

        if with_bookings {
            let now = Utc::now();
            details.last_booking = self
                .repository
                .bookings
                .last_for_item(item_id, now)
                .await?
                .map(BookingShort::from);
            details.next_booking = self
                .repository
                .bookings
                .next_for_item(item_id, now)
                .await?
                .map(BookingShort::from);
        }

        Ok(details)
    }
}
