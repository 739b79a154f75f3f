//! Item request (want-ad) service

use std::collections::HashMap;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::Item,
        item_request::{ItemRequest, ItemRequestDetails, ItemRequestInput},
        Page,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemRequestsService {
    repository: Repository,
}

impl ItemRequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create_request(
        &self,
        user_id: i64,
        input: ItemRequestInput,
    ) -> AppResult<ItemRequestDetails> {
        self.repository.get_user(user_id).await?;
        input.validate()?;

        let request = self
            .repository
            .requests
            .create(user_id, &input.description, Utc::now())
            .await?;
        tracing::info!(request_id = request.id, requester_id = user_id, "Created item request");
        Ok(ItemRequestDetails::new(request, Vec::new()))
    }

    /// Change the description; only the requester may do so
    pub async fn update_request(
        &self,
        user_id: i64,
        request_id: i64,
        input: ItemRequestInput,
    ) -> AppResult<ItemRequestDetails> {
        let request = self.repository.get_request(request_id).await?;
        if request.requester_id != user_id {
            return Err(AppError::Forbidden(format!(
                "User {} did not create request {}",
                user_id, request_id
            )));
        }
        input.validate()?;

        let updated = self
            .repository
            .requests
            .update_description(request_id, &input.description)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Item request with id {} not found", request_id))
            })?;
        tracing::info!(request_id, "Updated item request");

        let mut details = self.with_items(vec![updated]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("Updated request vanished".to_string()))
    }

    /// The user's own requests, newest first
    pub async fn list_own(&self, user_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.get_user(user_id).await?;
        let requests = self.repository.requests.list_by_requester(user_id).await?;
        self.with_items(requests).await
    }

    /// Requests made by everyone else, newest first
    pub async fn list_others(&self, user_id: i64, page: Page) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.get_user(user_id).await?;
        let requests = self.repository.requests.list_others(user_id, page).await?;
        self.with_items(requests).await
    }

    pub async fn get_request(&self, user_id: i64, request_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.get_user(user_id).await?;
        let request = self.repository.get_request(request_id).await?;

        let mut details = self.with_items(vec![request]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::Internal("Fetched request vanished".to_string()))
    }

    /// Attach the items answering each request, keeping the request order
    async fn with_items(&self, requests: Vec<ItemRequest>) -> AppResult<Vec<ItemRequestDetails>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let mut by_request: HashMap<i64, Vec<Item>> = HashMap::new();
        for item in self.repository.items.list_by_requests(&ids).await? {
            if let Some(request_id) = item.request_id {
                by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = by_request.remove(&request.id).unwrap_or_default();
                ItemRequestDetails::new(request, items)
            })
            .collect())
    }
}
