//! Item requests repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::ItemRequestStore;
use crate::{
    error::AppResult,
    models::{item_request::ItemRequest, Page},
};

#[derive(Clone)]
pub struct ItemRequestsRepository {
    pool: Pool<Postgres>,
}

impl ItemRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRequestStore for ItemRequestsRepository {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<ItemRequest>> {
        let request = sqlx::query_as::<_, ItemRequest>("SELECT * FROM item_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn create(
        &self,
        requester_id: i64,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<ItemRequest> {
        let row = sqlx::query_as::<_, ItemRequest>(
            r#"
            INSERT INTO item_requests (description, requester_id, created)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(requester_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_description(
        &self,
        id: i64,
        description: &str,
    ) -> AppResult<Option<ItemRequest>> {
        let row = sqlx::query_as::<_, ItemRequest>(
            "UPDATE item_requests SET description = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_by_requester(&self, requester_id: i64) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query_as::<_, ItemRequest>(
            "SELECT * FROM item_requests WHERE requester_id = $1 ORDER BY created DESC, id DESC",
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_others(&self, user_id: i64, page: Page) -> AppResult<Vec<ItemRequest>> {
        let rows = sqlx::query_as::<_, ItemRequest>(
            r#"
            SELECT * FROM item_requests
            WHERE requester_id <> $1
            ORDER BY created DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
