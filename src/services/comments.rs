//! Item comments service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::comment::{CommentDetails, CreateComment},
    repository::Repository,
};

#[derive(Clone)]
pub struct CommentsService {
    repository: Repository,
}

impl CommentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Leave a comment on an item the author has rented
    pub async fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        self.repository.get_item(item_id).await?;

        let now = Utc::now();
        if !self
            .repository
            .bookings
            .has_started(author_id, item_id, now)
            .await?
        {
            return Err(AppError::Validation(format!(
                "User {} did not rent item {}",
                author_id, item_id
            )));
        }

        if comment.text.trim().is_empty() {
            return Err(AppError::Validation("Comment text is empty".to_string()));
        }

        let author = self.repository.get_user(author_id).await?;
        let created = self
            .repository
            .comments
            .create(item_id, author.id, &comment.text, now)
            .await?;
        tracing::info!(comment_id = created.id, item_id, author_id, "Added comment");

        Ok(CommentDetails {
            id: created.id,
            text: created.text,
            author_name: author.name,
            created: created.created,
        })
    }
}
