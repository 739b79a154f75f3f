//! User management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()?;

        let created = self.repository.users.create(&user).await?;
        tracing::info!(user_id = created.id, "Created user");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.get_user(id).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Update the given fields of a user
    pub async fn update_user(&self, id: i64, user: UpdateUser) -> AppResult<User> {
        user.validate()?;

        let updated = self
            .repository
            .users
            .update(id, &user)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        tracing::info!(user_id = id, "Updated user");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.repository.users.delete(id).await? {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }
}
