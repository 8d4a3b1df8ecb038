//! User management service

use crate::{
    config::UpdateMissPolicy,
    error::{AppError, AppResult},
    models::{NewUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    update_miss: UpdateMissPolicy,
}

impl UsersService {
    pub fn new(repository: Repository, update_miss: UpdateMissPolicy) -> Self {
        Self { repository, update_miss }
    }

    /// Persist a new user and return it with its assigned id
    pub async fn create_user(&self, user: &NewUser) -> AppResult<User> {
        let created = self.repository.users.insert(user).await?;
        tracing::info!("Created user id={}", created.id);
        Ok(created)
    }

    /// Overwrite user `user_id` with the given data.
    ///
    /// A missing row is handled according to the configured update-miss
    /// policy: `Reject` fails with not-found, `Insert` stores the data as a
    /// new user whose id is generated by the store, not `user_id`.
    pub async fn update_user(&self, user_id: i64, user: &NewUser) -> AppResult<User> {
        if let Some(updated) = self.repository.users.update(user_id, user).await? {
            tracing::info!("Updated user id={}", updated.id);
            return Ok(updated);
        }

        match self.update_miss {
            UpdateMissPolicy::Reject => {
                Err(AppError::NotFound(format!("User with id {} not found", user_id)))
            }
            UpdateMissPolicy::Insert => {
                let created = self.repository.users.insert(user).await?;
                tracing::warn!(
                    "User id={} not found for update, inserted as new user id={}",
                    user_id,
                    created.id
                );
                Ok(created)
            }
        }
    }

    pub async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        tracing::debug!("Get user id={}", id);
        self.repository
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn delete_user_by_id(&self, id: i64) -> AppResult<()> {
        if !self.repository.users.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        tracing::info!("Deleted user id={}", id);
        Ok(())
    }

    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.find_all().await
    }
}
