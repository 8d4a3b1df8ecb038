//! User (person) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::error::{AppError, AppResult};

/// Person record as stored in the `person` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub title: String,
    pub age: i32,
}

/// User payload as received on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(
        required(message = "Full name is required"),
        custom(function = "not_blank", message = "Full name must not be blank"),
        length(max = 255, message = "Full name must be at most 255 characters")
    )]
    pub full_name: Option<String>,
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title must not be blank"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Age is required"),
        range(min = 1, message = "Age must be greater than zero")
    )]
    pub age: Option<i32>,
}

/// Validated user data, ready to be written.
///
/// Only obtainable through [`NewUser::new`] or `TryFrom<UserRequest>`, so
/// holding one means every field passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    full_name: String,
    title: String,
    age: i32,
}

impl NewUser {
    pub fn new(full_name: impl Into<String>, title: impl Into<String>, age: i32) -> AppResult<Self> {
        UserRequest {
            full_name: Some(full_name.into()),
            title: Some(title.into()),
            age: Some(age),
        }
        .try_into()
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Materialize as a stored record with the given id
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            full_name: self.full_name,
            title: self.title,
            age: self.age,
        }
    }
}

impl TryFrom<UserRequest> for NewUser {
    type Error = AppError;

    fn try_from(request: UserRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        match (request.full_name, request.title, request.age) {
            (Some(full_name), Some(title), Some(age)) => Ok(Self { full_name, title, age }),
            // unreachable once `required` passed
            _ => Err(AppError::Validation("Not all fields for the user are filled in".to_string())),
        }
    }
}
