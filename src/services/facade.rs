//! User-with-books orchestration
//!
//! Every operation is a plain sequence of service calls: the user first,
//! then its books one at a time. There is no surrounding transaction, so a
//! failure part way through leaves the earlier writes in place.

use crate::{
    error::AppResult,
    models::{UserBookRequest, UserBookResponse},
};

use super::{books::BooksService, users::UsersService};

#[derive(Clone)]
pub struct UserBooksFacade {
    users: UsersService,
    books: BooksService,
}

impl UserBooksFacade {
    pub fn new(users: UsersService, books: BooksService) -> Self {
        Self { users, books }
    }

    /// Create a user, then each of its books in request order.
    ///
    /// The whole request is validated before the first write. The returned
    /// book ids follow the request order.
    pub async fn create_user_with_books(&self, request: UserBookRequest) -> AppResult<UserBookResponse> {
        let (user, drafts) = request.into_drafts()?;

        let created_user = self.users.create_user(&user).await?;

        let mut books_id_list = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let book = self.books.create_book(&draft.owned_by(created_user.id)).await?;
            books_id_list.push(book.id);
        }
        tracing::info!(
            "Created user id={} with books {:?}",
            created_user.id,
            books_id_list
        );

        Ok(UserBookResponse {
            user_id: created_user.id,
            books_id_list,
        })
    }

    /// Update user `user_id` and attach the requested books as new books.
    ///
    /// Existing books are never modified or removed. The response lists
    /// every book the user owns afterwards, not only the added ones.
    ///
    /// Under [`UpdateMissPolicy::Insert`](crate::config::UpdateMissPolicy)
    /// a missing user is stored under a new id, but the books are still
    /// stamped with `user_id`. Any book in the request then fails with a
    /// conflict and the newly inserted user stays behind.
    pub async fn update_user_with_books(
        &self,
        request: UserBookRequest,
        user_id: i64,
    ) -> AppResult<UserBookResponse> {
        let (user, drafts) = request.into_drafts()?;

        self.users.update_user(user_id, &user).await?;

        let mut added = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let book = self.books.create_book(&draft.owned_by(user_id)).await?;
            added.push(book.id);
        }
        tracing::info!("Added books {:?} to user id={}", added, user_id);

        Ok(UserBookResponse {
            user_id,
            books_id_list: self.book_ids_of(user_id).await?,
        })
    }

    pub async fn get_user_with_books(&self, user_id: i64) -> AppResult<UserBookResponse> {
        let user = self.users.get_user_by_id(user_id).await?;
        Ok(UserBookResponse {
            user_id: user.id,
            books_id_list: self.book_ids_of(user.id).await?,
        })
    }

    /// Every user with its book ids, one book query per user
    pub async fn get_all(&self) -> AppResult<Vec<UserBookResponse>> {
        let users = self.users.find_all().await?;
        let mut responses = Vec::with_capacity(users.len());
        for user in users {
            responses.push(UserBookResponse {
                user_id: user.id,
                books_id_list: self.book_ids_of(user.id).await?,
            });
        }
        Ok(responses)
    }

    /// Delete the user's books, then the user
    pub async fn delete_user_with_books(&self, user_id: i64) -> AppResult<()> {
        self.books.delete_books_by_user_id(user_id).await?;
        self.users.delete_user_by_id(user_id).await?;
        tracing::info!("Deleted user id={} with books", user_id);
        Ok(())
    }

    async fn book_ids_of(&self, user_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .books
            .get_books_by_user_id(user_id)
            .await?
            .into_iter()
            .map(|book| book.id)
            .collect())
    }
}
