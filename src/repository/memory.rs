//! In-process store backend
//!
//! Mirrors the Postgres schema: ids come from per-table sequences starting
//! at 1 and the `book.user_id` foreign key is enforced on every write.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook, NewUser, User},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    books: BTreeMap<i64, Book>,
    last_user_id: i64,
    last_book_id: i64,
}

impl Tables {
    fn check_owner(&self, book: &NewBook) -> AppResult<()> {
        if self.users.contains_key(&book.user_id()) {
            Ok(())
        } else {
            Err(AppError::Conflict(format!("User {} does not exist", book.user_id())))
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;
        let row = user.clone().into_user(tables.last_user_id);
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, user: &NewUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|row| {
            *row = user.clone().into_user(id);
            row.clone()
        }))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.users.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|b| b.user_id == id) {
            return Err(AppError::Conflict(format!("User {} still owns books", id)));
        }
        Ok(tables.users.remove(&id).is_some())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        tables.check_owner(book)?;
        tables.last_book_id += 1;
        let row = book.clone().into_book(tables.last_book_id);
        tables.books.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&id) {
            return Ok(None);
        }
        tables.check_owner(book)?;
        let row = book.clone().into_book(id);
        tables.books.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Book>> {
        Ok(self
            .tables
            .read()
            .await
            .books
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.books.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.books.remove(&id).is_some())
    }

    async fn delete_by_user_id(&self, user_id: i64) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.books.len();
        tables.books.retain(|_, b| b.user_id != user_id);
        Ok((before - tables.books.len()) as u64)
    }
}
