//! Business logic services

pub mod books;
pub mod facade;
pub mod users;

use crate::{config::PersistenceConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub books: books::BooksService,
    pub user_books: facade::UserBooksFacade,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, persistence: &PersistenceConfig) -> Self {
        let users = users::UsersService::new(repository.clone(), persistence.update_miss);
        let books = books::BooksService::new(repository, persistence.update_miss);
        Self {
            user_books: facade::UserBooksFacade::new(users.clone(), books.clone()),
            users,
            books,
        }
    }
}
