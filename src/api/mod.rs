//! API handlers for Shelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Optional request id header, logged with create requests
pub const REQUEST_ID_HEADER: &str = "rqid";

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users with books
        .route(
            "/user",
            get(users::get_all_users_with_books).post(users::create_user_with_books),
        )
        .route(
            "/user/:user_id",
            get(users::get_user_with_books)
                .put(users::update_user_with_books)
                .delete(users::delete_user_with_books),
        )
        .route("/user/:user_id/books", get(books::list_user_books))
        // Books
        .route(
            "/books/:book_id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
