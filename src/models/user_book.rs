//! User-with-books aggregate request and response

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BookDraft, BookRequest, NewUser, UserRequest};
use crate::error::{AppError, AppResult};

/// Create/update request carrying a user and the books to attach to it
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBookRequest {
    pub user_request: Option<UserRequest>,
    /// Null entries are skipped
    pub book_requests: Option<Vec<Option<BookRequest>>>,
}

impl UserBookRequest {
    /// Validate the whole request up front.
    ///
    /// Fails when either part is absent or when any user/book field is
    /// invalid, so nothing is written for a malformed request. Book drafts
    /// keep the input order with null entries dropped.
    pub fn into_drafts(self) -> AppResult<(NewUser, Vec<BookDraft>)> {
        let (user_request, book_requests) = match (self.user_request, self.book_requests) {
            (Some(user), Some(books)) => (user, books),
            (user, books) => {
                return Err(AppError::Validation(format!(
                    "UserRequest is {}, BookRequests is {}",
                    presence(&user),
                    presence(&books)
                )))
            }
        };

        let user = NewUser::try_from(user_request)?;
        let books = book_requests
            .into_iter()
            .flatten()
            .map(BookDraft::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((user, books))
    }
}

fn presence<T>(value: &Option<T>) -> &'static str {
    if value.is_some() {
        "present"
    } else {
        "absent"
    }
}

/// User id with the ids of the books it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBookResponse {
    pub user_id: i64,
    pub books_id_list: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_request() -> UserRequest {
        UserRequest {
            full_name: Some("Ann".into()),
            title: Some("reader".into()),
            age: Some(30),
        }
    }

    fn book_request(title: &str) -> BookRequest {
        BookRequest {
            title: Some(title.into()),
            author: Some("X".into()),
            page_count: Some(100),
        }
    }

    #[test]
    fn test_absent_parts_are_rejected() {
        let missing_books = UserBookRequest {
            user_request: Some(user_request()),
            book_requests: None,
        };
        let err = missing_books.into_drafts().unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("BookRequests is absent"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }

        let missing_user = UserBookRequest {
            user_request: None,
            book_requests: Some(vec![]),
        };
        assert!(matches!(missing_user.into_drafts(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_null_books_are_skipped_in_order() {
        let request = UserBookRequest {
            user_request: Some(user_request()),
            book_requests: Some(vec![Some(book_request("A")), None, Some(book_request("B"))]),
        };
        let (_, books) = request.into_drafts().unwrap();
        assert_eq!(
            books,
            vec![BookDraft::new("A", "X", 100).unwrap(), BookDraft::new("B", "X", 100).unwrap()]
        );
    }

    #[test]
    fn test_parses_wire_json() {
        let request: UserBookRequest = serde_json::from_str(
            r#"{
                "userRequest": {"fullName": "Ann", "title": "reader", "age": 30},
                "bookRequests": [{"title": "A", "author": "X", "pageCount": 100}, null]
            }"#,
        )
        .unwrap();
        let (user, books) = request.into_drafts().unwrap();
        assert_eq!(user.full_name(), "Ann");
        assert_eq!(books.len(), 1);
    }

    #[test]
    fn test_response_wire_shape() {
        let response = UserBookResponse { user_id: 1, books_id_list: vec![2, 3] };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"userId": 1, "booksIdList": [2, 3]}));
    }
}
