//! Resource endpoints of a Basecamp account.
//!
//! Each handle borrows a [`ResourceClient`](crate::ResourceClient) and maps
//! one operation to one request. Every operation follows the same rule: the
//! documented success status yields the decoded value, anything else is a
//! [`ResourceError`].

mod comments;
mod documents;
mod people;
mod projects;
mod todo_lists;
mod todos;

pub use comments::{Comment, Comments, Topic, TopicKind};
pub use documents::{Document, Documents};
pub use people::{People, Person};
pub use projects::{Project, Projects};
pub use todo_lists::{NewTodoList, TodoList, TodoListFilter, TodoLists};
pub use todos::{Todo, TodoFilter, TodoQuery, Todos};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use basecamp_core::Result;
use basecamp_core::error::ResourceError;

use crate::transport::ResponseEnvelope;

pub(crate) const OK: u16 = 200;
pub(crate) const CREATED: u16 = 201;
pub(crate) const NO_CONTENT: u16 = 204;

/// The person who created a project, to-do, comment or document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Pass the response on if it has the expected status.
pub(crate) fn expect_status(response: ResponseEnvelope, expected: u16) -> Result<ResponseEnvelope> {
    if response.is(expected) {
        return Ok(response);
    }

    let ResponseEnvelope { status, body, .. } = response;
    let err = match status {
        403 => ResourceError::Forbidden { body },
        404 => ResourceError::NotFound { body },
        _ => ResourceError::UnexpectedStatus { status, body },
    };
    Err(err.into())
}

/// Check the status, then decode the JSON body.
pub(crate) fn decode<T: DeserializeOwned>(response: ResponseEnvelope, expected: u16) -> Result<T> {
    let response = expect_status(response, expected)?;
    response.json().map_err(|e| {
        ResourceError::InvalidBody {
            message: e.to_string(),
        }
        .into()
    })
}

/// Check for `204 No Content`.
pub(crate) fn expect_no_content(response: ResponseEnvelope) -> Result<()> {
    expect_status(response, NO_CONTENT).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basecamp_core::Error;

    #[test]
    fn expected_status_passes() {
        let response = expect_status(ResponseEnvelope::new(201, "{}"), CREATED).unwrap();
        assert_eq!(response.status, 201);
    }

    #[test]
    fn forbidden_and_not_found_have_their_own_variants() {
        let err = expect_status(ResponseEnvelope::new(403, "limit"), CREATED).unwrap_err();
        assert!(matches!(err, Error::Resource(ResourceError::Forbidden { ref body }) if body == "limit"));

        let err = expect_status(ResponseEnvelope::new(404, ""), OK).unwrap_err();
        assert!(matches!(err, Error::Resource(ResourceError::NotFound { .. })));
    }

    #[test]
    fn other_statuses_keep_the_body() {
        let err = expect_status(ResponseEnvelope::new(422, "bad name"), CREATED).unwrap_err();
        match err {
            Error::Resource(ResourceError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 422);
                assert_eq!(body, "bad name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_with_wrong_shape_is_invalid_body() {
        let err = decode::<Creator>(ResponseEnvelope::new(200, "[]"), OK).unwrap_err();
        assert!(matches!(err, Error::Resource(ResourceError::InvalidBody { .. })));
    }

    #[test]
    fn delete_needs_no_content() {
        assert!(expect_no_content(ResponseEnvelope::new(204, "")).is_ok());
        let err = expect_no_content(ResponseEnvelope::new(200, "")).unwrap_err();
        assert!(matches!(
            err,
            Error::Resource(ResourceError::UnexpectedStatus { status: 200, .. })
        ));
    }
}
