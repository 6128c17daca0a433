//! Resource kinds of the Canvas API.
//!
//! Each kind is a thin declaration over the client core: it knows its
//! endpoint paths and which capabilities ([`Updatable`](crate::Updatable),
//! [`Deletable`](crate::Deletable)) it has. Related objects are reached by
//! issuing new requests through the shared requester.

mod assignment;
mod course;
mod discussion;
mod enrollment;
mod module;
mod nickname;
mod quiz;
mod submission;
mod user;

pub use assignment::{Assignment, AssignmentGroup};
pub use course::Course;
pub use discussion::{DiscussionEntry, DiscussionParent, DiscussionTopic};
pub use enrollment::Enrollment;
pub use module::Module;
pub use nickname::CourseNickname;
pub use quiz::Quiz;
pub use submission::Submission;
pub use user::User;

use serde_json::{Map, Value};

use crate::client::{Method, PaginatedStream, Params, RawResponse, Requester};
use crate::models::{hydrate_with, Resource};
use crate::{Error, Result};

/// Issue one request and hydrate the body as `T`, merging `extra` into it.
pub(crate) async fn fetch<T: Resource>(
    requester: &Requester,
    method: Method,
    path: &str,
    body: Option<&Value>,
    extra: &Map<String, Value>,
) -> Result<T> {
    let response = requester.request(method, path, &Params::new(), body).await?;
    hydrate_with(response.body, extra, requester)
}

/// A lazy collection at `path`, with optional query parameters.
pub(crate) fn collection<T: Resource>(
    requester: &Requester,
    path: String,
    params: Option<Value>,
) -> PaginatedStream<T> {
    let params = params.as_ref().map(Params::from_json).unwrap_or_default();
    PaginatedStream::new(requester.clone(), Method::Get, path, params)
}

/// A collection scoped below a parent, whose items inherit the parent's
/// ids. If the scope could not be resolved the stream yields that error.
pub(crate) fn child_collection<T: Resource>(
    requester: &Requester,
    scope: Result<(String, Map<String, Value>)>,
    params: Option<Value>,
) -> PaginatedStream<T> {
    match scope {
        Ok((path, extra)) => collection(requester, path, params).with_extra_attributes(extra),
        Err(e) => PaginatedStream::failed(requester.clone(), e),
    }
}

/// Canvas acknowledges state toggles with an empty 204.
pub(crate) fn no_content(response: &RawResponse) -> bool {
    response.status == 204
}

/// A one-entry attribute map, used to carry parent ids into children.
pub(crate) fn extra(key: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value.into());
    map
}

/// Render an id with an optional Canvas id-type prefix (`sis_user_id:abc`).
pub(crate) fn typed_id(id: String, id_type: Option<&str>) -> String {
    match id_type {
        Some(kind) => format!("{kind}:{id}"),
        None => id,
    }
}

/// Fail unless `body[envelope][field]` is present.
pub(crate) fn require_field(body: &Value, envelope: &str, field: &str) -> Result<()> {
    match body.get(envelope).and_then(|inner| inner.get(field)) {
        Some(_) => Ok(()),
        None => Err(Error::RequiredFieldMissing(format!(
            "Dictionary with key '{field}' is required."
        ))),
    }
}
