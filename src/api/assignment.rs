//! Assignments and assignment groups.

use serde_json::{json, Map, Value};

use super::{child_collection, extra, fetch, typed_id, Submission, User};
use crate::client::{Method, PaginatedStream};
use crate::models::{canvas_resource, Addressable, AsId, Deletable, Resource, Updatable};
use crate::{Error, Result};

canvas_resource!(
    /// An assignment of a course.
    Assignment,
    title = "name"
);

impl Addressable for Assignment {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "courses/{}/assignments/{}",
            self.object().segment("course_id")?,
            self.id()?
        ))
    }
}

impl Updatable for Assignment {
    const MARKER: &'static str = "name";
}

impl Deletable for Assignment {}

impl Assignment {
    /// Modify this assignment in place. Returns `true` when the fields were
    /// refreshed.
    pub async fn edit(&self, body: Value) -> Result<bool> {
        self.update(body).await
    }

    fn submission_extra(&self) -> Result<Map<String, Value>> {
        Ok(extra("course_id", self.object().get("course_id")?))
    }

    /// List students eligible to submit this assignment.
    pub fn get_gradeable_students(&self) -> PaginatedStream<User> {
        let scope = self
            .path()
            .map(|path| (format!("{path}/gradeable_students"), Map::new()));
        child_collection(self.requester(), scope, None)
    }

    /// Get the submission of one user, optionally addressed by an alternate
    /// id type.
    pub async fn get_submission(&self, user: impl AsId, id_type: Option<&str>) -> Result<Submission> {
        let path = format!(
            "{}/submissions/{}",
            self.path()?,
            typed_id(user.as_id()?, id_type)
        );
        fetch(self.requester(), Method::Get, &path, None, &self.submission_extra()?).await
    }

    /// List every submission for this assignment.
    pub fn get_submissions(&self, params: Option<Value>) -> PaginatedStream<Submission> {
        let scope = self
            .path()
            .and_then(|path| Ok((format!("{path}/submissions"), self.submission_extra()?)));
        child_collection(self.requester(), scope, params)
    }

    /// Submit work for this assignment on behalf of the current user.
    ///
    /// `submission` must be an object carrying `submission_type`.
    pub async fn submit(&self, submission: Value) -> Result<Submission> {
        if submission.get("submission_type").is_none() {
            return Err(Error::RequiredFieldMissing(
                "Dictionary with key 'submission_type' is required.".to_string(),
            ));
        }
        let path = format!("{}/submissions", self.path()?);
        let body = json!({ "submission": submission });
        fetch(
            self.requester(),
            Method::Post,
            &path,
            Some(&body),
            &self.submission_extra()?,
        )
        .await
    }
}

canvas_resource!(
    /// A weighted group of assignments within a course.
    AssignmentGroup,
    title = "name"
);

impl Addressable for AssignmentGroup {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "courses/{}/assignment_groups/{}",
            self.object().segment("course_id")?,
            self.id()?
        ))
    }
}

impl Updatable for AssignmentGroup {
    const MARKER: &'static str = "name";
}

impl Deletable for AssignmentGroup {}

impl AssignmentGroup {
    /// Modify this group in place. Returns `true` when the fields were
    /// refreshed.
    pub async fn edit(&self, body: Value) -> Result<bool> {
        self.update(body).await
    }
}
