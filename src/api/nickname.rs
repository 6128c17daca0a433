//! Per-user course nicknames.

use serde_json::Map;

use super::fetch;
use crate::client::Method;
use crate::models::{canvas_resource, Resource};
use crate::Result;

canvas_resource!(
    /// The current user's nickname for a course.
    CourseNickname,
    title = "nickname"
);

impl CourseNickname {
    /// Remove this nickname, returning the server's final view of it.
    pub async fn remove(&self) -> Result<CourseNickname> {
        let path = format!(
            "users/self/course_nicknames/{}",
            self.object().segment("course_id")?
        );
        fetch(self.requester(), Method::Delete, &path, None, &Map::new()).await
    }
}
