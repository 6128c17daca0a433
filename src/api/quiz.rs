//! Quizzes.

use serde_json::Value;

use crate::models::{canvas_resource, Addressable, Deletable, Resource, Updatable};
use crate::Result;

canvas_resource!(
    /// A quiz belonging to a course.
    Quiz,
    title = "title"
);

impl Addressable for Quiz {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "courses/{}/quizzes/{}",
            self.object().segment("course_id")?,
            self.id()?
        ))
    }
}

impl Updatable for Quiz {
    const MARKER: &'static str = "title";
}

impl Deletable for Quiz {}

impl Quiz {
    /// Modify this quiz in place. Returns `true` when the fields were refreshed.
    pub async fn edit(&self, body: Value) -> Result<bool> {
        self.update(body).await
    }
}
