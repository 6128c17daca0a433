//! Course modules.

use serde_json::Value;

use crate::models::{canvas_resource, Addressable, Deletable, Resource, Updatable};
use crate::Result;

canvas_resource!(
    /// A module of a course.
    Module,
    title = "name"
);

impl Addressable for Module {
    fn path(&self) -> Result<String> {
        Ok(format!(
            "courses/{}/modules/{}",
            self.object().segment("course_id")?,
            self.id()?
        ))
    }
}

impl Updatable for Module {
    const MARKER: &'static str = "name";
}

impl Deletable for Module {}

impl Module {
    /// Modify this module in place. Returns `true` when the fields were refreshed.
    pub async fn edit(&self, body: Value) -> Result<bool> {
        self.update(body).await
    }
}
