//! Users.

use serde_json::Value;

use super::{child_collection, Course, Enrollment};
use crate::client::PaginatedStream;
use crate::models::{canvas_resource, Addressable, Resource};
use crate::Result;

canvas_resource!(
    /// A Canvas user.
    User,
    title = "name"
);

impl Addressable for User {
    fn path(&self) -> Result<String> {
        Ok(format!("users/{}", self.id()?))
    }
}

impl User {
    /// List the courses this user is enrolled in.
    pub fn get_courses(&self, params: Option<Value>) -> PaginatedStream<Course> {
        let scope = self.path().map(|path| (format!("{path}/courses"), Default::default()));
        child_collection(self.requester(), scope, params)
    }

    /// List this user's enrollments across courses.
    pub fn get_enrollments(&self, params: Option<Value>) -> PaginatedStream<Enrollment> {
        let scope = self
            .path()
            .map(|path| (format!("{path}/enrollments"), Default::default()));
        child_collection(self.requester(), scope, params)
    }
}
