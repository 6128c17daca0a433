//! Enrollments of users in courses.

use crate::models::canvas_resource;

canvas_resource!(
    /// A user's enrollment in a course.
    Enrollment,
    title = "type"
);
