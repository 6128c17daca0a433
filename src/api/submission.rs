//! Assignment submissions.

use crate::models::canvas_resource;

canvas_resource!(
    /// A submission for an assignment. Carries `course_id` from the
    /// assignment it was fetched through.
    Submission,
    title = "assignment_id"
);
