//! Courses and everything reachable from one.

use serde_json::{json, Map, Value};

use super::{child_collection, extra, fetch, require_field, typed_id};
use super::{Assignment, AssignmentGroup, DiscussionTopic, Enrollment, Module, Quiz, User};
use crate::client::{Method, PaginatedStream, Params};
use crate::models::{canvas_resource, Addressable, AsId, Resource, Updatable};
use crate::{Error, Result};

canvas_resource!(
    /// A Canvas course.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use canvasapi::Updatable;
    /// use serde_json::json;
    ///
    /// # async fn example(canvas: canvasapi::Canvas) -> canvasapi::Result<()> {
    /// let course = canvas.get_course(1).await?;
    /// course.update(json!({"course": {"name": "Biology II"}})).await?;
    /// assert_eq!(course.name()?, "Biology II");
    /// # Ok(())
    /// # }
    /// ```
    Course,
    title = "name"
);

impl Addressable for Course {
    fn path(&self) -> Result<String> {
        Ok(format!("courses/{}", self.id()?))
    }
}

impl Updatable for Course {
    const MARKER: &'static str = "name";
}

impl Course {
    /// The course name.
    pub fn name(&self) -> Result<String> {
        self.attr("name")
    }

    fn child_extra(&self) -> Result<Map<String, Value>> {
        Ok(extra("course_id", self.object().get("id")?))
    }

    /// Send a state event (`delete`, `conclude`) and read back its flag.
    async fn send_event(&self, event: &str) -> Result<bool> {
        let params = Params::new().with("event", event);
        let response = self.requester().delete(&self.path()?, &params).await?;
        Ok(response.body.get(event).and_then(Value::as_bool).unwrap_or(false))
    }

    /// Permanently delete the course.
    pub async fn delete(&self) -> Result<bool> {
        self.send_event("delete").await
    }

    /// Mark the course as concluded.
    pub async fn conclude(&self) -> Result<bool> {
        self.send_event("conclude").await
    }

    /// Delete the course's content and return the fresh, empty course.
    pub async fn reset(&self) -> Result<Course> {
        let path = format!("{}/reset_content", self.path()?);
        fetch(self.requester(), Method::Post, &path, None, &Map::new()).await
    }

    /// Get one user enrolled in the course, optionally addressed by an
    /// alternate id type such as `sis_login_id`.
    pub async fn get_user(&self, user: impl AsId, id_type: Option<&str>) -> Result<User> {
        let path = format!("{}/users/{}", self.path()?, typed_id(user.as_id()?, id_type));
        fetch(self.requester(), Method::Get, &path, None, &Map::new()).await
    }

    /// List users in the course.
    pub fn get_users(&self, params: Option<Value>) -> PaginatedStream<User> {
        self.nested("users", params)
    }

    /// List students who were most recently active.
    pub fn get_recent_students(&self) -> PaginatedStream<User> {
        self.nested("recent_students", None)
    }

    /// Enroll `user` with the given enrollment type (e.g. `StudentEnrollment`).
    pub async fn enroll_user(
        &self,
        user: impl AsId,
        enrollment_type: &str,
        params: Option<Value>,
    ) -> Result<Enrollment> {
        let mut body = match params {
            Some(Value::Object(map)) => map,
            Some(_) | None => Map::new(),
        };
        let enrollment = body
            .entry("enrollment")
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(fields) = enrollment else {
            return Err(Error::InvalidInput("'enrollment' must be an object".to_string()));
        };
        fields.insert("user_id".to_string(), Value::String(user.as_id()?));
        fields.insert("type".to_string(), Value::String(enrollment_type.to_string()));

        let path = format!("{}/enrollments", self.path()?);
        fetch(
            self.requester(),
            Method::Post,
            &path,
            Some(&Value::Object(body)),
            &Map::new(),
        )
        .await
    }

    /// Sanitize HTML the way Canvas would before storing it.
    pub async fn preview_html(&self, html: &str) -> Result<String> {
        let path = format!("{}/preview_html", self.path()?);
        let response = self.requester().post(&path, &json!({ "html": html })).await?;
        let body = response.into_object()?;
        match body.get("html") {
            Some(Value::String(html)) => Ok(html.clone()),
            _ => Err(Error::AttributeAbsent {
                kind: "preview_html response",
                name: "html".to_string(),
            }),
        }
    }

    /// Get the course settings.
    pub async fn get_settings(&self) -> Result<Map<String, Value>> {
        let path = format!("{}/settings", self.path()?);
        self.requester().get(&path, &Params::new()).await?.into_object()
    }

    /// Update the course settings, returning the stored settings.
    pub async fn update_settings(&self, settings: Value) -> Result<Map<String, Value>> {
        let path = format!("{}/settings", self.path()?);
        self.requester().put(&path, &settings).await?.into_object()
    }

    /// Get a quiz of this course.
    pub async fn get_quiz(&self, quiz: impl AsId) -> Result<Quiz> {
        self.nested_one("quizzes", quiz).await
    }

    /// List the course's quizzes.
    pub fn get_quizzes(&self, params: Option<Value>) -> PaginatedStream<Quiz> {
        self.nested("quizzes", params)
    }

    /// Create a quiz. `body` must carry `quiz.title`.
    pub async fn create_quiz(&self, body: Value) -> Result<Quiz> {
        require_field(&body, "quiz", "title")?;
        self.nested_create("quizzes", &body).await
    }

    /// Get a module of this course.
    pub async fn get_module(&self, module: impl AsId) -> Result<Module> {
        self.nested_one("modules", module).await
    }

    /// List the course's modules.
    pub fn get_modules(&self, params: Option<Value>) -> PaginatedStream<Module> {
        self.nested("modules", params)
    }

    /// Create a module. `body` must carry `module.name`.
    pub async fn create_module(&self, body: Value) -> Result<Module> {
        require_field(&body, "module", "name")?;
        self.nested_create("modules", &body).await
    }

    /// Get an assignment of this course.
    pub async fn get_assignment(&self, assignment: impl AsId) -> Result<Assignment> {
        self.nested_one("assignments", assignment).await
    }

    /// List the course's assignments.
    pub fn get_assignments(&self, params: Option<Value>) -> PaginatedStream<Assignment> {
        self.nested("assignments", params)
    }

    /// Create an assignment. `body` must carry `assignment.name`.
    pub async fn create_assignment(&self, body: Value) -> Result<Assignment> {
        require_field(&body, "assignment", "name")?;
        self.nested_create("assignments", &body).await
    }

    /// Get an assignment group of this course.
    pub async fn get_assignment_group(&self, group: impl AsId) -> Result<AssignmentGroup> {
        self.nested_one("assignment_groups", group).await
    }

    /// List the course's assignment groups.
    pub fn get_assignment_groups(&self, params: Option<Value>) -> PaginatedStream<AssignmentGroup> {
        self.nested("assignment_groups", params)
    }

    /// Get a discussion topic of this course.
    pub async fn get_discussion_topic(&self, topic: impl AsId) -> Result<DiscussionTopic> {
        self.nested_one("discussion_topics", topic).await
    }

    /// List the course's discussion topics.
    pub fn get_discussion_topics(&self, params: Option<Value>) -> PaginatedStream<DiscussionTopic> {
        self.nested("discussion_topics", params)
    }

    /// A collection below this course whose items remember `course_id`.
    fn nested<T: Resource>(&self, segment: &str, params: Option<Value>) -> PaginatedStream<T> {
        let scope = self
            .path()
            .and_then(|path| Ok((format!("{path}/{segment}"), self.child_extra()?)));
        child_collection(self.requester(), scope, params)
    }

    async fn nested_one<T: Resource>(&self, segment: &str, id: impl AsId) -> Result<T> {
        let path = format!("{}/{}/{}", self.path()?, segment, id.as_id()?);
        fetch(self.requester(), Method::Get, &path, None, &self.child_extra()?).await
    }

    async fn nested_create<T: Resource>(&self, segment: &str, body: &Value) -> Result<T> {
        let path = format!("{}/{}", self.path()?, segment);
        fetch(self.requester(), Method::Post, &path, Some(body), &self.child_extra()?).await
    }
}
