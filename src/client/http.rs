//! The Canvas client entry point.

use serde_json::{json, Map, Value};

use super::config::ClientConfig;
use super::requester::{Method, Requester};
use super::PaginatedStream;
use crate::api::{collection, fetch, typed_id, Course, CourseNickname, User};
use crate::auth::Credential;
use crate::models::AsId;
use crate::Result;

/// The main client for interacting with the Canvas API.
///
/// The client owns one [`Requester`]; every object it returns, and every
/// object reached from those, shares that same requester.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use canvasapi::Canvas;
///
/// # async fn example() -> canvasapi::Result<()> {
/// let canvas = Canvas::new("https://canvas.example.edu/api/v1", "access-token")?;
///
/// let course = canvas.get_course(1).await?;
/// println!("{}", course);
///
/// let mut users = course.get_users(None);
/// while let Some(user) = users.next().await {
///     println!("{}", user?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Canvas {
    requester: Requester,
    config: ClientConfig,
}

impl Canvas {
    /// Create a client for `base_url` using default configuration.
    ///
    /// `base_url` is the API root, e.g. `https://canvas.example.edu/api/v1`.
    pub fn new(base_url: &str, credential: impl Into<Credential>) -> Result<Self> {
        Self::with_config(base_url, credential, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        base_url: &str,
        credential: impl Into<Credential>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = config.build_http_client()?;
        Self::with_http_client(base_url, credential, http, config)
    }

    /// Create a client over an existing HTTP transport.
    ///
    /// Only `per_page` is taken from `config`; timeouts and the user agent
    /// belong to the transport.
    pub fn with_http_client(
        base_url: &str,
        credential: impl Into<Credential>,
        http: reqwest::Client,
        config: ClientConfig,
    ) -> Result<Self> {
        let credential = credential.into();
        let requester = Requester::with_per_page(base_url, &credential, http, config.per_page)?;
        Ok(Self { requester, config })
    }

    /// The requester shared by every object this client produces.
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Get a single course by id.
    pub async fn get_course(&self, course: impl AsId) -> Result<Course> {
        let path = format!("courses/{}", course.as_id()?);
        fetch(&self.requester, Method::Get, &path, None, &Map::new()).await
    }

    /// List the current user's courses.
    pub fn get_courses(&self, params: Option<Value>) -> PaginatedStream<Course> {
        collection(&self.requester, "courses".to_string(), params)
    }

    /// Get a user by id, optionally addressed by an alternate id type such
    /// as `sis_login_id`. The id `self` is the current user.
    pub async fn get_user(&self, user: impl AsId, id_type: Option<&str>) -> Result<User> {
        let path = format!("users/{}", typed_id(user.as_id()?, id_type));
        fetch(&self.requester, Method::Get, &path, None, &Map::new()).await
    }

    /// Get the current user's nickname for a course.
    pub async fn get_course_nickname(&self, course: impl AsId) -> Result<CourseNickname> {
        let path = format!("users/self/course_nicknames/{}", course.as_id()?);
        fetch(&self.requester, Method::Get, &path, None, &Map::new()).await
    }

    /// List all of the current user's course nicknames.
    pub fn get_course_nicknames(&self) -> PaginatedStream<CourseNickname> {
        collection(&self.requester, "users/self/course_nicknames".to_string(), None)
    }

    /// Set the current user's nickname for a course.
    pub async fn set_course_nickname(
        &self,
        course: impl AsId,
        nickname: &str,
    ) -> Result<CourseNickname> {
        let path = format!("users/self/course_nicknames/{}", course.as_id()?);
        let body = json!({ "nickname": nickname });
        fetch(&self.requester, Method::Put, &path, Some(&body), &Map::new()).await
    }

    /// Remove every course nickname of the current user.
    pub async fn clear_course_nicknames(&self) -> Result<bool> {
        let response = self
            .requester
            .delete("users/self/course_nicknames", &Default::default())
            .await?;
        Ok(response.body.get("message").and_then(Value::as_str) == Some("OK"))
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("base_url", &self.requester.base_url())
            .field("config", &self.config)
            .finish()
    }
}
