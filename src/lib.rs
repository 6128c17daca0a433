//! # canvasapi-rs
//!
//! An async Rust client for the Canvas LMS REST API.
//!
//! Responses are hydrated into live objects: each keeps the JSON fields it
//! was built from and a handle to the shared [`Requester`], so it can make
//! further calls relative to itself. Collections are exposed as lazy
//! [`PaginatedStream`]s that follow the `Link` header one page at a time.
//!
//! ## Features
//!
//! - **Hydration**: arbitrary payloads become [`CanvasObject`]s with typed,
//!   fallible accessors; unknown fields are kept, missing ones reported
//! - **Pagination**: forward-only streams that fetch strictly on demand
//! - **Typed errors**: 404, 401/403, other statuses and transport failures
//!   are distinct [`Error`] variants
//! - **Capabilities**: resource kinds opt into [`Updatable`] and
//!   [`Deletable`] instead of inheriting behavior
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use canvasapi::{Canvas, Resource};
//! use futures_util::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> canvasapi::Result<()> {
//!     let canvas = Canvas::new("https://canvas.example.edu/api/v1", "access-token")?;
//!
//!     let course = canvas.get_course(1).await?;
//!     println!("Course: {}", course.name()?);
//!
//!     let mut students = course.get_users(Some(serde_json::json!({
//!         "enrollment_type": ["student"]
//!     })));
//!     while let Some(student) = students.next().await {
//!         let student = student?;
//!         println!("{}: {}", student.id()?, student.attr::<String>("name")?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Updating in place
//!
//! ```rust,no_run
//! use canvasapi::{Canvas, Updatable};
//! use serde_json::json;
//!
//! # async fn example(canvas: Canvas) -> canvasapi::Result<()> {
//! let course = canvas.get_course(1).await?;
//! let handle = course.clone();
//!
//! course.update(json!({"course": {"name": "Biology II"}})).await?;
//! assert_eq!(handle.name()?, "Biology II");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::Credential;
pub use client::{
    Canvas, ClientConfig, Method, PaginatedStream, PaginationLinks, Params, RawResponse, Requester,
};
pub use error::{Error, Result};
pub use models::{
    hydrate, hydrate_typed, Addressable, AsId, CanvasObject, Deletable, Resource, Updatable,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use canvasapi::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Assignment, AssignmentGroup, Course, CourseNickname, DiscussionEntry, DiscussionParent,
        DiscussionTopic, Enrollment, Module, Quiz, Submission, User,
    };
    pub use crate::client::{Canvas, ClientConfig, PaginatedStream, Params};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Addressable, AsId, CanvasObject, Deletable, Resource, Updatable};
}
