//! HTTP core of the Canvas client.
//!
//! [`Canvas`] is the entry point. It owns one [`Requester`], which performs
//! every call; collection endpoints are walked lazily by
//! [`PaginatedStream`].
//!
//! # Example
//!
//! ```no_run
//! use canvasapi::{Canvas, ClientConfig};
//!
//! # async fn example() -> canvasapi::Result<()> {
//! let canvas = Canvas::with_config(
//!     "https://canvas.example.edu/api/v1",
//!     "access-token",
//!     ClientConfig::default().with_per_page(100),
//! )?;
//!
//! let courses = canvas.get_courses(None).collect_all().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod links;
pub mod paginated;
pub mod params;
pub(crate) mod requester;

pub use config::ClientConfig;
pub use http::Canvas;
pub use links::PaginationLinks;
pub use paginated::PaginatedStream;
pub use params::Params;
pub use requester::{Method, RawResponse, Requester};
