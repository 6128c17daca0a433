//! Hydrated objects and the capabilities resource kinds are built from.
//!
//! - [`object`] - [`CanvasObject`] and the hydration functions
//! - [`resource`] - the [`Resource`] trait and its capability traits

pub mod object;
pub mod resource;

pub use object::{hydrate, hydrate_typed, CanvasObject, GENERIC_KIND};
pub(crate) use object::hydrate_with;
pub use resource::{Addressable, AsId, Deletable, Resource, Updatable};
pub(crate) use resource::canvas_resource;
