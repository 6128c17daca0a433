//! Capabilities that resource kinds opt into.
//!
//! Every kind is a thin wrapper around a [`CanvasObject`]. What a kind can
//! do is expressed by which of these traits it implements, not by a type
//! hierarchy.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{Params, Requester};
use crate::Result;

use super::object::{hydrate_with, CanvasObject};

/// A hydrated object of a known kind.
pub trait Resource: Sized + Send + Sync {
    /// Name of the kind, used in error messages.
    const KIND: &'static str;

    /// Wrap an already hydrated object.
    fn from_object(object: CanvasObject) -> Self;

    /// The underlying object.
    fn object(&self) -> &CanvasObject;

    /// The requester shared with the rest of the object graph.
    fn requester(&self) -> &Requester {
        self.object().requester()
    }

    /// The `id` field rendered as a path segment.
    fn id(&self) -> Result<String> {
        self.object().id()
    }

    /// Decode a field. See [`CanvasObject::attr`].
    fn attr<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.object().attr(name)
    }

    /// Decode an optional field. See [`CanvasObject::get_opt`].
    fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.object().get_opt(name)
    }

    /// Check if the payload carried `name`.
    fn has(&self, name: &str) -> bool {
        self.object().has(name)
    }
}

/// A resource with a canonical path of its own.
pub trait Addressable: Resource {
    /// Path of this resource relative to the API base.
    fn path(&self) -> Result<String>;
}

/// A resource that can be modified with PUT and refreshed in place.
pub trait Updatable: Addressable {
    /// Field whose presence in the response means it describes this
    /// resource, as opposed to an acknowledgement.
    const MARKER: &'static str = "id";

    /// PUT `body` to this resource's path.
    ///
    /// When the response describes the resource, the object's fields are
    /// replaced in place and `true` is returned; every clone of the object
    /// sees the new fields. Fields inherited from the parent are kept.
    fn update(&self, body: Value) -> impl Future<Output = Result<bool>> + Send {
        async move {
            let path = self.path()?;
            let response = self.requester().put(&path, &body).await?;
            let attributes = response.into_object()?;
            if !attributes.contains_key(Self::MARKER) {
                return Ok(false);
            }
            self.object().set_attributes(attributes);
            Ok(true)
        }
    }
}

/// A resource that can be removed with DELETE.
pub trait Deletable: Addressable {
    /// DELETE this resource, returning the server's final view of it.
    fn delete(&self) -> impl Future<Output = Result<Self>> + Send {
        async move {
            let path = self.path()?;
            let response = self.requester().delete(&path, &Params::new()).await?;
            hydrate_with(response.body, self.object().inherited(), self.requester())
        }
    }
}

/// Anything that identifies a resource in a path: a raw id or a hydrated
/// resource.
pub trait AsId {
    /// The id rendered as a path segment.
    fn as_id(&self) -> Result<String>;
}

impl AsId for u64 {
    fn as_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl AsId for u32 {
    fn as_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl AsId for i64 {
    fn as_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl AsId for i32 {
    fn as_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl AsId for &str {
    fn as_id(&self) -> Result<String> {
        Ok((*self).to_string())
    }
}

impl AsId for String {
    fn as_id(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl<T: Resource> AsId for &T {
    fn as_id(&self) -> Result<String> {
        self.id()
    }
}

/// Declare a resource kind wrapping a [`CanvasObject`].
///
/// The kind gets `Resource`, `Clone`, `Debug`, `Serialize` and a `Display`
/// of the form `<title field> (<id>)`.
macro_rules! canvas_resource {
    ($(#[$meta:meta])* $name:ident, title = $title:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name {
            object: $crate::models::CanvasObject,
        }

        impl $crate::models::Resource for $name {
            const KIND: &'static str = stringify!($name);

            fn from_object(object: $crate::models::CanvasObject) -> Self {
                Self { object }
            }

            fn object(&self) -> &$crate::models::CanvasObject {
                &self.object
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let title = self
                    .object
                    .get($title)
                    .ok()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .unwrap_or_default();
                match self.object.id() {
                    Ok(id) => write!(f, "{} ({})", title, id),
                    Err(_) => write!(f, "{}", title),
                }
            }
        }
    };
}

pub(crate) use canvas_resource;
