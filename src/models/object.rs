//! Hydration of raw JSON into live objects.
//!
//! A [`CanvasObject`] keeps the payload's fields verbatim and a handle to the
//! [`Requester`] that fetched it. Nothing is validated at construction;
//! a missing field only surfaces when it is asked for.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::requester::value_kind;
use crate::client::Requester;
use crate::{Error, Result};

use super::resource::Resource;

/// Kind reported by objects hydrated without a specific resource type.
pub const GENERIC_KIND: &str = "CanvasObject";

/// A JSON object bound to the requester that produced it.
///
/// Clones are handles to the same object: re-hydrating through one clone is
/// visible through all of them.
#[derive(Clone)]
pub struct CanvasObject {
    kind: &'static str,
    attributes: Arc<RwLock<Map<String, Value>>>,
    /// Parent ids merged in at hydration; they outlive every re-hydration.
    inherited: Arc<Map<String, Value>>,
    requester: Requester,
}

impl CanvasObject {
    /// Wrap `attributes` as an object of `kind`.
    pub fn new(kind: &'static str, attributes: Map<String, Value>, requester: Requester) -> Self {
        Self::with_inherited(kind, attributes, Map::new(), requester)
    }

    /// Wrap `attributes`, filling in any of `inherited` the payload lacks.
    ///
    /// The inherited fields are kept for the object's whole life and are
    /// re-applied by [`set_attributes`](Self::set_attributes).
    pub fn with_inherited(
        kind: &'static str,
        mut attributes: Map<String, Value>,
        inherited: Map<String, Value>,
        requester: Requester,
    ) -> Self {
        merge_missing(&mut attributes, &inherited);
        Self {
            kind,
            attributes: Arc::new(RwLock::new(attributes)),
            inherited: Arc::new(inherited),
            requester,
        }
    }

    /// The resource kind this object was hydrated as.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The requester shared with the rest of the object graph.
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Check if the payload carried `name` (even as `null`).
    pub fn has(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Raw value of `name`.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| self.absent(name))
    }

    /// Decode `name` into `T`.
    ///
    /// Fails with [`Error::AttributeAbsent`] if the field is missing and with
    /// [`Error::Json`] if it cannot be decoded as `T`.
    pub fn attr<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        Ok(serde_json::from_value(self.get(name)?)?)
    }

    /// Decode `name` into `T`, treating a missing or `null` field as `None`.
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.read().get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }

    /// Snapshot of every field.
    pub fn attributes(&self) -> Map<String, Value> {
        self.read().clone()
    }

    /// The `id` field rendered as a path segment.
    pub fn id(&self) -> Result<String> {
        self.segment("id")
    }

    /// A string or numeric field rendered as a path segment.
    pub fn segment(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(Error::UnexpectedPayload {
                expected: "string or number",
                found: value_kind(&other),
            }),
        }
    }

    /// Fields this object inherited from its parent at hydration.
    pub fn inherited(&self) -> &Map<String, Value> {
        &self.inherited
    }

    /// Replace every field with `attributes`, keeping this object's identity.
    ///
    /// Inherited fields missing from `attributes` are put back.
    pub fn set_attributes(&self, mut attributes: Map<String, Value>) {
        merge_missing(&mut attributes, &self.inherited);
        let mut guard = self
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = attributes;
    }

    /// Check whether `self` and `other` are handles to the same object.
    pub fn same_object(&self, other: &CanvasObject) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes)
    }

    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.attributes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn absent(&self, name: &str) -> Error {
        Error::AttributeAbsent {
            kind: self.kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Debug for CanvasObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind)
            .field("attributes", &*self.read())
            .finish()
    }
}

impl Serialize for CanvasObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.read().serialize(serializer)
    }
}

/// Hydrate a JSON object without a specific kind.
pub fn hydrate(value: Value, requester: &Requester) -> Result<CanvasObject> {
    hydrate_as(GENERIC_KIND, value, requester)
}

/// Hydrate a JSON object as the resource type `T`.
pub fn hydrate_typed<T: Resource>(value: Value, requester: &Requester) -> Result<T> {
    Ok(T::from_object(hydrate_as(T::KIND, value, requester)?))
}

/// Hydrate after merging `extra` into the payload. Payload fields win.
pub(crate) fn hydrate_with<T: Resource>(
    value: Value,
    extra: &Map<String, Value>,
    requester: &Requester,
) -> Result<T> {
    Ok(T::from_object(CanvasObject::with_inherited(
        T::KIND,
        expect_object(value)?,
        extra.clone(),
        requester.clone(),
    )))
}

fn merge_missing(map: &mut Map<String, Value>, extra: &Map<String, Value>) {
    for (key, value) in extra {
        map.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

fn hydrate_as(kind: &'static str, value: Value, requester: &Requester) -> Result<CanvasObject> {
    Ok(CanvasObject::new(kind, expect_object(value)?, requester.clone()))
}

fn expect_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::UnexpectedPayload {
            expected: "object",
            found: value_kind(&other),
        }),
    }
}
