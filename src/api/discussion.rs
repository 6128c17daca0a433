//! Discussion topics and their entries.
//!
//! A topic lives under either a course or a group; which one is read from
//! whether the object carries `course_id` or `group_id`.

use serde_json::{json, Map, Value};

use super::{child_collection, fetch, no_content, Course};
use crate::client::{Method, PaginatedStream, Params, Requester};
use crate::models::{
    canvas_resource, hydrate, hydrate_typed, Addressable, AsId, CanvasObject, Resource, Updatable,
};
use crate::{Error, Result};

/// The course or group a discussion belongs to.
#[derive(Debug, Clone)]
pub enum DiscussionParent {
    /// A course
    Course(Course),
    /// A group, which has no dedicated kind in this crate
    Group(CanvasObject),
}

/// Parent id attribute, its path collection and its value.
struct ParentScope {
    attribute: &'static str,
    collection: &'static str,
    id: Value,
}

impl ParentScope {
    fn of(object: &CanvasObject) -> Result<Self> {
        for (attribute, collection) in [("course_id", "courses"), ("group_id", "groups")] {
            if let Some(id) = object.get_opt::<Value>(attribute)? {
                return Ok(Self {
                    attribute,
                    collection,
                    id,
                });
            }
        }
        Err(Error::AttributeAbsent {
            kind: object.kind(),
            name: "course_id or group_id".to_string(),
        })
    }

    fn path(&self) -> String {
        let id = match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!("{}/{}", self.collection, id)
    }

    fn extra(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(self.attribute.to_string(), self.id.clone());
        map
    }
}

/// Send a request whose success is signalled by a 204.
async fn toggle(requester: &Requester, method: Method, path: &str) -> Result<bool> {
    let response = requester.request(method, path, &Params::new(), None).await?;
    Ok(no_content(&response))
}

canvas_resource!(
    /// A discussion topic or announcement.
    DiscussionTopic,
    title = "title"
);

impl Addressable for DiscussionTopic {
    fn path(&self) -> Result<String> {
        let parent = ParentScope::of(self.object())?;
        Ok(format!("{}/discussion_topics/{}", parent.path(), self.id()?))
    }
}

impl Updatable for DiscussionTopic {
    const MARKER: &'static str = "title";
}

impl DiscussionTopic {
    /// Fetch the course or group this topic belongs to.
    pub async fn get_parent(&self) -> Result<DiscussionParent> {
        let parent = ParentScope::of(self.object())?;
        let response = self.requester().get(&parent.path(), &Params::new()).await?;
        if parent.attribute == "course_id" {
            Ok(DiscussionParent::Course(hydrate_typed(response.body, self.requester())?))
        } else {
            Ok(DiscussionParent::Group(hydrate(response.body, self.requester())?))
        }
    }

    /// Delete this topic. Returns `true` if the server reports it deleted.
    pub async fn delete(&self) -> Result<bool> {
        let response = self.requester().delete(&self.path()?, &Params::new()).await?;
        Ok(response.body.get("deleted_at").is_some())
    }

    /// Attributes every entry of this topic inherits.
    fn entry_extra(&self) -> Result<Map<String, Value>> {
        let mut extra = ParentScope::of(self.object())?.extra();
        extra.insert("discussion_id".to_string(), self.object().get("id")?);
        Ok(extra)
    }

    /// Create a top-level entry in this topic.
    pub async fn post_entry(&self, body: Value) -> Result<DiscussionEntry> {
        let path = format!("{}/entries", self.path()?);
        fetch(
            self.requester(),
            Method::Post,
            &path,
            Some(&body),
            &self.entry_extra()?,
        )
        .await
    }

    /// List the top-level entries of this topic.
    pub fn get_topic_entries(&self, params: Option<Value>) -> PaginatedStream<DiscussionEntry> {
        let scope = self
            .path()
            .and_then(|path| Ok((format!("{path}/entries"), self.entry_extra()?)));
        child_collection(self.requester(), scope, params)
    }

    /// List specific entries of this topic, smallest id first. `ids` may be
    /// raw ids or entries.
    pub fn get_entries<I>(&self, ids: I) -> PaginatedStream<DiscussionEntry>
    where
        I: IntoIterator,
        I::Item: AsId,
    {
        let ids = match ids.into_iter().map(|id| id.as_id()).collect::<Result<Vec<_>>>() {
            Ok(ids) => ids,
            Err(e) => return PaginatedStream::failed(self.requester().clone(), e),
        };
        let scope = self
            .path()
            .and_then(|path| Ok((format!("{path}/entry_list"), self.entry_extra()?)));
        child_collection(self.requester(), scope, Some(json!({ "ids": ids })))
    }

    /// Mark the topic as read for the current user.
    pub async fn mark_as_read(&self) -> Result<bool> {
        toggle(self.requester(), Method::Put, &format!("{}/read", self.path()?)).await
    }

    /// Mark the topic as unread for the current user.
    pub async fn mark_as_unread(&self) -> Result<bool> {
        toggle(self.requester(), Method::Delete, &format!("{}/read", self.path()?)).await
    }

    /// Mark the topic and all of its entries as read.
    pub async fn mark_entries_as_read(&self) -> Result<bool> {
        toggle(self.requester(), Method::Put, &format!("{}/read_all", self.path()?)).await
    }

    /// Mark the topic and all of its entries as unread.
    pub async fn mark_entries_as_unread(&self) -> Result<bool> {
        toggle(self.requester(), Method::Delete, &format!("{}/read_all", self.path()?)).await
    }

    /// Subscribe the current user to this topic.
    pub async fn subscribe(&self) -> Result<bool> {
        toggle(self.requester(), Method::Put, &format!("{}/subscribed", self.path()?)).await
    }

    /// Unsubscribe the current user from this topic.
    pub async fn unsubscribe(&self) -> Result<bool> {
        toggle(self.requester(), Method::Delete, &format!("{}/subscribed", self.path()?)).await
    }
}

canvas_resource!(
    /// An entry (post or reply) in a discussion topic.
    DiscussionEntry,
    title = "message"
);

impl Addressable for DiscussionEntry {
    fn path(&self) -> Result<String> {
        let parent = ParentScope::of(self.object())?;
        Ok(format!(
            "{}/discussion_topics/{}/entries/{}",
            parent.path(),
            self.object().segment("discussion_id")?,
            self.id()?
        ))
    }
}

impl Updatable for DiscussionEntry {
    const MARKER: &'static str = "updated_at";
}

impl DiscussionEntry {
    /// Fetch the topic this entry belongs to.
    pub async fn get_discussion(&self) -> Result<DiscussionTopic> {
        let parent = ParentScope::of(self.object())?;
        let path = format!(
            "{}/discussion_topics/{}",
            parent.path(),
            self.object().segment("discussion_id")?
        );
        fetch(self.requester(), Method::Get, &path, None, &parent.extra()).await
    }

    /// Delete this entry. Returns `true` if the server reports it deleted.
    pub async fn delete(&self) -> Result<bool> {
        let response = self.requester().delete(&self.path()?, &Params::new()).await?;
        Ok(response.body.get("deleted_at").is_some())
    }

    /// Attributes every reply to this entry inherits.
    fn reply_extra(&self) -> Result<Map<String, Value>> {
        let mut extra = ParentScope::of(self.object())?.extra();
        extra.insert("discussion_id".to_string(), self.object().get("discussion_id")?);
        Ok(extra)
    }

    /// Reply to this entry.
    pub async fn post_reply(&self, body: Value) -> Result<DiscussionEntry> {
        let path = format!("{}/replies", self.path()?);
        fetch(
            self.requester(),
            Method::Post,
            &path,
            Some(&body),
            &self.reply_extra()?,
        )
        .await
    }

    /// List the replies to this entry.
    pub fn get_replies(&self, params: Option<Value>) -> PaginatedStream<DiscussionEntry> {
        let scope = self
            .path()
            .and_then(|path| Ok((format!("{path}/replies"), self.reply_extra()?)));
        child_collection(self.requester(), scope, params)
    }

    /// Mark the entry as read for the current user.
    pub async fn mark_as_read(&self) -> Result<bool> {
        toggle(self.requester(), Method::Put, &format!("{}/read", self.path()?)).await
    }

    /// Mark the entry as unread for the current user.
    pub async fn mark_as_unread(&self) -> Result<bool> {
        toggle(self.requester(), Method::Delete, &format!("{}/read", self.path()?)).await
    }

    /// Rate this entry. Only `0` and `1` are accepted.
    pub async fn rate(&self, rating: u8) -> Result<bool> {
        if rating > 1 {
            return Err(Error::InvalidInput("`rating` must be 0 or 1.".to_string()));
        }
        let path = format!("{}/rating", self.path()?);
        let response = self.requester().post(&path, &json!({ "rating": rating })).await?;
        Ok(no_content(&response))
    }
}
