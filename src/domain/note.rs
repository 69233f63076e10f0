//! Note records and the in-memory transformations applied to a collection.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single persisted note.
///
/// Field values are kept as raw JSON: the service never checks what a client
/// stores in `title` or `text`, and records written by older versions may
/// carry any value in `id` or `createdAt`. A field that was never set is
/// omitted from the persisted record; one explicitly set to `null` stays
/// `null`. Any other top-level field is carried in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Identifier. Records written before ids were assigned have none.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    /// RFC 3339 creation time for notes created by this service.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    /// Client-supplied fields beyond the ones above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Maps a present field to `Some`, including an explicit `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Note {
    /// Build a new note with a fresh id and the current timestamp.
    pub fn new(draft: NewNote) -> Self {
        Self {
            id: Some(Value::String(Uuid::new_v4().to_string())),
            title: draft.title,
            text: draft.text,
            created_at: Some(Value::String(
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            extra: Map::new(),
        }
    }

    /// The id, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }

    /// The title, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(Value::as_str)
    }

    /// The text, when it is a string.
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }

    /// Whether this note is addressed by `id`. Only string ids ever match.
    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    /// Shallow-merge `patch` into this note.
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(text) = patch.text {
            self.text = Some(text);
        }
        self.extra.extend(patch.extra);
    }
}

/// Body of a create request. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewNote {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub text: Option<Value>,
}

/// Fields to merge into an existing note, stored verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<Value>,
    pub text: Option<Value>,
    pub extra: Map<String, Value>,
}

/// Keys a patch can never overwrite.
const FIXED_FIELDS: [&str; 2] = ["id", "createdAt"];

impl From<Map<String, Value>> for NotePatch {
    fn from(fields: Map<String, Value>) -> Self {
        let mut patch = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "title" => patch.title = Some(value),
                "text" => patch.text = Some(value),
                k if FIXED_FIELDS.contains(&k) => {}
                _ => {
                    patch.extra.insert(key, value);
                }
            }
        }
        patch
    }
}

/// First note addressed by `id`.
pub fn find<'a>(notes: &'a [Note], id: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.has_id(id))
}

/// Merge `patch` into the first note addressed by `id`, returning the merged
/// note, or `None` when no note matches.
pub fn merge_into(notes: &mut [Note], id: &str, patch: NotePatch) -> Option<Note> {
    let note = notes.iter_mut().find(|note| note.has_id(id))?;
    note.apply(patch);
    Some(note.clone())
}

/// Remove every note addressed by `id`, returning how many were removed.
pub fn remove_all(notes: &mut Vec<Note>, id: &str) -> usize {
    let before = notes.len();
    notes.retain(|note| !note.has_id(id));
    before - notes.len()
}
