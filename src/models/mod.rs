use std::fmt;

use mongodb::bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Identifier of a stored note, the collection's native `ObjectId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(ObjectId);

impl NoteId {
    /// Parses the hex form used at the HTTP boundary.
    ///
    /// Anything that is not a 24 character hex string yields `None`; callers
    /// treat that the same way as a missing document.
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(Self)
    }

    pub const fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for NoteId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A note document as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub title: String,
    pub body: String,
}

/// Fields of a note that does not exist yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

/// Partial update of a note. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NoteChanges {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// Builds the `$set` payload, only with the fields that are present.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(body) = &self.body {
            set.insert("body", body.as_str());
        }
        doc! { "$set": set }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_parses_hex_and_rejects_garbage() {
        let id = NoteId::parse("61f19e1ab8b744785180cdd1").unwrap();
        assert_eq!(id.to_string(), "61f19e1ab8b744785180cdd1");

        assert!(NoteId::parse("not-an-id").is_none());
        assert!(NoteId::parse("").is_none());
        assert!(NoteId::parse("61f19e1ab8b744785180cdd").is_none());
    }

    #[test]
    fn note_serializes_id_under_underscore_key() {
        let note = Note {
            id: NoteId::parse("61f19e1ab8b744785180cdd1").unwrap(),
            title: "My First Note".to_string(),
            body: "Hello, World!".to_string(),
        };

        let document = mongodb::bson::to_document(&note).unwrap();
        assert_eq!(
            document.get_object_id("_id").unwrap().to_hex(),
            "61f19e1ab8b744785180cdd1"
        );
        assert_eq!(document.get_str("title").unwrap(), "My First Note");
    }

    #[test]
    fn set_document_only_lists_present_fields() {
        let changes = NoteChanges {
            title: None,
            body: Some("Updated".to_string()),
        };

        let update = changes.to_set_document();
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("body").unwrap(), "Updated");
        assert!(!set.contains_key("title"));
    }

    #[test]
    fn changes_are_empty_only_without_fields() {
        assert!(NoteChanges::default().is_empty());
        assert!(
            !NoteChanges {
                title: Some(String::new()),
                body: None,
            }
            .is_empty()
        );
    }
}
