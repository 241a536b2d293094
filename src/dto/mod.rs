use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ValidationIssue},
    models::{NewNote, Note, NoteChanges},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "_id": "61f197e7d0b033f65675a5a1",
    "title": "My First Note",
    "body": "Hello, World!"
}))]
pub struct NoteResponse {
    /// Note ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub body: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title,
            body: note.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "title": "My First Note", "body": "Hello, World!" }))]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note body
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "title": "My First Note", "body": "Hello, World!" }))]
pub struct UpdateNoteRequest {
    /// New title, left unchanged when omitted
    #[serde(default)]
    pub title: Option<String>,
    /// New body, left unchanged when omitted
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GreetingResponse {
    pub message: String,
}

fn require_non_empty(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.is_empty() {
        issues.push(ValidationIssue::new(
            &["body", field],
            "String should have at least 1 character",
            "string_too_short",
        ));
    }
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<NewNote, ApiError> {
        let mut issues = Vec::new();
        require_non_empty("title", &self.title, &mut issues);
        require_non_empty("body", &self.body, &mut issues);

        if !issues.is_empty() {
            return Err(ApiError::Validation(issues));
        }

        Ok(NewNote {
            title: self.title,
            body: self.body,
        })
    }
}

impl UpdateNoteRequest {
    /// A present title must be non-empty; the body may be cleared.
    pub fn validate(self) -> Result<NoteChanges, ApiError> {
        let mut issues = Vec::new();
        if let Some(title) = &self.title {
            require_non_empty("title", title, &mut issues);
        }

        if !issues.is_empty() {
            return Err(ApiError::Validation(issues));
        }

        Ok(NoteChanges {
            title: self.title,
            body: self.body,
        })
    }
}
