//! Entity models held by the store

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role chosen on the mock login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Consumer,
    Creator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "CONSUMER",
            Role::Creator => "CREATOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The locally held identity of the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Whether this session may publish new videos
    pub fn can_upload(&self) -> bool {
        self.role == Role::Creator
    }
}

/// Audience classification of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRating {
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "18")]
    Eighteen,
}

impl AgeRating {
    /// All ratings, in the order the filters offer them
    pub const ALL: [AgeRating; 4] = [
        AgeRating::Pg,
        AgeRating::Twelve,
        AgeRating::Fifteen,
        AgeRating::Eighteen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRating::Pg => "PG",
            AgeRating::Twelve => "12",
            AgeRating::Fifteen => "15",
            AgeRating::Eighteen => "18",
        }
    }
}

impl fmt::Display for AgeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a video, e.g. `v1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub(crate) String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VideoId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for VideoId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a comment, e.g. `c7`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub(crate) String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Video entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub genre: String,
    pub age_rating: AgeRating,
    /// URL or local blob handle the player loads
    pub src: String,
    pub media_type: String,
    pub created_at: DateTime<Utc>,
    pub publisher: String,
    pub producer: String,
}

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub video_id: VideoId,
    pub author_email: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// Descriptive fields entered on the upload form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFields {
    pub title: String,
    pub genre: String,
    pub age_rating: AgeRating,
    pub publisher: String,
    pub producer: String,
}

/// A media file picked on the upload form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaBlob {
    pub file_name: String,
    /// Type reported by the picker; empty when the browser could not tell
    pub content_type: String,
    /// Handle the player can load, e.g. an object URL
    pub handle: String,
}

impl MediaBlob {
    /// Fallback when neither the picker nor the file name yields a type
    pub const DEFAULT_MEDIA_TYPE: &'static str = "video/mp4";

    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        handle: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            handle: handle.into(),
        }
    }

    /// Media type of the blob: reported type, else guessed from the file
    /// name, else `video/mp4`
    pub fn media_type(&self) -> String {
        let reported = self.content_type.trim();
        if !reported.is_empty() {
            return reported.to_string();
        }

        mime_guess::from_path(&self.file_name)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| Self::DEFAULT_MEDIA_TYPE.to_string())
    }
}
