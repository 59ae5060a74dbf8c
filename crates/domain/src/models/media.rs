//! Media library metadata models (tenant-scoped).
//!
//! Only metadata lives here; the file bytes themselves are handled by an
//! external storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Broad classification of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFileType {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

impl FromStr for MediaFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaFileType::Image),
            "document" => Ok(MediaFileType::Document),
            "video" => Ok(MediaFileType::Video),
            "audio" => Ok(MediaFileType::Audio),
            "other" => Ok(MediaFileType::Other),
            _ => Err(format!("Unknown media file type: {}", s)),
        }
    }
}

impl std::fmt::Display for MediaFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MediaFileType::Image => "image",
            MediaFileType::Document => "document",
            MediaFileType::Video => "video",
            MediaFileType::Audio => "audio",
            MediaFileType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Folder for organizing media files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MediaFolder {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Metadata record for an uploaded media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MediaFile {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub file_type: MediaFileType,
    pub original_filename: String,
    /// Size in bytes.
    pub file_size: i64,
    pub mime_type: String,
    pub folder_id: Option<Uuid>,
    pub alt_text: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a media folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMediaFolderRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parent_id: Option<Uuid>,
}

/// Request to register a media file's metadata.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMediaFileRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub file_type: MediaFileType,
    #[validate(length(min = 1, max = 255, message = "Original filename is required"))]
    pub original_filename: String,
    #[validate(range(min = 0, message = "File size must be non-negative"))]
    pub file_size: i64,
    #[validate(length(min = 1, max = 100, message = "MIME type is required"))]
    pub mime_type: String,
    pub folder_id: Option<Uuid>,
    #[serde(default)]
    pub alt_text: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_file_type_serde() {
        assert_eq!(
            serde_json::to_string(&MediaFileType::Image).unwrap(),
            "\"image\""
        );
        let t: MediaFileType = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(t, MediaFileType::Video);
        assert!(MediaFileType::from_str("gif").is_err());
    }

    #[test]
    fn test_create_file_request_validation() {
        let valid = CreateMediaFileRequest {
            name: "Hero image".to_string(),
            description: String::new(),
            file_type: MediaFileType::Image,
            original_filename: "hero.png".to_string(),
            file_size: 1024,
            mime_type: "image/png".to_string(),
            folder_id: None,
            alt_text: String::new(),
            width: Some(1920),
            height: Some(1080),
        };
        assert!(valid.validate().is_ok());

        let negative_size = CreateMediaFileRequest {
            file_size: -1,
            ..valid
        };
        assert!(negative_size.validate().is_err());
    }
}
