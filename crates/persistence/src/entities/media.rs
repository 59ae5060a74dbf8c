//! Media library entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::media::MediaFileType;

/// Database enum for media_file_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "media_file_type", rename_all = "lowercase")]
pub enum MediaFileTypeDb {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

impl From<MediaFileTypeDb> for MediaFileType {
    fn from(db: MediaFileTypeDb) -> Self {
        match db {
            MediaFileTypeDb::Image => Self::Image,
            MediaFileTypeDb::Document => Self::Document,
            MediaFileTypeDb::Video => Self::Video,
            MediaFileTypeDb::Audio => Self::Audio,
            MediaFileTypeDb::Other => Self::Other,
        }
    }
}

impl From<MediaFileType> for MediaFileTypeDb {
    fn from(t: MediaFileType) -> Self {
        match t {
            MediaFileType::Image => Self::Image,
            MediaFileType::Document => Self::Document,
            MediaFileType::Video => Self::Video,
            MediaFileType::Audio => Self::Audio,
            MediaFileType::Other => Self::Other,
        }
    }
}

/// Database row mapping for the per-tenant media_folders table.
#[derive(Debug, Clone, FromRow)]
pub struct MediaFolderEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MediaFolderEntity> for domain::models::media::MediaFolder {
    fn from(entity: MediaFolderEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            parent_id: entity.parent_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the per-tenant media_files table.
#[derive(Debug, Clone, FromRow)]
pub struct MediaFileEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub file_type: MediaFileTypeDb,
    pub original_filename: String,
    pub file_size: i64,
    pub mime_type: String,
    pub folder_id: Option<Uuid>,
    pub alt_text: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MediaFileEntity> for domain::models::media::MediaFile {
    fn from(entity: MediaFileEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            file_type: entity.file_type.into(),
            original_filename: entity.original_filename,
            file_size: entity.file_size,
            mime_type: entity.mime_type,
            folder_id: entity.folder_id,
            alt_text: entity.alt_text,
            width: entity.width,
            height: entity.height,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
