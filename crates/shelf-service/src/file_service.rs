//! Uploaded image files.

use crate::storage::FileStorage;
use shelf_config::StorageConfig;
use shelf_core::domain::{FileRecord, NewFileRecord};
use shelf_core::{ListResponse, PageRequest, Resource, ShelfError, ShelfResult};
use shelf_repository::{CrudStore, FileRepository, ListStore};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Image formats accepted for upload, identified by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    /// Identifies the format from the leading bytes of the content.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
        }
    }
}

/// Upload, listing and removal of image files.
#[derive(Clone)]
pub struct FileService {
    repository: Arc<dyn FileRepository>,
    storage: Arc<dyn FileStorage>,
    config: StorageConfig,
}

impl FileService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn FileRepository>,
        storage: Arc<dyn FileStorage>,
        config: StorageConfig,
    ) -> Self {
        Self {
            repository,
            storage,
            config,
        }
    }

    /// Upload size limit in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    pub async fn list(&self, page: PageRequest) -> ShelfResult<ListResponse<FileRecord>> {
        let total = self.repository.count().await?;
        let list = self.repository.find_page(page).await?;
        Ok(ListResponse::new(list, total))
    }

    pub async fn get(&self, id: i64) -> ShelfResult<FileRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::not_found(FileRecord::NAME, id))
    }

    /// Stores an image and records it. The stored object is removed again
    /// if the record cannot be written.
    pub async fn upload(&self, file_name: Option<&str>, bytes: &[u8]) -> ShelfResult<FileRecord> {
        if bytes.is_empty() {
            return Err(ShelfError::validation("file is empty"));
        }
        if bytes.len() > self.config.max_file_size {
            return Err(ShelfError::PayloadTooLarge(format!(
                "file exceeds the {} byte limit",
                self.config.max_file_size
            )));
        }
        let kind = ImageKind::sniff(bytes).ok_or_else(|| {
            ShelfError::UnsupportedMedia("only JPEG, PNG, GIF and WebP images are accepted".to_string())
        })?;

        let stored_name = format!("{}{}", Uuid::now_v7(), kind.extension());
        let file_path = self.storage.put(&stored_name, bytes).await?;

        let record = NewFileRecord {
            file_name: file_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(&stored_name)
                .to_string(),
            file_path: file_path.clone(),
            url: format!("{}/{stored_name}", self.config.public_base_url.trim_end_matches('/')),
            mime_type: kind.mime_type().to_string(),
            size: i64::try_from(bytes.len()).unwrap_or(i64::MAX),
        };

        match self.repository.insert(&record).await {
            Ok(created) => {
                info!(id = created.id, url = %created.url, "File uploaded");
                Ok(created)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&file_path).await {
                    warn!(path = %file_path, error = %cleanup, "Orphaned upload could not be removed");
                }
                Err(e)
            }
        }
    }

    /// Removes the stored object, then the record.
    pub async fn delete(&self, id: i64) -> ShelfResult<()> {
        let record = self.get(id).await?;
        self.storage.remove(&record.file_path).await?;

        if !self.repository.delete(id).await? {
            return Err(ShelfError::not_found(FileRecord::NAME, id));
        }

        debug!(id, "File deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalFileStorage;
    use shelf_repository::memory::InMemoryStore;
    use std::path::Path;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

    struct Fixture {
        service: FileService,
        repository: Arc<InMemoryStore<FileRecord>>,
        dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(InMemoryStore::<FileRecord>::new());
        let config = StorageConfig {
            upload_dir: dir.path().to_string_lossy().into_owned(),
            public_base_url: "/static/uploads/".to_string(),
            max_file_size: 64,
        };
        let service = FileService::new(
            repository.clone(),
            Arc::new(LocalFileStorage::new(dir.path())),
            config,
        );
        Fixture {
            service,
            repository,
            dir,
        }
    }

    fn stored_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(PNG), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(b"GIF89a...."), Some(ImageKind::Gif));
        assert_eq!(ImageKind::sniff(b"RIFF\x10\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::sniff(b"RIFF\x10\0\0\0WAVEfmt "), None);
        assert_eq!(ImageKind::sniff(b"%PDF-1.7"), None);
        assert_eq!(ImageKind::sniff(&[]), None);
    }

    #[tokio::test]
    async fn test_upload_png() {
        let f = fixture();
        let record = f.service.upload(Some("cat.png"), PNG).await.unwrap();

        assert_eq!(record.file_name, "cat.png");
        assert_eq!(record.mime_type, "image/png");
        assert_eq!(record.size, 12);
        assert!(record.url.starts_with("/static/uploads/"));
        assert!(record.url.ends_with(".png"));
        assert!(!record.url.contains("//"));
        assert!(Path::new(&record.file_path).exists());
        assert_eq!(f.service.get(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_large_files() {
        let f = fixture();
        assert!(matches!(
            f.service.upload(Some("notes.txt"), b"hello world").await,
            Err(ShelfError::UnsupportedMedia(_))
        ));
        let mut large = PNG.to_vec();
        large.resize(65, 0);
        assert!(matches!(
            f.service.upload(Some("big.png"), &large).await,
            Err(ShelfError::PayloadTooLarge(_))
        ));
        assert!(matches!(f.service.upload(None, &[]).await, Err(ShelfError::Validation(_))));
        assert_eq!(stored_files(f.dir.path()), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_object() {
        let f = fixture();
        f.repository.set_failing(true);
        assert!(f.service.upload(Some("cat.png"), PNG).await.is_err());
        assert_eq!(stored_files(f.dir.path()), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_object_and_record() {
        let f = fixture();
        let record = f.service.upload(None, PNG).await.unwrap();
        f.service.delete(record.id).await.unwrap();

        assert!(!Path::new(&record.file_path).exists());
        assert!(matches!(f.service.get(record.id).await, Err(ShelfError::NotFound { .. })));
        assert!(matches!(f.service.delete(record.id).await, Err(ShelfError::NotFound { .. })));
        assert_eq!(f.service.list(PageRequest::default()).await.unwrap().total, 0);
    }
}
