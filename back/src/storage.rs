/*
    Storage dir: 2 file types
    - Data files:
        Name is the upload's uuid with no extension
        Raw content of the upload, compressed using zstd with COMPRESSION_LEVEL level
    - Meta files:
        Same uuid with .meta at the end
        Json version of Metadata
*/

use {
    crate::error::StorageError,
    std::path::{Path, PathBuf},
    uuid::Uuid,
};

const COMPRESSION_LEVEL: i32 = zstd::DEFAULT_COMPRESSION_LEVEL; // 3, 1..=22 (zstd)

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    /// As sent by the uploader, browsers derive it from the file
    pub content_type: Option<String>,
    pub size: u64,
    pub stored_size: u64,
}

pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        std::fs::create_dir_all(&dir).map_err(|e| StorageError::DirCreate {
            dir: display_path(&dir),
            why: e,
        })?;

        debug!("Using storage directory '{}'", display_path(&dir));

        Ok(Self { dir })
    }

    fn data_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(id.hyphenated().to_string())
    }

    fn meta_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.meta", id.hyphenated()))
    }

    pub async fn store(
        &self,
        id: Uuid,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Result<Metadata, StorageError> {
        use rocket::serde::json::serde_json;

        let size = data.len() as u64;

        let compressed = tokio::task::spawn_blocking(move || {
            zstd::encode_all(data.as_slice(), COMPRESSION_LEVEL)
        })
        .await?
        .map_err(|e| StorageError::Compression { why: e })?;

        let metadata = Metadata {
            content_type,
            size,
            stored_size: compressed.len() as u64,
        };

        let meta_bytes =
            serde_json::to_vec(&metadata).map_err(|e| StorageError::Serialization {
                context: format!("writing the metadata of {id}"),
                why: e,
            })?;

        let data_path = self.data_path(&id);
        write(&data_path, &compressed).await?;

        if let Err(e) = write(&self.meta_path(&id), &meta_bytes).await {
            // A data file without its meta can never be served
            if let Err(remove_error) = tokio::fs::remove_file(&data_path).await {
                error!(
                    "[{id}] Could not clean up '{}' due to: {remove_error}",
                    display_path(&data_path)
                );
            }
            return Err(e);
        }

        debug!(
            "[{id}] Stored {} bytes as {} bytes",
            metadata.size, metadata.stored_size
        );

        Ok(metadata)
    }

    pub async fn load(&self, id: Uuid) -> Result<(Metadata, Vec<u8>), StorageError> {
        use rocket::serde::json::serde_json;

        let meta_path = self.meta_path(&id);

        let exists = tokio::fs::try_exists(&meta_path)
            .await
            .map_err(|e| StorageError::FileRead {
                file: display_path(&meta_path),
                why: e,
            })?;

        if !exists {
            return Err(StorageError::NotFound { id });
        }

        let meta_bytes = read(&meta_path).await?;
        let metadata: Metadata =
            serde_json::from_slice(&meta_bytes).map_err(|e| StorageError::Deserialization {
                file: display_path(&meta_path),
                why: e,
            })?;

        let compressed = read(&self.data_path(&id)).await?;

        let data = tokio::task::spawn_blocking(move || zstd::decode_all(compressed.as_slice()))
            .await?
            .map_err(|e| StorageError::Decompression { why: e })?;

        if data.len() as u64 != metadata.size {
            warn!(
                "[{id}] Expected {} bytes but decompressed {}",
                metadata.size,
                data.len()
            );
        }

        Ok((metadata, data))
    }
}

// The default one is bad
fn display_path(path: &Path) -> String {
    path.display().to_string().replace("\\", "/")
}

async fn write(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| StorageError::FileWrite {
            file: display_path(path),
            why: e,
        })
}

async fn read(path: &Path) -> Result<Vec<u8>, StorageError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::FileRead {
            file: display_path(path),
            why: e,
        })
}
