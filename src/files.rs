use std::{io, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use super::{Client, FileAccessError, Result};

/// A file ready to travel inside a request, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub data: String,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Result<Self, FileAccessError> {
        let name = name.into();
        if name.is_empty() || bytes.is_empty() {
            return Err(FileAccessError::Missing);
        }
        Ok(Self {
            name,
            data: STANDARD.encode(bytes),
        })
    }

    /// Reads `path` and names the payload after its last component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FileAccessError> {
        let path = path.as_ref();
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileAccessError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(FileAccessError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if metadata.is_dir() {
            return Err(FileAccessError::IsDirectory(path.to_path_buf()));
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| FileAccessError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, &bytes)
    }
}

impl Client {
    pub async fn upload_file(&self, file: &FilePayload) -> Result<Value> {
        self.call("upload_file")?
            .arg("data", file.data.as_str())
            .arg("file_name", file.name.as_str())
            .send()
            .await
    }

    pub async fn send_channel_picture(&self, channel_id: &str, file: &FilePayload) -> Result<Value> {
        self.call("send_channel_picture")?
            .arg("channel_id", channel_id)
            .arg("base64_image", file.data.as_str())
            .arg("filename", file.name.as_str())
            .send()
            .await
    }

    pub async fn ucode_decode_file(&self, file: &FilePayload) -> Result<Value> {
        self.call("ucode_decode")?
            .arg("base64_image", file.data.as_str())
            .send()
            .await
    }
}
