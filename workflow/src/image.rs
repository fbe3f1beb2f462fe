use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_FILE_NAME: &str = "image.jpg";
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// A picked image. Cloning shares the underlying bytes.
///
/// Every reference gets a fresh id, so picking the same file twice still
/// counts as a new selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    id: Uuid,
    file_name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl ImageReference {
    pub fn new(
        bytes: impl Into<Arc<[u8]>>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn jpeg(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(bytes, DEFAULT_FILE_NAME, DEFAULT_CONTENT_TYPE)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_FILE_NAME);
        Ok(Self::new(bytes, file_name, content_type_for(file_name)))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "jpg" | "jpeg" => DEFAULT_CONTENT_TYPE,
        _ => "application/octet-stream",
    }
}
