use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory blob storage backing the document entity. Keyed by document id;
/// blobs live and die with the process, like every other row.
pub struct FileStore {
    blobs: RwLock<HashMap<i64, StoredFile>>,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn put(&self, document_id: i64, file: StoredFile) {
        self.blobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(document_id, file);
    }

    pub fn get(&self, document_id: i64) -> Option<StoredFile> {
        self.blobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&document_id)
            .cloned()
    }

    pub fn remove(&self, document_id: i64) -> Option<StoredFile> {
        self.blobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&document_id)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let store = FileStore::new();
        store.put(
            7,
            StoredFile {
                file_name: "report.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![1, 2, 3],
            },
        );
        let file = store.get(7).expect("stored");
        assert_eq!(file.file_name, "report.pdf");
        assert_eq!(file.bytes, vec![1, 2, 3]);
        assert!(store.remove(7).is_some());
        assert!(store.get(7).is_none());
    }
}
