//! # 内存存储
//!
//! 基于 `DashMap` 的进程内 [`Storage`] 实现，用于开发服务与测试。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::{Storage, StorageEntry};
use crate::error::Result;

/// 内存存储
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前条目数量
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<StorageEntry>> {
        Ok(self
            .data
            .get(key)
            .map(|value| StorageEntry::new(key, value.value().clone())))
    }

    async fn put(&self, entry: StorageEntry) -> Result<()> {
        self.data.insert(entry.key, entry.value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let storage = MemoryStorage::new();
        assert!(storage.get("config").await.unwrap().is_none());

        storage.put(StorageEntry::new("config", b"a".to_vec())).await.unwrap();
        storage.put(StorageEntry::new("config", b"b".to_vec())).await.unwrap();

        let entry = storage.get("config").await.unwrap().unwrap();
        assert_eq!(entry.value, b"b".to_vec());
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.delete("config").await.unwrap();
        storage.put(StorageEntry::new("config", b"a".to_vec())).await.unwrap();
        storage.delete("config").await.unwrap();
        storage.delete("config").await.unwrap();
        assert!(storage.is_empty());
    }


    #[tokio::test]
    async fn test_clones_share_data() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        clone.put(StorageEntry::new("config", b"x".to_vec())).await.unwrap();
        assert!(storage.get("config").await.unwrap().is_some());
    }
}
