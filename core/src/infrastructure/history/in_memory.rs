use std::{collections::VecDeque, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    analysis::entities::AnalysisRecord, common::entities::app_errors::CoreError,
    history::ports::HistoryRepository,
};

/// Process-wide history. Prepend+truncate and removal each happen under one
/// write lock, so concurrent requests cannot interleave them.
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    records: Arc<RwLock<VecDeque<AnalysisRecord>>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            capacity,
        }
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn capacity(&self) -> usize {
        self.capacity
    }

    async fn prepend(&self, record: AnalysisRecord) -> Result<Vec<AnalysisRecord>, CoreError> {
        let mut records = self.records.write().await;
        records.push_front(record);

        if records.len() > self.capacity {
            let evicted = records.split_off(self.capacity);
            return Ok(Vec::from(evicted));
        }

        Ok(Vec::new())
    }

    async fn list(&self) -> Result<Vec<AnalysisRecord>, CoreError> {
        let records = self.records.read().await;
        Ok(records.iter().cloned().collect())
    }

    async fn get_by_id(&self, record_id: Uuid) -> Result<Option<AnalysisRecord>, CoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == record_id).cloned())
    }

    async fn remove(&self, record_id: Uuid) -> Result<Option<AnalysisRecord>, CoreError> {
        let mut records = self.records.write().await;

        let Some(index) = records.iter().position(|r| r.id == record_id) else {
            return Ok(None);
        };

        Ok(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analysis::entities::RecordStamp, storage::entities::StoredImage};

    fn record(result: &str) -> AnalysisRecord {
        AnalysisRecord::new(
            RecordStamp::now(),
            StoredImage::local("data:image/jpeg;base64,AA==".to_string()),
            "food".to_string(),
            result.to_string(),
        )
    }

    #[tokio::test]
    async fn prepend_returns_evicted_records() {
        let repository = InMemoryHistoryRepository::new(2);

        let a = record("a");
        let b = record("b");
        let c = record("c");

        assert!(repository.prepend(a.clone()).await.unwrap().is_empty());
        assert!(repository.prepend(b.clone()).await.unwrap().is_empty());
        assert_eq!(repository.prepend(c.clone()).await.unwrap(), vec![a]);

        assert_eq!(repository.list().await.unwrap(), vec![c, b]);
    }

    #[tokio::test]
    async fn remove_only_touches_the_matching_record() {
        let repository = InMemoryHistoryRepository::new(5);
        let a = record("a");
        let b = record("b");
        repository.prepend(a.clone()).await.unwrap();
        repository.prepend(b.clone()).await.unwrap();

        assert_eq!(repository.remove(a.id).await.unwrap(), Some(a.clone()));
        assert_eq!(repository.remove(a.id).await.unwrap(), None);
        assert_eq!(repository.get_by_id(b.id).await.unwrap(), Some(b.clone()));
        assert_eq!(repository.list().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped() {
        let repository = InMemoryHistoryRepository::new(0);
        assert_eq!(repository.capacity(), 1);

        repository.prepend(record("a")).await.unwrap();
        let newest = record("b");
        repository.prepend(newest.clone()).await.unwrap();
        assert_eq!(repository.list().await.unwrap(), vec![newest]);
    }

    #[tokio::test]
    async fn huge_capacity_does_not_preallocate() {
        let repository = InMemoryHistoryRepository::new(usize::MAX);
        assert_eq!(repository.capacity(), usize::MAX);
        assert_eq!(repository.records.read().await.capacity(), 0);

        let only = record("only");
        assert!(repository.prepend(only.clone()).await.unwrap().is_empty());
        assert_eq!(repository.list().await.unwrap(), vec![only]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_respect_the_bound() {
        let repository = InMemoryHistoryRepository::new(20);

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.prepend(record(&i.to_string())).await })
            })
            .collect();

        let mut evicted = 0;
        for handle in handles {
            evicted += handle.await.unwrap().unwrap().len();
        }

        assert_eq!(repository.list().await.unwrap().len(), 20);
        assert_eq!(evicted, 44);
    }
}
