//! One guarded collection of records

use shared::{next_id, Record, RecordId};
use tokio::sync::RwLock;

use super::latency::{pause, Latency};
use super::StoreError;

/// An ordered list of records of one kind.
///
/// Every operation hands back copies, so callers never hold a reference into
/// the collection. Writes take the lock for the whole read-modify-write, which
/// keeps id assignment and merges from interleaving.
pub struct Collection<T> {
    records: RwLock<Vec<T>>,
    latency: Latency,
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    /// Snapshot of every record in stored order
    pub async fn get_all(&self) -> Vec<T> {
        pause(self.latency.get_all).await;
        let records = self.records.read().await.clone();
        tracing::debug!(kind = T::KIND, count = records.len(), "records listed");
        records
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<T, StoreError> {
        pause(self.latency.get_by_id).await;
        let record = self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<T>(id))?;
        tracing::debug!(kind = T::KIND, id, "record fetched");
        Ok(record)
    }

    /// Append a record built under the next free id
    pub async fn create(&self, build: impl FnOnce(RecordId) -> T) -> Result<T, StoreError> {
        pause(self.latency.create).await;
        let mut records = self.records.write().await;
        let id = next_id(records.iter()).ok_or(StoreError::IdsExhausted { kind: T::KIND })?;
        let mut record = build(id);
        record.set_id(id);
        records.push(record.clone());
        tracing::debug!(kind = T::KIND, id, "record created");
        Ok(record)
    }

    /// Merge changes into a copy of the stored record and write it back only if
    /// `merge` succeeds. The stored id always wins over whatever `merge` left.
    pub async fn update<E>(
        &self,
        id: RecordId,
        merge: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        pause(self.latency.update).await;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found::<T>(id))?;

        let mut merged = slot.clone();
        merge(&mut merged)?;
        merged.set_id(id);
        *slot = merged.clone();
        tracing::debug!(kind = T::KIND, id, "record updated");
        Ok(merged)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        pause(self.latency.delete).await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found::<T>(id))?;
        records.remove(index);
        tracing::debug!(kind = T::KIND, id, "record deleted");
        Ok(())
    }

    /// Record count, without simulated latency
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
