use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::models::Workspace;
use crate::store::Stores;

/// A workspace-scoped business entity.
///
/// Implemented by every row type except `Workspace` itself, which partitions
/// the others and has its own repository.
pub trait Entity:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const NAME: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn workspace_id(&self) -> i64;
    fn created_at(&self) -> DateTime<Utc>;
    fn repo(stores: &Stores) -> &Repository<Self>;
}

/// In-memory datastore for one entity type: a map keyed by id plus a
/// monotonic id counter. Ids are assigned exactly once at insert and never
/// renumbered.
pub struct Repository<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

// Lock poisoning only happens if a writer panicked mid-operation; the map is
// still structurally sound, so recover the guard instead of propagating.
fn read_guard<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_guard<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Insert a new row, assigning the next sequential id.
    pub fn insert(&self, mut row: T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        row.set_id(id);
        write_guard(&self.rows).insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        read_guard(&self.rows).get(&id).cloned()
    }

    /// All rows belonging to one workspace, in id order.
    pub fn list_scoped(&self, workspace_id: i64) -> Vec<T> {
        read_guard(&self.rows)
            .values()
            .filter(|row| row.workspace_id() == workspace_id)
            .cloned()
            .collect()
    }

    /// Replace an existing row in place. Returns `None` if the id is unknown.
    pub fn replace(&self, id: i64, mut row: T) -> Option<T> {
        let mut rows = write_guard(&self.rows);
        if !rows.contains_key(&id) {
            return None;
        }
        row.set_id(id);
        rows.insert(id, row.clone());
        Some(row)
    }

    /// Remove a row. Returns the removed row, or `None` if already gone, so a
    /// repeated delete surfaces as not-found rather than silently succeeding.
    pub fn remove(&self, id: i64) -> Option<T> {
        write_guard(&self.rows).remove(&id)
    }

    pub fn len(&self) -> usize {
        read_guard(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> Vec<T> {
        read_guard(&self.rows).values().cloned().collect()
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Workspaces are the partition key, not a partitioned entity, so they get a
/// dedicated unscoped repository with the same id discipline.
pub struct WorkspaceRepository {
    rows: RwLock<BTreeMap<i64, Workspace>>,
    next_id: AtomicI64,
}

impl WorkspaceRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn insert(&self, mut row: Workspace) -> Workspace {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        row.id = id;
        write_guard(&self.rows).insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<Workspace> {
        read_guard(&self.rows).get(&id).cloned()
    }

    pub fn list(&self) -> Vec<Workspace> {
        read_guard(&self.rows).values().cloned().collect()
    }

    pub fn replace(&self, id: i64, mut row: Workspace) -> Option<Workspace> {
        let mut rows = write_guard(&self.rows);
        if !rows.contains_key(&id) {
            return None;
        }
        row.id = id;
        rows.insert(id, row.clone());
        Some(row)
    }

    pub fn remove(&self, id: i64) -> Option<Workspace> {
        write_guard(&self.rows).remove(&id)
    }

    pub fn len(&self) -> usize {
        read_guard(&self.rows).len()
    }
}

impl Default for WorkspaceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::Group;

    fn group(workspace_id: i64, name: &str) -> Group {
        Group {
            id: 0,
            workspace_id,
            name: name.to_string(),
            description: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let repo = Repository::<Group>::new();
        let a = repo.insert(group(1, "a"));
        let b = repo.insert(group(1, "b"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let repo = Repository::<Group>::new();
        let a = repo.insert(group(1, "a"));
        assert!(repo.remove(a.id).is_some());
        let b = repo.insert(group(1, "b"));
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_list_scoped_filters_by_workspace() {
        let repo = Repository::<Group>::new();
        repo.insert(group(1, "w1-a"));
        repo.insert(group(2, "w2-a"));
        repo.insert(group(1, "w1-b"));

        let scoped = repo.list_scoped(1);
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|g| g.workspace_id == 1));
        assert!(repo.list_scoped(3).is_empty());
    }

    #[test]
    fn test_replace_unknown_id_is_none() {
        let repo = Repository::<Group>::new();
        assert!(repo.replace(42, group(1, "ghost")).is_none());
    }

    #[test]
    fn test_replace_preserves_id() {
        let repo = Repository::<Group>::new();
        let a = repo.insert(group(1, "a"));
        let mut edited = a.clone();
        edited.id = 999; // the payload id must not win
        edited.name = "renamed".to_string();
        let saved = repo.replace(a.id, edited).expect("replace");
        assert_eq!(saved.id, a.id);
        assert_eq!(repo.get(a.id).expect("get").name, "renamed");
    }

    #[test]
    fn test_second_delete_reports_missing() {
        let repo = Repository::<Group>::new();
        let a = repo.insert(group(1, "a"));
        assert!(repo.remove(a.id).is_some());
        assert!(repo.remove(a.id).is_none());
    }
}
