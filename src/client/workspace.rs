use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

/// The current-workspace selection: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: i64,
    pub name: String,
}

impl Default for WorkspaceRef {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Default Workspace".to_string(),
        }
    }
}

type Listener = Box<dyn Fn(&WorkspaceRef) + Send + Sync>;

/// Process-wide current-workspace state.
///
/// Every table controller listens for changes so it can reload its entity
/// list (and any workspace-scoped dropdowns) when the selection moves.
/// Last write wins; there is no cross-process synchronization.
pub struct WorkspaceContext {
    current: RwLock<WorkspaceRef>,
    listeners: Mutex<Vec<Listener>>,
}

impl WorkspaceContext {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(WorkspaceRef::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> WorkspaceRef {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Persist the selection and notify every registered listener.
    pub fn set_current(&self, workspace: WorkspaceRef) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = workspace.clone();
        for listener in self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
        {
            listener(&workspace);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&WorkspaceRef) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }
}

impl Default for WorkspaceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_defaults_to_workspace_one() {
        let ctx = WorkspaceContext::new();
        let current = ctx.current();
        assert_eq!(current.id, 1);
        assert_eq!(current.name, "Default Workspace");
    }

    #[test]
    fn test_change_event_reaches_every_listener() {
        let ctx = WorkspaceContext::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            ctx.subscribe(move |ws| {
                assert_eq!(ws.id, 5);
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        ctx.set_current(WorkspaceRef {
            id: 5,
            name: "Workspace 5".into(),
        });
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(ctx.current().id, 5);
    }
}
