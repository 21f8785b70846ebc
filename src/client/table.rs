//! Generic table controller: the one component replacing the ~15 near
//! identical per-entity page controllers. Parameterized by entity type and a
//! column model; owns the row array and the paging/sort/search state a data
//! table widget needs.

use std::future::Future;

use crate::client::error::ClientError;
use crate::store::repository::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Unauthenticated,
    Loading,
    Ready,
}

/// One rendered column: a title and a projection from the row.
pub struct Column<T> {
    pub title: &'static str,
    pub value: fn(&T) -> String,
}

/// Column layout plus the label used for row actions.
pub struct TableModel<T> {
    pub columns: Vec<Column<T>>,
    pub label: fn(&T) -> String,
}

/// A row as handed to the rendering layer. Id and label are captured at
/// render time, so a delete confirmation shows the name the user saw even if
/// the underlying row changed since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: i64,
    pub label: String,
    pub cells: Vec<String>,
}

pub struct TableController<T: Entity> {
    model: TableModel<T>,
    rows: Vec<T>,
    state: TableState,
    page_size: usize,
    search: String,
    stale: bool,
}

impl<T: Entity> TableController<T> {
    pub fn new(model: TableModel<T>, page_size: usize) -> Self {
        Self {
            model,
            rows: Vec::new(),
            state: TableState::Unauthenticated,
            page_size: page_size.max(1),
            search: String::new(),
            stale: false,
        }
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Fetch fresh rows and rebuild the table. The previous rows are
    /// discarded either way; a failed load leaves the table empty and
    /// returns the error for the caller's banner.
    pub async fn load(
        &mut self,
        authenticated: bool,
        fetch: impl Future<Output = Result<Vec<T>, ClientError>>,
    ) -> Result<(), ClientError> {
        if !authenticated {
            self.state = TableState::Unauthenticated;
            self.rows.clear();
            return Err(ClientError::Authentication("not logged in".into()));
        }

        self.state = TableState::Loading;
        match fetch.await {
            Ok(rows) => {
                self.set_rows(rows);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity = T::NAME, "table load failed: {}", e);
                self.rows.clear();
                self.state = TableState::Ready;
                self.stale = false;
                Err(e)
            }
        }
    }

    /// Replace the row array, newest-created first.
    pub fn set_rows(&mut self, mut rows: Vec<T>) {
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        self.rows = rows;
        self.state = TableState::Ready;
        self.stale = false;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Rows passing the search filter, in display order.
    fn visible(&self) -> Vec<&T> {
        if self.search.trim().is_empty() {
            return self.rows.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                self.model
                    .columns
                    .iter()
                    .any(|col| (col.value)(row).to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.visible().len()
    }

    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    /// Render one page (0-based) of visible rows.
    pub fn page(&self, index: usize) -> Vec<RenderedRow> {
        self.visible()
            .into_iter()
            .skip(index * self.page_size)
            .take(self.page_size)
            .map(|row| RenderedRow {
                id: row.id(),
                label: (self.model.label)(row),
                cells: self.model.columns.iter().map(|c| (c.value)(row)).collect(),
            })
            .collect()
    }

    /// Called from a workspace-change listener: the rows belong to the old
    /// workspace and must be reloaded.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn needs_reload(&self) -> bool {
        self.stale
    }
}
