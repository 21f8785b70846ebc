//! Kanban/scrum board over the task entity: cards grouped by `status`, where
//! each column is one status value. Moving a card updates that single field
//! through the standard task update call, then regroups from the local array
//! with no refetch.

use serde_json::json;

use crate::client::{ApiClient, ClientError};
use crate::store::models::Task;

pub const KANBAN_COLUMNS: &[&str] = &["todo", "in_progress", "review", "done"];

pub struct Board {
    columns: Vec<String>,
    tasks: Vec<Task>,
}

impl Board {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            tasks: Vec::new(),
        }
    }

    pub fn kanban() -> Self {
        Self::new(KANBAN_COLUMNS)
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Cards per column, in array order. Tasks whose status matches no
    /// column are not rendered.
    pub fn grouped(&self) -> Vec<(String, Vec<&Task>)> {
        self.columns
            .iter()
            .map(|column| {
                let cards = self
                    .tasks
                    .iter()
                    .filter(|t| t.status == *column)
                    .collect::<Vec<_>>();
                (column.clone(), cards)
            })
            .collect()
    }

    /// Drag-and-drop: push the status change through the standard update
    /// call, then mirror it into the local array. No other card moves.
    pub async fn move_card(
        &mut self,
        client: &ApiClient,
        task_id: i64,
        new_status: &str,
    ) -> Result<Task, ClientError> {
        let updated = client
            .update_task(task_id, &json!({ "status": new_status }), None)
            .await?;
        self.apply_move(task_id, new_status);
        Ok(updated)
    }

    /// Local half of a move; exposed separately so a render layer can apply
    /// an already-confirmed update.
    pub fn apply_move(&mut self, task_id: i64, new_status: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.status = new_status.to_string();
                true
            }
            None => false,
        }
    }
}
