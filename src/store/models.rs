use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::repository::{Entity, Repository};
use crate::store::Stores;

// Per-entity status defaults. Status stays free text on the wire; these only
// fill in rows created without one.
fn active() -> String {
    "active".to_string()
}

fn open() -> String {
    "open".to_string()
}

fn todo() -> String {
    "todo".to_string()
}

fn pending() -> String {
    "pending".to_string()
}

fn medium() -> String {
    "medium".to_string()
}

/// The tenant/partition key. Every other entity carries a `workspace_id`
/// pointing at one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    // Argon2 PHC string; set server-side only, never serialized.
    #[serde(skip)]
    pub password_hash: String,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_role() -> String {
    "member".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    pub resource: String,
    pub action: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default = "medium")]
    pub priority: String,
    #[serde(default = "open")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default = "medium")]
    pub priority: String,
    #[serde(default = "pending")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Task `status` doubles as the kanban/scrum board column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default = "medium")]
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "todo")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timesheet {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub task_id: Option<i64>,
    pub work_date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "pending")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub workspace_id: i64,
    pub name: String,
    pub file_name: String,
    #[serde(default = "octet_stream")]
    pub content_type: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub uploaded_by: Option<i64>,
    #[serde(default = "active")]
    pub status: String,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn octet_stream() -> String {
    "application/octet-stream".to_string()
}

macro_rules! entity {
    ($ty:ident, $name:literal, $plural:literal, $field:ident, $label:expr) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;
            const PLURAL: &'static str = $plural;

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn workspace_id(&self) -> i64 {
                self.workspace_id
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn repo(stores: &Stores) -> &Repository<Self> {
                &stores.$field
            }
        }

        impl $ty {
            /// Display label used in tables and delete confirmations.
            pub fn label(&self) -> String {
                let f: fn(&$ty) -> String = $label;
                f(self)
            }
        }
    };
}

entity!(User, "user", "users", users, |u| u.name.clone());
entity!(Group, "group", "groups", groups, |g| g.name.clone());
entity!(Role, "role", "roles", roles, |r| r.name.clone());
entity!(Department, "department", "departments", departments, |d| d
    .name
    .clone());
entity!(Permission, "permission", "permissions", permissions, |p| p
    .name
    .clone());
entity!(Contact, "contact", "contacts", contacts, |c| format!(
    "{} {}",
    c.first_name, c.last_name
));
entity!(Customer, "customer", "customers", customers, |c| c
    .name
    .clone());
entity!(Enquiry, "enquiry", "enquiries", enquiries, |e| e
    .subject
    .clone());
entity!(Project, "project", "projects", projects, |p| p.name.clone());
entity!(Job, "job", "jobs", jobs, |j| j.title.clone());
entity!(Task, "task", "tasks", tasks, |t| t.title.clone());
entity!(Timesheet, "timesheet", "timesheets", timesheets, |t| format!(
    "{} ({}h)",
    t.work_date, t.hours
));
entity!(Document, "document", "documents", documents, |d| d
    .name
    .clone());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at_serializes_camel_case() {
        let ws = Workspace {
            id: 1,
            name: "Default Workspace".into(),
            description: None,
            status: "active".into(),
            created_at: Utc::now(),
        };
        let v = serde_json::to_value(&ws).expect("serialize");
        assert!(v.get("createdAt").is_some());
        assert!(v.get("created_at").is_none());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            workspace_id: 1,
            name: "Admin".into(),
            email: "administrative@admin.com".into(),
            role: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            status: "active".into(),
            created_at: Utc::now(),
        };
        let v = serde_json::to_value(&user).expect("serialize");
        assert!(v.get("password_hash").is_none());
    }

    #[test]
    fn test_create_payload_fills_defaults() {
        let task: Task =
            serde_json::from_value(serde_json::json!({ "title": "Ship it" })).expect("parse");
        assert_eq!(task.id, 0);
        assert_eq!(task.status, "todo");
        assert_eq!(task.priority, "medium");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_contact_label_joins_names() {
        let contact: Contact = serde_json::from_value(serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }))
        .expect("parse");
        assert_eq!(contact.label(), "Ada Lovelace");
    }
}
