pub mod files;
pub mod models;
pub mod repository;
pub mod seed;

use std::sync::Arc;

use crate::store::files::FileStore;
use crate::store::models::{
    Contact, Customer, Department, Document, Enquiry, Group, Job, Permission, Project, Role, Task,
    Timesheet, User,
};
use crate::store::repository::{Entity, Repository, WorkspaceRepository};

/// Every repository the server owns. Handlers receive this via axum `State`,
/// so a persistent backend can replace any repository without touching them.
pub struct Stores {
    pub workspaces: WorkspaceRepository,
    pub users: Repository<User>,
    pub groups: Repository<Group>,
    pub roles: Repository<Role>,
    pub departments: Repository<Department>,
    pub permissions: Repository<Permission>,
    pub contacts: Repository<Contact>,
    pub customers: Repository<Customer>,
    pub enquiries: Repository<Enquiry>,
    pub projects: Repository<Project>,
    pub jobs: Repository<Job>,
    pub tasks: Repository<Task>,
    pub timesheets: Repository<Timesheet>,
    pub documents: Repository<Document>,
    pub files: FileStore,
}

pub type AppState = Arc<Stores>;

impl Stores {
    pub fn empty() -> Self {
        Self {
            workspaces: WorkspaceRepository::new(),
            users: Repository::new(),
            groups: Repository::new(),
            roles: Repository::new(),
            departments: Repository::new(),
            permissions: Repository::new(),
            contacts: Repository::new(),
            customers: Repository::new(),
            enquiries: Repository::new(),
            projects: Repository::new(),
            jobs: Repository::new(),
            tasks: Repository::new(),
            timesheets: Repository::new(),
            documents: Repository::new(),
            files: FileStore::new(),
        }
    }

    /// Row counts per entity, for the data-viewer endpoint and boot logging.
    pub fn counts(&self) -> serde_json::Value {
        serde_json::json!({
            "workspaces": self.workspaces.len(),
            (User::PLURAL): self.users.len(),
            (Group::PLURAL): self.groups.len(),
            (Role::PLURAL): self.roles.len(),
            (Department::PLURAL): self.departments.len(),
            (Permission::PLURAL): self.permissions.len(),
            (Contact::PLURAL): self.contacts.len(),
            (Customer::PLURAL): self.customers.len(),
            (Enquiry::PLURAL): self.enquiries.len(),
            (Project::PLURAL): self.projects.len(),
            (Job::PLURAL): self.jobs.len(),
            (Task::PLURAL): self.tasks.len(),
            (Timesheet::PLURAL): self.timesheets.len(),
            (Document::PLURAL): self.documents.len(),
        })
    }
}
