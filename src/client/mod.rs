//! Typed resource client for the Opsdesk API.
//!
//! One method family per entity (`get_xs` / `get_x` / `create_x` / `update_x`
//! / `delete_x`), a shared request core that injects the bearer token and the
//! workspace header, and uniform error translation into [`ClientError`].

pub mod board;
pub mod error;
pub mod session;
pub mod table;
pub mod workspace;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use board::{Board, KANBAN_COLUMNS};
pub use error::ClientError;
pub use session::{Session, SessionStore};
pub use table::{Column, TableController, TableModel, TableState};
pub use workspace::{WorkspaceContext, WorkspaceRef};

use crate::store::models::{
    Contact, Customer, Department, Document, Enquiry, Group, Job, Permission, Project, Role, Task,
    Timesheet, User, Workspace,
};

/// Which verb `update_x` sends. One configured verb, no fallback retry:
/// retrying a failed update with an identical payload cannot change the
/// outcome for anything but transient errors, and conflates them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateVerb {
    #[default]
    Put,
    Patch,
}

impl UpdateVerb {
    fn method(self) -> Method {
        match self {
            UpdateVerb::Put => Method::PUT,
            UpdateVerb::Patch => Method::PATCH,
        }
    }
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    pub session: SessionStore,
    pub workspace: WorkspaceContext,
    update_verb: UpdateVerb,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session: SessionStore::in_memory(),
            workspace: WorkspaceContext::new(),
            update_verb: UpdateVerb::default(),
        }
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn with_update_verb(mut self, verb: UpdateVerb) -> Self {
        self.update_verb = verb;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared request core.
    ///
    /// Injects `Authorization: Bearer` when a session exists and
    /// `X-Workspace-Id` on every call (explicit argument wins over the
    /// current workspace context). JSON bodies get their content type from
    /// reqwest; multipart goes through [`Self::upload_document`] so the
    /// boundary is set by the library.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        workspace_id: Option<i64>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, &url);

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        let ws = workspace_id.unwrap_or_else(|| self.workspace.current().id);
        builder = builder.header("X-Workspace-Id", ws);

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        self.translate(path, response).await
    }

    /// Uniform status-code policy: 401 clears the session, 404 and 5xx get
    /// dedicated variants, any other non-2xx surfaces the message the server
    /// put in the body.
    async fn translate(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value, ClientError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            let message = Self::error_message(response, status).await;
            return Err(ClientError::Authentication(message));
        }
        if status == StatusCode::NOT_FOUND {
            let message = Self::error_message(response, status).await;
            return Err(ClientError::NotFound(format!("{}: {}", path, message)));
        }
        if status.is_server_error() {
            let message = Self::error_message(response, status).await;
            return Err(ClientError::Server {
                path: path.to_string(),
                message: format!("{} (the endpoint may not be implemented yet)", message),
            });
        }
        if !status.is_success() {
            let message = Self::error_message(response, status).await;
            return Err(ClientError::Validation(message));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let raw = response.text().await?;
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&raw)
            .map_err(|e| ClientError::Validation(format!("invalid JSON response: {}", e)))
    }

    /// Best-effort extraction of a human-readable message: the JSON `error`
    /// field, then `message`, then the raw body, then the bare status.
    async fn error_message(response: reqwest::Response, status: StatusCode) -> String {
        let raw = response.text().await.unwrap_or_default();
        if let Ok(body) = serde_json::from_str::<Value>(&raw) {
            for key in ["error", "message"] {
                if let Some(msg) = body.get(key).and_then(Value::as_str) {
                    return msg.to_string();
                }
            }
        }
        if !raw.trim().is_empty() {
            return raw.trim().to_string();
        }
        format!("HTTP {}", status.as_u16())
    }

    /// POST /auth/login; stores the token and user profile on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self.request(Method::POST, "/auth/login", Some(&body), None).await?;

        let token = value
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Validation("login response missing token".into()))?
            .to_string();
        let user = value.get("user").cloned().unwrap_or(Value::Null);

        let session = Session { token, user };
        self.session.set(session.clone());
        Ok(session)
    }

    /// POST /auth/logout, then clear the stored session regardless of the
    /// server's answer.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.request(Method::POST, "/auth/logout", None, None).await;
        self.session.clear();
        result.map(|_| ())
    }

    pub async fn profile(&self) -> Result<Value, ClientError> {
        self.request(Method::GET, "/auth/profile", None, None).await
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        self.request(Method::GET, "/health", None, None).await
    }

    /// Fetch the workspace record for its display name, make it current,
    /// and fire the change event.
    pub async fn switch_workspace(&self, id: i64) -> Result<WorkspaceRef, ClientError> {
        let workspace = self.get_workspace(id, None).await?;
        let reference = WorkspaceRef {
            id: workspace.id,
            name: workspace.name.clone(),
        };
        self.workspace.set_current(reference.clone());
        Ok(reference)
    }

    /// Multipart upload; reqwest sets the boundary, no explicit content type.
    pub async fn upload_document(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        workspace_id: Option<i64>,
    ) -> Result<Document, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Validation(format!("invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/api/v2/documents/upload", self.base_url);
        let mut builder = self.http.post(&url).multipart(form);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        let ws = workspace_id.unwrap_or_else(|| self.workspace.current().id);
        builder = builder.header("X-Workspace-Id", ws);

        let response = builder.send().await?;
        let value = self.translate("/api/v2/documents/upload", response).await?;
        decode(value)
    }

    /// Binary download; the filename comes from Content-Disposition.
    pub async fn download_document(&self, id: i64) -> Result<(String, Vec<u8>), ClientError> {
        let path = format!("/api/v2/documents/{}/download", id);
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.get(&url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            // Reuse the JSON error policy for failed downloads
            return match self.translate(&path, response).await {
                Err(e) => Err(e),
                Ok(_) => Err(ClientError::Validation(format!("HTTP {}", status.as_u16()))),
            };
        }

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_disposition_filename)
            .unwrap_or_else(|| format!("document-{}", id));
        let bytes = response.bytes().await?.to_vec();
        Ok((file_name, bytes))
    }

    // Raw helpers keyed by plural path segment; the CLI's data commands use
    // these for arbitrary entity names.
    pub async fn list_raw(&self, plural: &str, workspace_id: Option<i64>) -> Result<Value, ClientError> {
        self.request(Method::GET, &format!("/api/v2/{}", plural), None, workspace_id)
            .await
    }

    pub async fn get_raw(&self, plural: &str, id: i64) -> Result<Value, ClientError> {
        self.request(Method::GET, &format!("/api/v2/{}/{}", plural, id), None, None)
            .await
    }

    pub async fn create_raw(
        &self,
        plural: &str,
        data: &Value,
        workspace_id: Option<i64>,
    ) -> Result<Value, ClientError> {
        self.request(Method::POST, &format!("/api/v2/{}", plural), Some(data), workspace_id)
            .await
    }

    pub async fn update_raw(&self, plural: &str, id: i64, data: &Value) -> Result<Value, ClientError> {
        self.request(
            self.update_verb.method(),
            &format!("/api/v2/{}/{}", plural, id),
            Some(data),
            None,
        )
        .await
    }

    pub async fn delete_raw(&self, plural: &str, id: i64) -> Result<Value, ClientError> {
        self.request(Method::DELETE, &format!("/api/v2/{}/{}", plural, id), None, None)
            .await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::Validation(format!("unexpected response shape: {}", e)))
}

fn parse_disposition_filename(header: &str) -> Option<String> {
    let marker = "filename=";
    let idx = header.find(marker)?;
    let raw = header[idx + marker.len()..].trim();
    Some(raw.trim_matches('"').to_string())
}

macro_rules! resource {
    ($ty:ty, $path:literal, $list:ident, $get:ident, $create:ident, $update:ident, $delete:ident) => {
        impl ApiClient {
            pub async fn $list(&self, workspace_id: Option<i64>) -> Result<Vec<$ty>, ClientError> {
                decode(self.request(Method::GET, $path, None, workspace_id).await?)
            }

            pub async fn $get(&self, id: i64, workspace_id: Option<i64>) -> Result<$ty, ClientError> {
                decode(
                    self.request(Method::GET, &format!("{}/{}", $path, id), None, workspace_id)
                        .await?,
                )
            }

            pub async fn $create(
                &self,
                data: &Value,
                workspace_id: Option<i64>,
            ) -> Result<$ty, ClientError> {
                decode(self.request(Method::POST, $path, Some(data), workspace_id).await?)
            }

            pub async fn $update(
                &self,
                id: i64,
                data: &Value,
                workspace_id: Option<i64>,
            ) -> Result<$ty, ClientError> {
                decode(
                    self.request(
                        self.update_verb.method(),
                        &format!("{}/{}", $path, id),
                        Some(data),
                        workspace_id,
                    )
                    .await?,
                )
            }

            pub async fn $delete(&self, id: i64, workspace_id: Option<i64>) -> Result<(), ClientError> {
                self.request(Method::DELETE, &format!("{}/{}", $path, id), None, workspace_id)
                    .await
                    .map(|_| ())
            }
        }
    };
}

resource!(User, "/api/v2/users", get_users, get_user, create_user, update_user, delete_user);
resource!(Group, "/api/v2/groups", get_groups, get_group, create_group, update_group, delete_group);
resource!(Role, "/api/v2/roles", get_roles, get_role, create_role, update_role, delete_role);
resource!(
    Department,
    "/api/v2/departments",
    get_departments,
    get_department,
    create_department,
    update_department,
    delete_department
);
resource!(
    Permission,
    "/api/v2/permissions",
    get_permissions,
    get_permission,
    create_permission,
    update_permission,
    delete_permission
);
resource!(
    Contact,
    "/api/v2/contacts",
    get_contacts,
    get_contact,
    create_contact,
    update_contact,
    delete_contact
);
resource!(
    Customer,
    "/api/v2/customers",
    get_customers,
    get_customer,
    create_customer,
    update_customer,
    delete_customer
);
resource!(
    Enquiry,
    "/api/v2/enquiries",
    get_enquiries,
    get_enquiry,
    create_enquiry,
    update_enquiry,
    delete_enquiry
);
resource!(
    Project,
    "/api/v2/projects",
    get_projects,
    get_project,
    create_project,
    update_project,
    delete_project
);
resource!(Job, "/api/v2/jobs", get_jobs, get_job, create_job, update_job, delete_job);
resource!(Task, "/api/v2/tasks", get_tasks, get_task, create_task, update_task, delete_task);
resource!(
    Timesheet,
    "/api/v2/timesheets",
    get_timesheets,
    get_timesheet,
    create_timesheet,
    update_timesheet,
    delete_timesheet
);
resource!(
    Document,
    "/api/v2/documents",
    get_documents,
    get_document,
    create_document,
    update_document,
    delete_document
);
resource!(
    Workspace,
    "/api/v2/workspaces",
    get_workspaces,
    get_workspace,
    create_workspace,
    update_workspace,
    delete_workspace
);
