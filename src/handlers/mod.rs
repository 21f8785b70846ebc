pub mod auth;
pub mod diagnostics;
pub mod documents;
pub mod entities;
pub mod workspaces;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::middleware::jwt_auth_middleware;
use crate::store::models::{
    Contact, Customer, Department, Document, Enquiry, Group, Job, Permission, Project, Role, Task,
    Timesheet, User,
};
use crate::store::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .nest("/api/v2/users", entities::entity_routes::<User>())
        .nest("/api/v2/groups", entities::entity_routes::<Group>())
        .nest("/api/v2/roles", entities::entity_routes::<Role>())
        .nest("/api/v2/departments", entities::entity_routes::<Department>())
        .nest("/api/v2/permissions", entities::entity_routes::<Permission>())
        .nest("/api/v2/contacts", entities::entity_routes::<Contact>())
        .nest("/api/v2/customers", entities::entity_routes::<Customer>())
        .nest("/api/v2/enquiries", entities::entity_routes::<Enquiry>())
        .nest("/api/v2/projects", entities::entity_routes::<Project>())
        .nest("/api/v2/jobs", entities::entity_routes::<Job>())
        .nest("/api/v2/tasks", entities::entity_routes::<Task>())
        .nest("/api/v2/timesheets", entities::entity_routes::<Timesheet>())
        .nest("/api/v2/documents", documents::routes())
        .nest("/api/v2/workspaces", workspaces::routes())
        .route("/api/v2/data-viewer/all", get(diagnostics::data_viewer))
        .merge(auth::protected_routes())
        .layer(from_fn(jwt_auth_middleware));

    let mut router = Router::new()
        .route("/", get(diagnostics::root))
        .route("/health", get(diagnostics::health))
        .merge(auth::public_routes())
        .merge(api);

    if config().server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config().server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}
