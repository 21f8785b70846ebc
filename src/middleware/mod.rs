pub mod auth;
pub mod workspace;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use workspace::WorkspaceScope;
