use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

/// Row counts for the boot-time seed generator, per entity family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub rng_seed: u64,
    pub workspaces: usize,
    pub users: usize,
    pub groups: usize,
    pub roles: usize,
    pub departments: usize,
    pub permissions: usize,
    pub contacts: usize,
    pub customers: usize,
    pub enquiries: usize,
    pub projects: usize,
    pub jobs: usize,
    pub tasks: usize,
    pub timesheets: usize,
    pub documents: usize,
}

// Shipping a default secret is a deployment hazard; anything real must set
// JWT_SECRET explicitly.
const DEV_JWT_SECRET: &str = "opsdesk-dev-secret-change-me";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging =
                v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            if !v.trim().is_empty() {
                self.security.jwt_secret = v;
            }
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        // Seed overrides
        if let Ok(v) = env::var("SEED_RNG_SEED") {
            self.seed.rng_seed = v.parse().unwrap_or(self.seed.rng_seed);
        }
        if let Ok(v) = env::var("SEED_SCALE_PERCENT") {
            // One knob for test runs: shrink every entity count proportionally.
            if let Ok(pct) = v.parse::<usize>() {
                self.seed = self.seed.scaled(pct);
            }
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 4010,
                enable_cors: true,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7,
            },
            seed: SeedConfig::default_counts(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 4010,
                enable_cors: true,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24,
            },
            seed: SeedConfig::default_counts(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 4010,
                enable_cors: true,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 4,
            },
            seed: SeedConfig::default_counts(),
        }
    }
}

impl SeedConfig {
    fn default_counts() -> Self {
        Self {
            rng_seed: 0x0d5d_e5ec,
            workspaces: 10,
            users: 1000,
            groups: 300,
            roles: 120,
            departments: 200,
            permissions: 400,
            contacts: 1500,
            customers: 800,
            enquiries: 1200,
            projects: 600,
            jobs: 1000,
            tasks: 2000,
            timesheets: 3000,
            documents: 500,
        }
    }

    fn scaled(&self, percent: usize) -> Self {
        let scale = |n: usize| (n * percent / 100).max(1);
        Self {
            rng_seed: self.rng_seed,
            workspaces: self.workspaces,
            users: scale(self.users),
            groups: scale(self.groups),
            roles: scale(self.roles),
            departments: scale(self.departments),
            permissions: scale(self.permissions),
            contacts: scale(self.contacts),
            customers: scale(self.customers),
            enquiries: scale(self.enquiries),
            projects: scale(self.projects),
            jobs: scale(self.jobs),
            tasks: scale(self.tasks),
            timesheets: scale(self.timesheets),
            documents: scale(self.documents),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 4010);
        assert_eq!(config.security.jwt_expiry_hours, 24 * 7);
        assert_eq!(config.seed.workspaces, 10);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.server.enable_request_logging);
        assert_eq!(config.security.jwt_expiry_hours, 4);
    }

    #[test]
    fn test_seed_scaling() {
        let seed = SeedConfig::default_counts().scaled(10);
        assert_eq!(seed.users, 100);
        assert_eq!(seed.tasks, 200);
        // The workspace pool is fixed; ids 1..=10 are part of the contract
        assert_eq!(seed.workspaces, 10);
    }
}
