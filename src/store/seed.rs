use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::auth::hash_password;
use crate::config::SeedConfig;
use crate::store::models::{
    Contact, Customer, Department, Document, Enquiry, Group, Job, Permission, Project, Role, Task,
    Timesheet, User, Workspace,
};
use crate::store::Stores;

/// Shared password for every generated (non-admin) user. Argon2 is too slow
/// to hash thousands of distinct rows at boot, so the hash is computed once.
pub const DEMO_PASSWORD: &str = "Password@123";

pub const ADMIN_EMAIL: &str = "administrative@admin.com";
pub const ADMIN_PASSWORD: &str = "Admin@123";

const FIRST_NAMES: &[&str] = &[
    "Ava", "Ben", "Chloe", "Dan", "Elena", "Femi", "Grace", "Hugo", "Ines", "Jonas", "Kara",
    "Liam", "Mara", "Noah", "Olive", "Priya", "Quinn", "Rosa", "Sam", "Tariq", "Uma", "Viktor",
    "Wren", "Yusuf", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Adler", "Brooks", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ivanov",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Okafor", "Petrov", "Quintero", "Rossi",
    "Schmidt", "Tanaka", "Ueda", "Vargas", "Weber", "Yilmaz", "Zhang",
];

const COMPANY_WORDS: &[&str] = &[
    "Acme", "Borealis", "Cedar", "Delta", "Ember", "Forge", "Granite", "Harbor", "Ionic",
    "Juniper", "Keystone", "Lumen", "Meridian", "Nimbus", "Orbit", "Pinnacle", "Quartz", "Ridge",
    "Summit", "Vertex",
];

const COMPANY_SUFFIXES: &[&str] = &["Ltd", "GmbH", "Inc", "Partners", "Labs", "Group"];

const PROJECT_WORDS: &[&str] = &[
    "Migration", "Rollout", "Redesign", "Audit", "Integration", "Upgrade", "Onboarding",
    "Expansion", "Cleanup", "Pilot",
];

const TASK_VERBS: &[&str] = &[
    "Review", "Draft", "Deploy", "Test", "Document", "Estimate", "Refactor", "Schedule",
    "Approve", "Archive",
];

const TASK_OBJECTS: &[&str] = &[
    "invoice batch", "customer import", "API contract", "quarterly report", "staging rollout",
    "permission matrix", "backlog triage", "billing export", "data backfill", "release notes",
];

const STATUSES: &[&str] = &["active", "inactive", "pending", "suspended"];
const ENQUIRY_STATUSES: &[&str] = &["open", "closed"];
const TASK_STATUSES: &[&str] = &["todo", "in_progress", "review", "done"];
const JOB_STATUSES: &[&str] = &["pending", "in_progress", "completed", "on_hold"];
const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
const RESOURCES: &[&str] = &[
    "users", "groups", "roles", "projects", "tasks", "documents", "timesheets", "customers",
];
const ACTIONS: &[&str] = &["read", "create", "update", "delete"];
const DOC_EXTENSIONS: &[&str] = &["pdf", "docx", "xlsx", "png", "csv"];

/// One-shot randomized seeding. The RNG is seeded from config, so a given
/// configuration always produces the same dataset.
pub fn seed(stores: &Stores, cfg: &SeedConfig) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(cfg.rng_seed);
    let started = std::time::Instant::now();

    // The admin goes in first so it holds user id 1. Ids are assigned once at
    // insert and never renumbered.
    let admin_hash = hash_password(ADMIN_PASSWORD)?;
    stores.users.insert(User {
        id: 0,
        workspace_id: 1,
        name: "Administrative User".to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: "admin".to_string(),
        password_hash: admin_hash,
        status: "active".to_string(),
        created_at: Utc::now() - Duration::days(365),
    });

    // Workspace pool: ids 1..=cfg.workspaces, with workspace 1 as the default
    // every unscoped request falls back to.
    stores.workspaces.insert(Workspace {
        id: 0,
        name: "Default Workspace".to_string(),
        description: Some("Primary workspace".to_string()),
        status: "active".to_string(),
        created_at: random_created_at(&mut rng),
    });
    for n in 2..=cfg.workspaces {
        stores.workspaces.insert(Workspace {
            id: 0,
            name: format!("Workspace {}", n),
            description: None,
            status: "active".to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    let pool = cfg.workspaces as i64;
    let demo_hash = hash_password(DEMO_PASSWORD)?;

    for _ in 0..cfg.users {
        let first = pick(&mut rng, FIRST_NAMES);
        let last = pick(&mut rng, LAST_NAMES);
        let n: u32 = rng.gen_range(1..10_000);
        stores.users.insert(User {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("{} {}", first, last),
            email: format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), n),
            role: pick(&mut rng, &["member", "manager", "viewer"]).to_string(),
            password_hash: demo_hash.clone(),
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for i in 0..cfg.groups {
        stores.groups.insert(Group {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("{} Team {}", pick(&mut rng, COMPANY_WORDS), i + 1),
            description: maybe(&mut rng, || "Cross-functional group".to_string()),
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for i in 0..cfg.roles {
        stores.roles.insert(Role {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("Role {}", i + 1),
            description: maybe(&mut rng, || "Seeded role".to_string()),
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    let user_count = stores.users.len() as i64;
    for i in 0..cfg.departments {
        let manager_id = if rng.gen_bool(0.7) {
            Some(rng.gen_range(1..=user_count))
        } else {
            None
        };
        stores.departments.insert(Department {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("{} Department {}", pick(&mut rng, COMPANY_WORDS), i + 1),
            description: None,
            manager_id,
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for _ in 0..cfg.permissions {
        let resource = pick(&mut rng, RESOURCES);
        let action = pick(&mut rng, ACTIONS);
        stores.permissions.insert(Permission {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("{}:{}", resource, action),
            resource: resource.to_string(),
            action: action.to_string(),
            description: None,
            status: "active".to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for _ in 0..cfg.contacts {
        let first = pick(&mut rng, FIRST_NAMES);
        let last = pick(&mut rng, LAST_NAMES);
        let n: u32 = rng.gen_range(1..10_000);
        let phone = random_phone(&mut rng);
        let company = if rng.gen_bool(0.5) {
            Some(company_name(&mut rng))
        } else {
            None
        };
        stores.contacts.insert(Contact {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}{}@contact.example.com", first.to_lowercase(), last.to_lowercase(), n),
            phone,
            company,
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for i in 0..cfg.customers {
        let company = company_name(&mut rng);
        let phone = random_phone(&mut rng);
        let address = if rng.gen_bool(0.5) {
            Some(format!("{} Main Street", rng.gen_range(1..999)))
        } else {
            None
        };
        stores.customers.insert(Customer {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: company.clone(),
            email: format!("billing{}@{}.example.com", i + 1, company.split(' ').next().unwrap_or("acme").to_lowercase()),
            phone,
            company: Some(company),
            address,
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    let customer_count = stores.customers.len() as i64;
    for _ in 0..cfg.enquiries {
        stores.enquiries.insert(Enquiry {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            subject: format!("{} {}", pick(&mut rng, TASK_VERBS), pick(&mut rng, TASK_OBJECTS)),
            message: "Seeded enquiry body".to_string(),
            customer_id: if customer_count > 0 {
                Some(rng.gen_range(1..=customer_count))
            } else {
                None
            },
            priority: pick(&mut rng, PRIORITIES).to_string(),
            status: pick(&mut rng, ENQUIRY_STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for i in 0..cfg.projects {
        let start = random_date(&mut rng);
        let end_date = if rng.gen_bool(0.5) {
            Some(start + Duration::days(rng.gen_range(30..365)))
        } else {
            None
        };
        stores.projects.insert(Project {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("{} {} {}", pick(&mut rng, COMPANY_WORDS), pick(&mut rng, PROJECT_WORDS), i + 1),
            description: maybe(&mut rng, || "Seeded project".to_string()),
            customer_id: if customer_count > 0 {
                Some(rng.gen_range(1..=customer_count))
            } else {
                None
            },
            start_date: start,
            end_date,
            status: pick(&mut rng, STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    let project_count = stores.projects.len() as i64;
    for _ in 0..cfg.jobs {
        stores.jobs.insert(Job {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            title: format!("{} {}", pick(&mut rng, TASK_VERBS), pick(&mut rng, TASK_OBJECTS)),
            description: None,
            project_id: some_id(&mut rng, project_count),
            assigned_to: some_id(&mut rng, user_count),
            priority: pick(&mut rng, PRIORITIES).to_string(),
            status: pick(&mut rng, JOB_STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for _ in 0..cfg.tasks {
        let due_date = if rng.gen_bool(0.5) {
            Some(random_date(&mut rng) + Duration::days(rng.gen_range(7..90)))
        } else {
            None
        };
        stores.tasks.insert(Task {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            title: format!("{} {}", pick(&mut rng, TASK_VERBS), pick(&mut rng, TASK_OBJECTS)),
            description: maybe(&mut rng, || "Seeded task".to_string()),
            project_id: some_id(&mut rng, project_count),
            assigned_to: some_id(&mut rng, user_count),
            priority: pick(&mut rng, PRIORITIES).to_string(),
            due_date,
            status: pick(&mut rng, TASK_STATUSES).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    let task_count = stores.tasks.len() as i64;
    for _ in 0..cfg.timesheets {
        stores.timesheets.insert(Timesheet {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            user_id: rng.gen_range(1..=user_count),
            project_id: some_id(&mut rng, project_count),
            task_id: some_id(&mut rng, task_count),
            work_date: random_date(&mut rng),
            hours: f64::from(rng.gen_range(1..16)) * 0.5,
            notes: maybe(&mut rng, || "Seeded timesheet entry".to_string()),
            status: pick(&mut rng, &["pending", "submitted", "approved"]).to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    for i in 0..cfg.documents {
        let ext = pick(&mut rng, DOC_EXTENSIONS);
        stores.documents.insert(Document {
            id: 0,
            workspace_id: rng.gen_range(1..=pool),
            name: format!("Document {}", i + 1),
            file_name: format!("document-{}.{}", i + 1, ext),
            content_type: "application/octet-stream".to_string(),
            size: rng.gen_range(1_024..2_000_000),
            project_id: some_id(&mut rng, project_count),
            uploaded_by: some_id(&mut rng, user_count),
            status: "active".to_string(),
            created_at: random_created_at(&mut rng),
        });
    }

    seed_client_a(stores, &mut rng, &demo_hash);

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        users = stores.users.len(),
        tasks = stores.tasks.len(),
        workspaces = stores.workspaces.len(),
        "seed data generated"
    );

    Ok(())
}

/// Hand-authored rows for a dedicated demo tenant, appended after the random
/// pool so its workspace id sits just past it.
fn seed_client_a(stores: &Stores, rng: &mut StdRng, demo_hash: &str) {
    let ws = stores.workspaces.insert(Workspace {
        id: 0,
        name: "Client A".to_string(),
        description: Some("Hand-authored demo tenant".to_string()),
        status: "active".to_string(),
        created_at: Utc::now() - Duration::days(30),
    });

    let lead = stores.users.insert(User {
        id: 0,
        workspace_id: ws.id,
        name: "Casey Warden".to_string(),
        email: "casey.warden@client-a.example.com".to_string(),
        role: "manager".to_string(),
        password_hash: demo_hash.to_string(),
        status: "active".to_string(),
        created_at: Utc::now() - Duration::days(29),
    });

    let customer = stores.customers.insert(Customer {
        id: 0,
        workspace_id: ws.id,
        name: "Client A Holdings".to_string(),
        email: "accounts@client-a.example.com".to_string(),
        phone: Some("+1-555-0100".to_string()),
        company: Some("Client A Holdings".to_string()),
        address: Some("1 Harbor Plaza".to_string()),
        status: "active".to_string(),
        created_at: Utc::now() - Duration::days(28),
    });

    let project = stores.projects.insert(Project {
        id: 0,
        workspace_id: ws.id,
        name: "Client A Onboarding".to_string(),
        description: Some("Initial rollout for Client A".to_string()),
        customer_id: Some(customer.id),
        start_date: (Utc::now() - Duration::days(21)).date_naive(),
        end_date: None,
        status: "active".to_string(),
        created_at: Utc::now() - Duration::days(21),
    });

    for (title, status) in [
        ("Collect branding assets", "done"),
        ("Configure workspace roles", "in_progress"),
        ("Schedule kickoff review", "todo"),
    ] {
        stores.tasks.insert(Task {
            id: 0,
            workspace_id: ws.id,
            title: title.to_string(),
            description: None,
            project_id: Some(project.id),
            assigned_to: Some(lead.id),
            priority: pick(rng, PRIORITIES).to_string(),
            due_date: None,
            status: status.to_string(),
            created_at: Utc::now() - Duration::days(rng.gen_range(1..20)),
        });
    }
}

fn pick<'a>(rng: &mut StdRng, options: &'a [&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or(options[0])
}

/// Roughly half the time, produce a value.
fn maybe<T>(rng: &mut StdRng, f: impl FnOnce() -> T) -> Option<T> {
    if rng.gen_bool(0.5) {
        Some(f())
    } else {
        None
    }
}

fn some_id(rng: &mut StdRng, count: i64) -> Option<i64> {
    if count > 0 && rng.gen_bool(0.8) {
        Some(rng.gen_range(1..=count))
    } else {
        None
    }
}

fn random_phone(rng: &mut StdRng) -> Option<String> {
    if rng.gen_bool(0.5) {
        Some(format!("+1-555-{:04}", rng.gen_range(0..10_000)))
    } else {
        None
    }
}

fn company_name(rng: &mut StdRng) -> String {
    format!(
        "{} {}",
        pick(rng, COMPANY_WORDS),
        pick(rng, COMPANY_SUFFIXES)
    )
}

/// Uniform timestamp within the trailing year.
fn random_created_at(rng: &mut StdRng) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(rng.gen_range(0..525_600))
}

fn random_date(rng: &mut StdRng) -> NaiveDate {
    (Utc::now() - Duration::days(rng.gen_range(0..365))).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::store::repository::Entity;

    fn small_config() -> SeedConfig {
        serde_json::from_value(serde_json::json!({
            "rng_seed": 42,
            "workspaces": 10,
            "users": 25, "groups": 10, "roles": 5, "departments": 5,
            "permissions": 10, "contacts": 10, "customers": 10, "enquiries": 10,
            "projects": 10, "jobs": 10, "tasks": 30, "timesheets": 10, "documents": 5
        }))
        .expect("config")
    }

    #[test]
    fn test_admin_is_first_user() {
        let stores = Stores::empty();
        seed(&stores, &small_config()).expect("seed");
        let admin = stores.users.get(1).expect("admin");
        assert_eq!(admin.email, ADMIN_EMAIL);
        assert_eq!(admin.role, "admin");
        assert_eq!(admin.workspace_id, 1);
        assert!(verify_password(ADMIN_PASSWORD, &admin.password_hash));
    }

    #[test]
    fn test_workspace_pool_and_client_a() {
        let stores = Stores::empty();
        seed(&stores, &small_config()).expect("seed");
        // 10-workspace pool plus the hand-authored Client A tenant
        assert_eq!(stores.workspaces.len(), 11);
        assert_eq!(stores.workspaces.get(1).expect("ws 1").name, "Default Workspace");
        let client_a = stores.workspaces.get(11).expect("ws 11");
        assert_eq!(client_a.name, "Client A");
        // Client A got hand-authored rows
        assert!(!stores.tasks.list_scoped(11).is_empty());
        assert!(!stores.users.list_scoped(11).is_empty());
    }

    #[test]
    fn test_generated_rows_stay_in_pool() {
        let stores = Stores::empty();
        seed(&stores, &small_config()).expect("seed");
        for task in stores.tasks.all() {
            assert!((1..=11).contains(&task.workspace_id));
        }
        for user in stores.users.all() {
            assert!((1..=11).contains(&user.workspace_id));
        }
    }

    #[test]
    fn test_counts_match_config() {
        let stores = Stores::empty();
        let cfg = small_config();
        seed(&stores, &cfg).expect("seed");
        // admin + generated + Client A lead
        assert_eq!(stores.users.len(), cfg.users + 2);
        assert_eq!(stores.groups.len(), cfg.groups);
        // generated + 3 hand-authored Client A cards
        assert_eq!(stores.tasks.len(), cfg.tasks + 3);
    }

    #[test]
    fn test_task_statuses_are_board_columns() {
        let stores = Stores::empty();
        seed(&stores, &small_config()).expect("seed");
        assert_eq!(Task::PLURAL, "tasks");
        for task in stores.tasks.all() {
            assert!(TASK_STATUSES.contains(&task.status.as_str()));
        }
    }
}
