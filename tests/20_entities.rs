mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn authed() -> Result<(&'static common::TestServer, reqwest::Client, String)> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    Ok((server, reqwest::Client::new(), token))
}

#[tokio::test]
async fn listing_defaults_to_workspace_one() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .get(format!("{}/api/v2/users", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let rows = res.json::<Vec<Value>>().await?;
    assert!(!rows.is_empty(), "seeded workspace 1 should have users");
    for row in &rows {
        assert_eq!(row.get("workspace_id").and_then(Value::as_i64), Some(1), "row: {}", row);
    }

    // The seeded admin lives in workspace 1 and shows up in the listing
    let admin = rows
        .iter()
        .find(|r| r.get("email").and_then(Value::as_str) == Some(common::ADMIN_EMAIL))
        .expect("admin missing from workspace 1");
    assert_eq!(admin.get("id").and_then(Value::as_i64), Some(1));
    assert_eq!(admin.get("role").and_then(Value::as_str), Some("admin"));

    Ok(())
}

#[tokio::test]
async fn create_assigns_id_and_created_at() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .post(format!("{}/api/v2/contacts", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "first_name": "Dana",
            "last_name": "Albright",
            "email": "dana.albright@example.com",
            // the server must ignore client-supplied values for these
            "id": 999_999,
            "createdAt": "1999-01-01T00:00:00Z",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let created = res.json::<Value>().await?;
    let id = created.get("id").and_then(Value::as_i64).expect("created row has id");
    assert_ne!(id, 999_999);
    assert_ne!(
        created.get("createdAt").and_then(Value::as_str),
        Some("1999-01-01T00:00:00Z")
    );
    assert_eq!(created.get("workspace_id").and_then(Value::as_i64), Some(1));

    // Round-trip by id
    let res = client
        .get(format!("{}/api/v2/contacts/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched.get("first_name").and_then(Value::as_str), Some("Dana"));
    assert_eq!(fetched.get("status").and_then(Value::as_str), Some("active"));

    Ok(())
}

#[tokio::test]
async fn rows_stay_inside_their_workspace() -> Result<()> {
    let (server, client, token) = authed().await?;

    // Create a group in workspace 2 via the scope header
    let res = client
        .post(format!("{}/api/v2/groups", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "2")
        .json(&json!({ "name": "QA Team", "description": "Quality assurance" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created.get("id").and_then(Value::as_i64).expect("id");
    assert_eq!(created.get("workspace_id").and_then(Value::as_i64), Some(2));

    // Visible when listing workspace 2
    let res = client
        .get(format!("{}/api/v2/groups", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "2")
        .send()
        .await?;
    let rows = res.json::<Vec<Value>>().await?;
    assert!(
        rows.iter().any(|r| r.get("id").and_then(Value::as_i64) == Some(id)),
        "new group missing from workspace 2 listing"
    );

    // Invisible when listing workspace 1
    let res = client
        .get(format!("{}/api/v2/groups", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    let rows = res.json::<Vec<Value>>().await?;
    assert!(
        rows.iter().all(|r| r.get("id").and_then(Value::as_i64) != Some(id)),
        "workspace 2 group leaked into workspace 1"
    );

    Ok(())
}

#[tokio::test]
async fn header_beats_query_for_workspace_scope() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .get(format!("{}/api/v2/tasks?workspace_id=1", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "11")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let rows = res.json::<Vec<Value>>().await?;
    for row in &rows {
        assert_eq!(row.get("workspace_id").and_then(Value::as_i64), Some(11), "row: {}", row);
    }

    Ok(())
}

#[tokio::test]
async fn malformed_workspace_header_is_a_bad_request() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .get(format!("{}/api/v2/tasks", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "not-a-number")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn put_and_patch_both_merge() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .post(format!("{}/api/v2/projects", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Warehouse Refit",
            "start_date": "2026-03-01",
            "status": "active",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created.get("id").and_then(Value::as_i64).expect("id");
    let created_at = created.get("createdAt").cloned();

    // PATCH one field, everything else is untouched
    let res = client
        .patch(format!("{}/api/v2/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "status": "on_hold" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let patched = res.json::<Value>().await?;
    assert_eq!(patched.get("name").and_then(Value::as_str), Some("Warehouse Refit"));
    assert_eq!(patched.get("status").and_then(Value::as_str), Some("on_hold"));

    // PUT with a partial body behaves the same way
    let res = client
        .put(format!("{}/api/v2/projects/{}", server.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Warehouse Refit II", "id": 12345 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let replaced = res.json::<Value>().await?;
    assert_eq!(replaced.get("id").and_then(Value::as_i64), Some(id), "id must be immutable");
    assert_eq!(replaced.get("name").and_then(Value::as_str), Some("Warehouse Refit II"));
    assert_eq!(replaced.get("status").and_then(Value::as_str), Some("on_hold"));
    assert_eq!(replaced.get("createdAt").cloned(), created_at, "createdAt must be immutable");

    Ok(())
}

#[tokio::test]
async fn second_delete_is_not_found() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .post(format!("{}/api/v2/enquiries", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "subject": "Pricing question",
            "message": "What does the enterprise tier cost?",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?.get("id").and_then(Value::as_i64).expect("id");

    let res = client
        .delete(format!("{}/api/v2/enquiries/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/api/v2/enquiries/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Ids are never reused after a delete
    let res = client
        .post(format!("{}/api/v2/enquiries", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "subject": "Follow-up", "message": "Checking in again." }))
        .send()
        .await?;
    let next = res.json::<Value>().await?.get("id").and_then(Value::as_i64).expect("id");
    assert!(next > id, "expected fresh id after delete, got {} <= {}", next, id);

    Ok(())
}

#[tokio::test]
async fn workspaces_list_is_unscoped() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .get(format!("{}/api/v2/workspaces", server.base_url))
        .bearer_auth(&token)
        // a scope header must not filter the workspace collection itself
        .header("X-Workspace-Id", "3")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let rows = res.json::<Vec<Value>>().await?;
    assert!(rows.len() >= 11, "expected pool plus Client A, got {}", rows.len());

    let name_of = |id: i64| {
        rows.iter()
            .find(|r| r.get("id").and_then(Value::as_i64) == Some(id))
            .and_then(|r| r.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    assert_eq!(name_of(1).as_deref(), Some("Default Workspace"));
    assert_eq!(name_of(11).as_deref(), Some("Client A"));

    Ok(())
}

#[tokio::test]
async fn client_a_workspace_is_fully_wired() -> Result<()> {
    let (server, client, token) = authed().await?;

    let tasks = client
        .get(format!("{}/api/v2/tasks", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "11")
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(tasks.len(), 3, "Client A carries exactly three tasks");

    let statuses: Vec<&str> = tasks
        .iter()
        .filter_map(|t| t.get("status").and_then(Value::as_str))
        .collect();
    for status in ["todo", "in_progress", "done"] {
        assert!(statuses.contains(&status), "missing status {}: {:?}", status, statuses);
    }

    let users = client
        .get(format!("{}/api/v2/users", server.base_url))
        .bearer_auth(&token)
        .header("X-Workspace-Id", "11")
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert!(
        users.iter().any(|u| u.get("name").and_then(Value::as_str) == Some("Casey Warden")),
        "Client A lead user missing"
    );

    Ok(())
}

#[tokio::test]
async fn invalid_payload_is_a_validation_error() -> Result<()> {
    let (server, client, token) = authed().await?;

    let res = client
        .post(format!("{}/api/v2/tasks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": 42 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("VALIDATION_ERROR"), "body: {}", body);

    Ok(())
}
