mod common;

use anyhow::Result;

use opsdesk_api::client::{ApiClient, Board};

#[tokio::test]
async fn moving_a_card_updates_exactly_one_task() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = ApiClient::new(server.base_url.clone());
    client.login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await?;
    client.switch_workspace(11).await?;

    let tasks = client.get_tasks(None).await?;
    assert_eq!(tasks.len(), 3);

    let moving = tasks
        .iter()
        .find(|t| t.status == "todo")
        .expect("seeded backlog card")
        .clone();
    let others: Vec<(i64, String)> = tasks
        .iter()
        .filter(|t| t.id != moving.id)
        .map(|t| (t.id, t.status.clone()))
        .collect();

    let mut board = Board::kanban();
    board.set_tasks(tasks);

    let updated = board.move_card(&client, moving.id, "review").await?;
    assert_eq!(updated.id, moving.id);
    assert_eq!(updated.status, "review");
    assert_eq!(updated.title, moving.title, "a move touches status only");

    // The local board mirrors the move
    let grouped = board.grouped();
    let review = grouped
        .iter()
        .find(|(column, _)| column == "review")
        .expect("review column");
    assert!(review.1.iter().any(|t| t.id == moving.id));

    // And the server agrees: one card moved, every other card stayed put
    let refetched = client.get_tasks(None).await?;
    for (id, status) in &others {
        let task = refetched.iter().find(|t| t.id == *id).expect("card still exists");
        assert_eq!(&task.status, status, "card {} moved unexpectedly", id);
    }
    assert_eq!(
        refetched.iter().find(|t| t.id == moving.id).map(|t| t.status.as_str()),
        Some("review")
    );

    // Put the card back so other assertions on the seeded board hold
    board.move_card(&client, moving.id, "todo").await?;

    Ok(())
}

#[tokio::test]
async fn cards_outside_the_columns_are_not_rendered() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = ApiClient::new(server.base_url.clone());
    client.login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD).await?;

    let created = client
        .create_task(
            &serde_json::json!({ "title": "Archive old records", "status": "cancelled" }),
            None,
        )
        .await?;

    let mut board = Board::kanban();
    board.set_tasks(client.get_tasks(None).await?);

    let grouped = board.grouped();
    for (_, cards) in &grouped {
        assert!(cards.iter().all(|t| t.id != created.id), "cancelled card rendered");
    }

    client.delete_task(created.id, None).await?;
    Ok(())
}
