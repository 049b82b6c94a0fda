//! End-to-end runs of console commands over reqwest against the mock server.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use clap::Parser;
use errand_admin::cli::{Cli, Command, ErrandsCommand, UsersCommand};
use errand_admin::console;
use errand_admin::transport::ReqwestTransport;
use errand_core::{
    ErrandPatch, ErrandStatus, ListStore, Phase, Role, ServiceError, Services, ValueStore,
};
use mock_server::Seed;
use tokio::net::TcpListener;

fn user(id: &str, name: &str, role: mock_server::Role, is_active: bool) -> mock_server::User {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    mock_server::User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "010-0000-0000".to_string(),
        role,
        is_active,
        created_at: at,
        updated_at: at,
    }
}

fn errand(id: &str, title: &str, status: mock_server::ErrandStatus, fee: u64, day: u32) -> mock_server::Errand {
    let at = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
    mock_server::Errand {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        client_id: "u1".to_string(),
        client_name: "Kim".to_string(),
        worker_id: None,
        worker_name: None,
        status,
        fee,
        location: "Mapo".to_string(),
        due_date: at,
        created_at: at,
        updated_at: at,
    }
}

fn seed() -> Seed {
    use mock_server::ErrandStatus::*;
    Seed {
        users: vec![
            user("u1", "Kim", mock_server::Role::Client, true),
            user("u2", "Lee", mock_server::Role::Worker, true),
            user("u3", "Park", mock_server::Role::Worker, false),
        ],
        errands: vec![
            errand("e1", "Buy groceries", Waiting, 5000, 1),
            errand("e2", "Pick up laundry", InProgress, 7000, 2),
            errand("e3", "Walk the dog", Completed, 12000, 3),
        ],
        user_growth: 12.5,
        errand_growth: 4.0,
        revenue_growth: -2.0,
    }
}

async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, seed()));
    format!("http://{addr}")
}

fn services(base_url: &str) -> Services<ReqwestTransport> {
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    Services::new(base_url, Arc::new(transport))
}

async fn run(services: &Services<ReqwestTransport>, command: Command) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = console::execute(command, services, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn users_list_filters_by_role_and_activity() {
    let services = services(&start_server().await);
    let (result, text) = run(
        &services,
        Command::Users(UsersCommand::List {
            search: String::new(),
            role: Some(Role::Fulfiller),
            status: Some(errand_core::Activity::Active),
        }),
    )
    .await;

    result.unwrap();
    assert!(text.contains("Lee"));
    assert!(!text.contains("Park"));
    assert!(!text.contains("Kim"));
    assert!(text.ends_with("1-1 of 3 results\n"));
}

#[tokio::test]
async fn errands_list_search_is_case_insensitive() {
    let services = services(&start_server().await);
    let (result, text) = run(
        &services,
        Command::Errands(ErrandsCommand::List {
            search: "LAUNDRY".to_string(),
            status: None,
        }),
    )
    .await;

    result.unwrap();
    assert!(text.contains("Pick up laundry"));
    assert!(text.contains("7,000"));
    assert!(!text.contains("Buy groceries"));
}

#[tokio::test]
async fn set_status_then_list_shows_new_status() {
    let services = services(&start_server().await);
    let (result, text) = run(
        &services,
        Command::Errands(ErrandsCommand::SetStatus {
            id: "e1".to_string(),
            status: ErrandStatus::Completed,
        }),
    )
    .await;
    result.unwrap();
    assert_eq!(text, "Buy groceries is now Completed\n");

    let (result, text) = run(
        &services,
        Command::Errands(ErrandsCommand::List {
            search: String::new(),
            status: Some(ErrandStatus::Completed),
        }),
    )
    .await;
    result.unwrap();
    assert!(text.contains("Buy groceries"));
    assert!(text.ends_with("1-2 of 3 results\n"));
}

#[tokio::test]
async fn deactivate_unknown_user_prints_server_message() {
    let services = services(&start_server().await);
    let (result, text) = run(
        &services,
        Command::Users(UsersCommand::Deactivate {
            id: "nope".to_string(),
        }),
    )
    .await;

    assert_eq!(result.unwrap_err().to_string(), "user not found");
    assert_eq!(text, "error: user not found\n");
}

#[tokio::test]
async fn delete_user_reports_remaining_count() {
    let services = services(&start_server().await);
    let (result, text) = run(
        &services,
        Command::Users(UsersCommand::Delete {
            id: "u3".to_string(),
        }),
    )
    .await;

    result.unwrap();
    assert_eq!(text, "Deleted user u3, 2 remaining\n");
    assert_eq!(services.accounts.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn dashboard_shows_stats_and_recent_errands() {
    let services = services(&start_server().await);
    let (result, text) = run(&services, Command::Dashboard).await;

    result.unwrap();
    assert!(text.contains("Total users"));
    assert!(text.contains("+12.5%"));
    assert!(text.contains("-2.0%"));
    assert!(text.contains("12,000"));
    assert!(text.contains("Recent errands"));
    // Newest first.
    let dog = text.find("Walk the dog").unwrap();
    let groceries = text.find("Buy groceries").unwrap();
    assert!(dog < groceries);
}

#[tokio::test]
async fn unreachable_api_fails_with_error_panel() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let services = services(&format!("http://{addr}"));
    let (result, text) = run(&services, Command::Dashboard).await;

    assert!(result.is_err());
    assert!(text.starts_with("error: transport failed"));
}

#[tokio::test]
async fn list_store_over_http_tracks_mutations() {
    let services = services(&start_server().await);
    let store = ListStore::mount(services.errands.clone()).await;
    assert_eq!(store.phase(), Phase::Ready);
    assert_eq!(store.len(), 3);

    let updated = store
        .update("e2", &ErrandPatch::status(ErrandStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(updated.status, ErrandStatus::Cancelled);
    assert_eq!(store.items()[1].status, ErrandStatus::Cancelled);

    store.delete("e1").await.unwrap();
    let ids: Vec<String> = store.items().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["e2", "e3"]);

    // A fresh fetch agrees with the local copy.
    store.refetch().await.unwrap();
    let ids: Vec<String> = store.items().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["e2", "e3"]);

    let err = store.delete("e1").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected("errand not found".to_string()));
    assert_eq!(store.error().as_deref(), Some("errand not found"));
}

#[tokio::test]
async fn value_store_reads_dashboard_stats() {
    let services = services(&start_server().await);
    let store = ValueStore::mount(services.dashboard.clone()).await;
    let stats = store.value().unwrap();
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.total_errands, 3);
    assert_eq!(stats.in_progress_errands, 1);
    assert_eq!(stats.completed_errands, 1);
    assert_eq!(stats.total_revenue, 12000);
}

#[tokio::test]
async fn crafted_id_cannot_escape_errand_path() {
    let services = services(&start_server().await);

    let err = services.errands.delete("../users/u1").await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected("errand not found".to_string()));
    let err = services.errands.get("e1?x").await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound("errand not found".to_string()));

    let users = services.accounts.list().await.unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().any(|u| u.id == "u1"));
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn run_future_is_send() {
    let cli = Cli::try_parse_from(["errand-admin", "dashboard"]).unwrap();
    let future = errand_admin::run(cli);
    assert_send(&future);
}
