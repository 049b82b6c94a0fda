use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const RECENT_LIMIT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Worker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrandStatus {
    Waiting,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Errand {
    pub id: String,
    pub title: String,
    pub description: String,
    pub client_id: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_name: Option<String>,
    pub status: ErrandStatus,
    pub fee: u64,
    pub location: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateErrand {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub client_id: String,
    pub client_name: String,
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    #[serde(default = "waiting")]
    pub status: ErrandStatus,
    pub fee: u64,
    #[serde(default)]
    pub location: String,
    pub due_date: DateTime<Utc>,
}

fn waiting() -> ErrandStatus {
    ErrandStatus::Waiting
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateErrand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    pub status: Option<ErrandStatus>,
    pub fee: Option<u64>,
    pub location: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_errands: u64,
    pub in_progress_errands: u64,
    pub completed_errands: u64,
    pub total_revenue: u64,
    pub user_growth: f64,
    pub errand_growth: f64,
    pub revenue_growth: f64,
}

/// Response wrapper used by every route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(status: StatusCode, data: T) -> Reply<T> {
    let body = ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message: None,
    };
    (status, Json(body))
}

fn done<T>(message: &str) -> Reply<T> {
    let body = ApiResponse {
        success: true,
        data: None,
        error: None,
        message: Some(message.to_string()),
    };
    (StatusCode::OK, Json(body))
}

fn fail<T>(status: StatusCode, error: &str) -> Reply<T> {
    let body = ApiResponse {
        success: false,
        data: None,
        error: Some(error.to_string()),
        message: None,
    };
    (status, Json(body))
}

/// Initial contents of the in-memory store.
#[derive(Clone, Debug, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub errands: Vec<Errand>,
    pub user_growth: f64,
    pub errand_growth: f64,
    pub revenue_growth: f64,
}

#[derive(Debug)]
pub struct Store {
    users: Vec<User>,
    errands: Vec<Errand>,
    user_growth: f64,
    errand_growth: f64,
    revenue_growth: f64,
}

impl Store {
    fn stats(&self) -> DashboardStats {
        let count = |status: ErrandStatus| self.errands.iter().filter(|e| e.status == status).count() as u64;
        DashboardStats {
            total_users: self.users.len() as u64,
            total_errands: self.errands.len() as u64,
            in_progress_errands: count(ErrandStatus::InProgress),
            completed_errands: count(ErrandStatus::Completed),
            total_revenue: self
                .errands
                .iter()
                .filter(|e| e.status == ErrandStatus::Completed)
                .map(|e| e.fee)
                .sum(),
            user_growth: self.user_growth,
            errand_growth: self.errand_growth,
            revenue_growth: self.revenue_growth,
        }
    }

    /// Newest first; among equal timestamps the later insertion wins.
    fn recent(&self) -> Vec<Errand> {
        let mut recent: Vec<Errand> = self.errands.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_LIMIT);
        recent
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Seed::default())
}

pub fn app_with(seed: Seed) -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        users: seed.users,
        errands: seed.errands,
        user_growth: seed.user_growth,
        errand_growth: seed.errand_growth,
        revenue_growth: seed.revenue_growth,
    }));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/errands", get(list_errands).post(create_errand))
        .route("/errands/{id}", get(get_errand).put(update_errand).delete(delete_errand))
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/dashboard/recent-errands", get(recent_errands))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

// --- users ---

async fn list_users(State(db): State<Db>) -> Reply<Vec<User>> {
    ok(StatusCode::OK, db.read().await.users.clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Reply<User> {
    let store = db.read().await;
    match store.users.iter().find(|u| u.id == id) {
        Some(user) => ok(StatusCode::OK, user.clone()),
        None => fail(StatusCode::NOT_FOUND, "user not found"),
    }
}

async fn create_user(State(db): State<Db>, Json(input): Json<CreateUser>) -> Reply<User> {
    if input.name.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "name is required");
    }
    if !input.email.contains('@') {
        return fail(StatusCode::BAD_REQUEST, "email is invalid");
    }
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        role: input.role,
        is_active: input.is_active,
        created_at: now,
        updated_at: now,
    };
    db.write().await.users.push(user.clone());
    tracing::debug!(id = %user.id, "user created");
    ok(StatusCode::CREATED, user)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Reply<User> {
    let mut store = db.write().await;
    let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
        return fail(StatusCode::NOT_FOUND, "user not found");
    };
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(phone) = input.phone {
        user.phone = phone;
    }
    if let Some(role) = input.role {
        user.role = role;
    }
    if let Some(is_active) = input.is_active {
        user.is_active = is_active;
    }
    user.updated_at = Utc::now();
    ok(StatusCode::OK, user.clone())
}

async fn delete_user(State(db): State<Db>, Path(id): Path<String>) -> Reply<()> {
    let mut store = db.write().await;
    let before = store.users.len();
    store.users.retain(|u| u.id != id);
    if store.users.len() == before {
        return fail(StatusCode::NOT_FOUND, "user not found");
    }
    done("user deleted")
}

// --- errands ---

async fn list_errands(State(db): State<Db>) -> Reply<Vec<Errand>> {
    ok(StatusCode::OK, db.read().await.errands.clone())
}

async fn get_errand(State(db): State<Db>, Path(id): Path<String>) -> Reply<Errand> {
    let store = db.read().await;
    match store.errands.iter().find(|e| e.id == id) {
        Some(errand) => ok(StatusCode::OK, errand.clone()),
        None => fail(StatusCode::NOT_FOUND, "errand not found"),
    }
}

async fn create_errand(State(db): State<Db>, Json(input): Json<CreateErrand>) -> Reply<Errand> {
    if input.title.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "title is required");
    }
    let now = Utc::now();
    let errand = Errand {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description,
        client_id: input.client_id,
        client_name: input.client_name,
        worker_id: input.worker_id,
        worker_name: input.worker_name,
        status: input.status,
        fee: input.fee,
        location: input.location,
        due_date: input.due_date,
        created_at: now,
        updated_at: now,
    };
    db.write().await.errands.push(errand.clone());
    tracing::debug!(id = %errand.id, "errand created");
    ok(StatusCode::CREATED, errand)
}

async fn update_errand(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateErrand>,
) -> Reply<Errand> {
    let mut store = db.write().await;
    let Some(errand) = store.errands.iter_mut().find(|e| e.id == id) else {
        return fail(StatusCode::NOT_FOUND, "errand not found");
    };
    if let Some(title) = input.title {
        errand.title = title;
    }
    if let Some(description) = input.description {
        errand.description = description;
    }
    if let Some(client_id) = input.client_id {
        errand.client_id = client_id;
    }
    if let Some(client_name) = input.client_name {
        errand.client_name = client_name;
    }
    if let Some(worker_id) = input.worker_id {
        errand.worker_id = Some(worker_id);
    }
    if let Some(worker_name) = input.worker_name {
        errand.worker_name = Some(worker_name);
    }
    if let Some(status) = input.status {
        errand.status = status;
    }
    if let Some(fee) = input.fee {
        errand.fee = fee;
    }
    if let Some(location) = input.location {
        errand.location = location;
    }
    if let Some(due_date) = input.due_date {
        errand.due_date = due_date;
    }
    errand.updated_at = Utc::now();
    ok(StatusCode::OK, errand.clone())
}

async fn delete_errand(State(db): State<Db>, Path(id): Path<String>) -> Reply<()> {
    let mut store = db.write().await;
    let before = store.errands.len();
    store.errands.retain(|e| e.id != id);
    if store.errands.len() == before {
        return fail(StatusCode::NOT_FOUND, "errand not found");
    }
    done("errand deleted")
}

// --- dashboard ---

async fn dashboard_stats(State(db): State<Db>) -> Reply<DashboardStats> {
    ok(StatusCode::OK, db.read().await.stats())
}

async fn recent_errands(State(db): State<Db>) -> Reply<Vec<Errand>> {
    ok(StatusCode::OK, db.read().await.recent())
}
