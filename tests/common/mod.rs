//! In-process stand-in for the content API, served by axum on an
//! ephemeral port.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Form, Json, Router};
use chrono::Utc;
use ijg_admin::config::AdminConfig;
use ijg_admin::mock_data;
use ijg_admin::models::{Category, Document, News, NewsPayload, Role, User};
use ijg_admin::{ApiClient, SessionStore};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct Backend {
    pub categories: RwLock<Vec<Category>>,
    pub documents: RwLock<Vec<Document>>,
    pub news: RwLock<Vec<News>>,
    pub users: RwLock<Vec<User>>,
    pub uploads: RwLock<Vec<Upload>>,
}

/// What the upload endpoints received, field by field.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub file_name: Option<String>,
    pub file_bytes: Option<Vec<u8>>,
}

impl Backend {
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self {
            categories: RwLock::new(mock_data::categories()),
            documents: RwLock::new(mock_data::documents()),
            news: RwLock::new(mock_data::news()),
            users: RwLock::new(mock_data::users()),
            uploads: RwLock::new(Vec::new()),
        })
    }
}

type Shared = Arc<Backend>;

#[derive(Deserialize)]
struct NameForm {
    name: String,
}

#[derive(Deserialize)]
struct UserBody {
    id: Option<i64>,
    name: String,
    email: String,
    password: Option<String>,
    role: Role,
}

async fn list_categories(State(b): State<Shared>) -> Json<Vec<Category>> {
    Json(b.categories.read().await.clone())
}

async fn create_category(State(b): State<Shared>, Form(form): Form<NameForm>) -> Json<Category> {
    let mut categories = b.categories.write().await;
    let category = Category {
        id: mock_data::next_category_id(&categories),
        name: form.name,
    };
    categories.push(category.clone());
    Json(category)
}

async fn update_category(
    State(b): State<Shared>,
    Json(category): Json<Category>,
) -> Result<Json<Category>, StatusCode> {
    let mut categories = b.categories.write().await;
    let existing = categories
        .iter_mut()
        .find(|c| c.id == category.id)
        .ok_or(StatusCode::NOT_FOUND)?;
    existing.name = category.name.clone();
    Ok(Json(category))
}

async fn delete_category(
    State(b): State<Shared>,
    Json(category): Json<Category>,
) -> StatusCode {
    b.categories.write().await.retain(|c| c.id != category.id);
    StatusCode::NO_CONTENT
}

async fn documents_in_category(
    State(b): State<Shared>,
    Path(id): Path<String>,
) -> Json<Vec<Document>> {
    let documents = b.documents.read().await;
    Json(documents.iter().filter(|d| d.category.id == id).cloned().collect())
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, StatusCode> {
    let mut upload = Upload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            upload.file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            upload.file_bytes = Some(bytes.to_vec());
            continue;
        }
        let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        match name.as_str() {
            "title" => upload.title = text,
            "description" => upload.description = text,
            "categoryId" => upload.category_id = text,
            _ => {}
        }
    }
    Ok(upload)
}

async fn upload_document(
    State(b): State<Shared>,
    multipart: Multipart,
) -> Result<Json<Document>, StatusCode> {
    let upload = read_upload(multipart).await?;
    let category = b
        .categories
        .read()
        .await
        .iter()
        .find(|c| c.id == upload.category_id)
        .cloned()
        .ok_or(StatusCode::BAD_REQUEST)?;

    let mut documents = b.documents.write().await;
    let document = Document {
        id: documents.iter().map(|d| d.id).max().unwrap_or(0) + 1,
        title: upload.title.clone(),
        description: upload.description.clone(),
        file_type: "application/pdf".to_string(),
        file_url: format!("/files/{}", upload.file_name.clone().unwrap_or_default()),
        date_posted: Utc::now().to_rfc3339(),
        category,
    };
    documents.push(document.clone());
    b.uploads.write().await.push(upload);
    Ok(Json(document))
}

async fn update_document(
    State(b): State<Shared>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Document>, StatusCode> {
    let upload = read_upload(multipart).await?;
    let category = b
        .categories
        .read()
        .await
        .iter()
        .find(|c| c.id == upload.category_id)
        .cloned()
        .ok_or(StatusCode::BAD_REQUEST)?;

    let mut documents = b.documents.write().await;
    let document = documents
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    document.title = upload.title.clone();
    document.description = upload.description.clone();
    document.category = category;
    let updated = document.clone();
    b.uploads.write().await.push(upload);
    Ok(Json(updated))
}

async fn delete_document(State(b): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut documents = b.documents.write().await;
    let before = documents.len();
    documents.retain(|d| d.id != id);
    if documents.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn list_news(State(b): State<Shared>) -> Json<Vec<News>> {
    Json(b.news.read().await.clone())
}

async fn create_news(State(b): State<Shared>, Json(body): Json<NewsPayload>) -> Json<News> {
    let mut news = b.news.write().await;
    let item = News {
        id: news.iter().map(|n| n.id).max().unwrap_or(0) + 1,
        title: body.title,
        description: body.description,
        date_posted: Utc::now().to_rfc3339(),
    };
    news.push(item.clone());
    Json(item)
}

async fn update_news(
    State(b): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<NewsPayload>,
) -> Result<Json<News>, StatusCode> {
    let mut news = b.news.write().await;
    let item = news.iter_mut().find(|n| n.id == id).ok_or(StatusCode::NOT_FOUND)?;
    item.title = body.title;
    item.description = body.description;
    Ok(Json(item.clone()))
}

async fn delete_news(State(b): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    b.news.write().await.retain(|n| n.id != id);
    StatusCode::OK
}

async fn list_users(State(b): State<Shared>) -> Json<Vec<User>> {
    Json(b.users.read().await.clone())
}

async fn user_by_email(
    State(b): State<Shared>,
    Path(email): Path<String>,
) -> Result<Json<User>, StatusCode> {
    b.users
        .read()
        .await
        .iter()
        .find(|u| u.email == email)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_user(State(b): State<Shared>, Json(body): Json<UserBody>) -> Json<User> {
    let mut users = b.users.write().await;
    let user = User {
        id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
    };
    users.push(user.clone());
    Json(user)
}

async fn update_user(
    State(b): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<UserBody>,
) -> Result<Json<User>, StatusCode> {
    if body.id != Some(id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut users = b.users.write().await;
    let user = users.iter_mut().find(|u| u.id == id).ok_or(StatusCode::NOT_FOUND)?;
    user.name = body.name;
    user.email = body.email;
    if body.password.is_some() {
        user.password = body.password;
    }
    user.role = body.role;
    Ok(Json(user.clone()))
}

async fn delete_user(State(b): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    b.users.write().await.retain(|u| u.id != id);
    StatusCode::OK
}

pub fn router(backend: Shared) -> Router {
    let api = Router::new()
        .route(
            "/categories",
            get(list_categories)
                .post(create_category)
                .delete(delete_category),
        )
        .route("/categories/api/updatecategory", put(update_category))
        .route("/documents/category/:id", get(documents_in_category))
        .route("/documents/upload", post(upload_document))
        .route("/documents/update/:id", put(update_document))
        .route("/documents/delete/:id", delete(delete_document))
        .route("/news", get(list_news).post(create_news))
        .route("/news/:id", put(update_news).delete(delete_news))
        .route("/users", get(list_users).post(create_user))
        .route("/users/email/:email", get(user_by_email))
        .route("/users/:id", put(update_user).delete(delete_user))
        .with_state(backend);

    Router::new().nest("/api", api)
}

/// Answers every request with a 500.
pub fn broken_router() -> Router {
    Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR })
}

/// Serves `router` on 127.0.0.1 and returns its `/api` base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

pub fn client(base_url: &str, dir: &tempfile::TempDir) -> ApiClient {
    let config = AdminConfig::default().with_api_url(base_url);
    ApiClient::new(&config, SessionStore::new(dir.path().join("session.json")))
}

pub async fn seeded() -> (Arc<Backend>, String) {
    let backend = Backend::seeded();
    let url = serve(router(backend.clone())).await;
    (backend, url)
}
