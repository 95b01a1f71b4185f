//! Typed access to the IJG content API.
//!
//! Reads never fail: when the backend cannot be reached, answers with a
//! non-2xx status, or sends a body that does not parse, the read returns the
//! seed data from [`crate::mock_data`] and logs a warning. Writes return the
//! failure to the caller and have no fallback.

use crate::config::AdminConfig;
use crate::error::{ApiError, Result};
use crate::mock_data;
use crate::models::{
    Category, Document, DocumentForm, News, NewsPayload, User, UserPayload,
};
use crate::session::SessionStore;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AdminConfig, session: SessionStore) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url().to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Request carrying the uniform `Content-Type: application/json` header.
    fn json_request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(endpoint))
            .header(CONTENT_TYPE, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn read_or<T, F>(&self, endpoint: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.fetch_json(self.json_request(Method::GET, endpoint)).await {
            Ok(data) => data,
            Err(e) => {
                warn!(endpoint, error = %e, "API request failed, using mock data");
                fallback()
            }
        }
    }

    // Categories

    pub async fn get_categories(&self) -> Vec<Category> {
        self.read_or("/categories", mock_data::categories).await
    }

    /// The backend only accepts a URL-encoded `name=...` body on create.
    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let request = self
            .http
            .post(self.url("/categories"))
            .form(&[("name", name)]);
        self.fetch_json(request).await
    }

    pub async fn update_category(&self, category: &Category) -> Result<Category> {
        let request = self
            .json_request(Method::PUT, "/categories/api/updatecategory")
            .json(category);
        self.fetch_json(request).await
    }

    pub async fn delete_category(&self, category: &Category) -> Result<()> {
        let request = self
            .json_request(Method::DELETE, "/categories")
            .json(category);
        self.execute(request).await?;
        Ok(())
    }

    // Documents

    pub async fn get_documents_by_category(&self, category_id: &str) -> Vec<Document> {
        let endpoint = format!("/documents/category/{}", category_id);
        self.read_or(&endpoint, || mock_data::documents_in_category(category_id))
            .await
    }

    /// Every category's documents, concatenated in category order.
    pub async fn list_all_documents(&self) -> (Vec<Category>, Vec<Document>) {
        let categories = self.get_categories().await;
        let mut documents = Vec::new();
        for category in &categories {
            documents.extend(self.get_documents_by_category(&category.id).await);
        }
        (categories, documents)
    }

    fn document_form(form: &DocumentForm) -> Result<Form> {
        let mut multipart = Form::new()
            .text("title", form.title.clone())
            .text("description", form.description.clone())
            .text("categoryId", form.category_id.clone());

        if let Some(file) = &form.file {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)?;
            multipart = multipart.part("file", part);
        }
        Ok(multipart)
    }

    pub async fn upload_document(&self, form: &DocumentForm) -> Result<Document> {
        let request = self
            .http
            .post(self.url("/documents/upload"))
            .multipart(Self::document_form(form)?);
        self.fetch_json(request).await
    }

    pub async fn update_document(&self, id: i64, form: &DocumentForm) -> Result<Document> {
        let request = self
            .http
            .put(self.url(&format!("/documents/update/{}", id)))
            .multipart(Self::document_form(form)?);
        self.fetch_json(request).await
    }

    pub async fn delete_document(&self, id: i64) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/documents/delete/{}", id)));
        self.execute(request).await?;
        Ok(())
    }

    // News

    pub async fn get_news(&self) -> Vec<News> {
        self.read_or("/news", mock_data::news).await
    }

    pub async fn create_news(&self, news: &NewsPayload) -> Result<News> {
        let request = self.json_request(Method::POST, "/news").json(news);
        self.fetch_json(request).await
    }

    pub async fn update_news(&self, id: i64, news: &NewsPayload) -> Result<News> {
        let request = self
            .json_request(Method::PUT, &format!("/news/{}", id))
            .json(news);
        self.fetch_json(request).await
    }

    pub async fn delete_news(&self, id: i64) -> Result<()> {
        let request = self.json_request(Method::DELETE, &format!("/news/{}", id));
        self.execute(request).await?;
        Ok(())
    }

    // Users

    pub async fn get_users(&self) -> Vec<User> {
        self.read_or("/users", mock_data::users).await
    }

    pub async fn create_user(&self, user: &UserPayload) -> Result<User> {
        let payload = UserPayload {
            id: None,
            ..user.clone()
        };
        let request = self.json_request(Method::POST, "/users").json(&payload);
        self.fetch_json(request).await
    }

    pub async fn update_user(&self, id: i64, user: &UserPayload) -> Result<User> {
        let payload = UserPayload {
            id: Some(id),
            ..user.clone()
        };
        let request = self
            .json_request(Method::PUT, &format!("/users/{}", id))
            .json(&payload);
        self.fetch_json(request).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let request = self.json_request(Method::DELETE, &format!("/users/{}", id));
        self.execute(request).await?;
        Ok(())
    }

    // Authentication

    fn user_by_email_url(&self, email: &str) -> Option<Url> {
        let mut url = Url::parse(&self.url("/users/email")).ok()?;
        url.path_segments_mut().ok()?.push(email);
        Some(url)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User> {
        let url = self
            .user_by_email_url(email)
            .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;
        match self.fetch_json(self.http.get(url)).await {
            Ok(user) => Ok(user),
            Err(e) => {
                debug!(email, error = %e, "user lookup failed");
                Err(ApiError::Auth("User not found".to_string()))
            }
        }
    }

    /// Looks the user up by email and compares the returned password field
    /// with `password` locally. On a match the full record, password
    /// included, becomes the persisted session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = match self.find_user_by_email(email).await {
            Ok(user) => user,
            Err(e) => {
                error!(email, error = %e, "Login failed");
                return Err(e);
            }
        };

        if user.password.as_deref() != Some(password) {
            error!(email, "Login failed: invalid password");
            return Err(ApiError::Auth("Invalid password".to_string()));
        }

        self.session.save(&user)?;
        info!(email, role = %user.role.name, "logged in");
        Ok(user)
    }

    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "could not remove session file");
        }
    }

    pub fn get_current_user(&self) -> Option<User> {
        self.session.load()
    }
}
