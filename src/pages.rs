//! Per-entity screens: list state, form submission and confirmed deletes.
//!
//! Every page follows the same rules. A successful write is followed by a
//! full re-fetch of the list; nothing is patched in place. A failed write
//! returns the error and leaves the list exactly as it was. Deletes only go
//! out after `confirm` says yes.

use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::mock_data;
use crate::models::{
    Category, CategoryForm, Document, DocumentForm, News, NewsForm, NewsPayload, Role, User,
    UserForm, UserPayload,
};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
}

impl CategoriesPage {
    pub const DELETE_PROMPT: &'static str = "Are you sure you want to delete this category?";

    pub async fn load(api: &ApiClient) -> Self {
        let mut page = Self::default();
        page.refresh(api).await;
        page
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        self.categories = api.get_categories().await;
    }

    pub fn find(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Creates a category, or renames `editing` when given.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        editing: Option<&Category>,
        form: &CategoryForm,
    ) -> Result<&'static str> {
        if form.name.trim().is_empty() {
            return Err(ApiError::validation("Please enter a category name"));
        }

        let message = match editing {
            Some(category) => {
                let renamed = Category {
                    name: form.name.clone(),
                    ..category.clone()
                };
                api.update_category(&renamed).await?;
                "Category updated successfully"
            }
            None => {
                api.create_category(&form.name).await?;
                "Category created successfully"
            }
        };
        self.refresh(api).await;
        Ok(message)
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        category: &Category,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Deletion> {
        if !confirm(Self::DELETE_PROMPT) {
            return Ok(Deletion::Cancelled);
        }
        api.delete_category(category).await?;
        self.refresh(api).await;
        Ok(Deletion::Deleted)
    }
}

#[derive(Debug, Default)]
pub struct DocumentsPage {
    pub categories: Vec<Category>,
    pub documents: Vec<Document>,
}

impl DocumentsPage {
    pub const DELETE_PROMPT: &'static str = "Are you sure you want to delete this document?";

    pub async fn load(api: &ApiClient) -> Self {
        let mut page = Self::default();
        page.refresh(api).await;
        page
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        let (categories, documents) = api.list_all_documents().await;
        self.categories = categories;
        self.documents = documents;
    }

    pub fn find(&self, id: i64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents of one category, filtered from the loaded list.
    pub fn in_category(&self, category_id: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.category.id == category_id)
            .collect()
    }

    /// Form pre-filled from an existing document. The file is left empty so
    /// an update keeps the stored attachment unless a new one is chosen.
    pub fn edit_form(document: &Document) -> DocumentForm {
        DocumentForm {
            title: document.title.clone(),
            description: document.description.clone(),
            category_id: document.category.id.clone(),
            file: None,
        }
    }

    /// Uploads a new document, or updates document `editing` when given.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        editing: Option<i64>,
        form: &DocumentForm,
    ) -> Result<&'static str> {
        if form.title.is_empty() || form.description.is_empty() || form.category_id.is_empty() {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        if editing.is_none() && form.file.is_none() {
            return Err(ApiError::validation("Please select a file to upload"));
        }

        let message = match editing {
            Some(id) => {
                api.update_document(id, form).await?;
                "Document updated successfully"
            }
            None => {
                api.upload_document(form).await?;
                "Document uploaded successfully"
            }
        };
        self.refresh(api).await;
        Ok(message)
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Deletion> {
        if !confirm(Self::DELETE_PROMPT) {
            return Ok(Deletion::Cancelled);
        }
        api.delete_document(id).await?;
        self.refresh(api).await;
        Ok(Deletion::Deleted)
    }
}

#[derive(Debug, Default)]
pub struct NewsPage {
    pub news: Vec<News>,
}

impl NewsPage {
    pub const DELETE_PROMPT: &'static str = "Are you sure you want to delete this news article?";

    pub async fn load(api: &ApiClient) -> Self {
        let mut page = Self::default();
        page.refresh(api).await;
        page
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        self.news = api.get_news().await;
    }

    pub fn find(&self, id: i64) -> Option<&News> {
        self.news.iter().find(|n| n.id == id)
    }

    pub async fn submit(
        &mut self,
        api: &ApiClient,
        editing: Option<i64>,
        form: &NewsForm,
    ) -> Result<&'static str> {
        if form.title.trim().is_empty() || form.description.trim().is_empty() {
            return Err(ApiError::validation("Please fill in all fields"));
        }

        let payload = NewsPayload {
            title: form.title.clone(),
            description: form.description.clone(),
        };
        let message = match editing {
            Some(id) => {
                api.update_news(id, &payload).await?;
                "News updated successfully"
            }
            None => {
                api.create_news(&payload).await?;
                "News created successfully"
            }
        };
        self.refresh(api).await;
        Ok(message)
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Deletion> {
        if !confirm(Self::DELETE_PROMPT) {
            return Ok(Deletion::Cancelled);
        }
        api.delete_news(id).await?;
        self.refresh(api).await;
        Ok(Deletion::Deleted)
    }
}

#[derive(Debug)]
pub struct UsersPage {
    pub users: Vec<User>,
    /// There is no roles endpoint; the known roles are the seeded ones.
    pub roles: Vec<Role>,
}

impl Default for UsersPage {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            roles: mock_data::roles(),
        }
    }
}

impl UsersPage {
    pub const DELETE_PROMPT: &'static str = "Are you sure you want to delete this user?";

    pub async fn load(api: &ApiClient) -> Self {
        let mut page = Self::default();
        page.refresh(api).await;
        page
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        self.users = api.get_users().await;
    }

    pub fn find(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn edit_form(user: &User) -> UserForm {
        UserForm {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role_id: user.role.id.to_string(),
        }
    }

    pub async fn submit(
        &mut self,
        api: &ApiClient,
        editing: Option<i64>,
        form: &UserForm,
    ) -> Result<&'static str> {
        if form.name.trim().is_empty() || form.email.trim().is_empty() || form.role_id.is_empty()
        {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        if editing.is_none() && form.password.trim().is_empty() {
            return Err(ApiError::validation("Password is required for new users"));
        }

        let role = self
            .roles
            .iter()
            .find(|r| r.id.to_string() == form.role_id)
            .cloned()
            .ok_or_else(|| ApiError::validation("Invalid role selected"))?;

        let payload = UserPayload {
            id: None,
            name: form.name.clone(),
            email: form.email.clone(),
            password: Some(form.password.clone()).filter(|p| !p.is_empty()),
            role,
        };
        let message = match editing {
            Some(id) => {
                api.update_user(id, &payload).await?;
                "User updated successfully"
            }
            None => {
                api.create_user(&payload).await?;
                "User created successfully"
            }
        };
        self.refresh(api).await;
        Ok(message)
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Deletion> {
        if !confirm(Self::DELETE_PROMPT) {
            return Ok(Deletion::Cancelled);
        }
        api.delete_user(id).await?;
        self.refresh(api).await;
        Ok(Deletion::Deleted)
    }
}
