use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, Document, News, User};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::error;

pub const RECENT_DOCUMENTS: usize = 5;
pub const RECENT_NEWS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub documents: usize,
    pub categories: usize,
    pub news: usize,
    pub users: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_documents: Vec<Document>,
    pub recent_news: Vec<News>,
}

/// A failed branch contributes nothing; the other branches are unaffected.
fn settle<T>(branch: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!(branch, error = %e, "dashboard branch failed");
        Vec::new()
    })
}

/// Newest first; entries with an unreadable timestamp go last.
fn newest_first<T>(items: &mut [T], posted_at: impl Fn(&T) -> Option<DateTime<Utc>>) {
    items.sort_by_key(|item| Reverse(posted_at(item)));
}

impl DashboardSummary {
    pub fn assemble(
        categories: Result<Vec<Category>, ApiError>,
        news: Result<Vec<News>, ApiError>,
        users: Result<Vec<User>, ApiError>,
        documents: Result<Vec<Document>, ApiError>,
    ) -> Self {
        let categories = settle("categories", categories);
        let mut news = settle("news", news);
        let users = settle("users", users);
        let mut documents = settle("documents", documents);

        let stats = DashboardStats {
            documents: documents.len(),
            categories: categories.len(),
            news: news.len(),
            users: users.len(),
        };

        newest_first(&mut documents, Document::posted_at);
        documents.truncate(RECENT_DOCUMENTS);
        newest_first(&mut news, News::posted_at);
        news.truncate(RECENT_NEWS);

        Self {
            stats,
            recent_documents: documents,
            recent_news: news,
        }
    }

    /// Categories, news and users are fetched concurrently, then each
    /// category's documents in turn.
    pub async fn load(api: &ApiClient) -> Self {
        let (categories, news, users) = tokio::join!(
            async { Ok::<_, ApiError>(api.get_categories().await) },
            async { Ok::<_, ApiError>(api.get_news().await) },
            async { Ok::<_, ApiError>(api.get_users().await) },
        );

        let mut documents = Vec::new();
        if let Ok(categories) = &categories {
            for category in categories {
                documents.extend(api.get_documents_by_category(&category.id).await);
            }
        }

        Self::assemble(categories, news, users, Ok(documents))
    }
}
