//! Seed data served in place of a failed backend read.
//!
//! Timestamps are relative to the moment of the call so the dashboard's
//! "recent" lists keep a stable order: documents and news are one day
//! apart, newest first.

use crate::models::{Category, Document, News, Role, User};
use chrono::{Duration, SecondsFormat, Utc};

pub fn roles() -> Vec<Role> {
    vec![
        Role { id: 1, name: "Admin".to_string() },
        Role { id: 2, name: "Editor".to_string() },
        Role { id: 3, name: "Viewer".to_string() },
    ]
}

pub fn categories() -> Vec<Category> {
    [
        ("1", "Research Papers"),
        ("2", "Financial Reports"),
        ("3", "Market Analysis"),
        ("4", "Policy Documents"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn documents() -> Vec<Document> {
    let categories = categories();
    let seed = [
        (
            1,
            "Annual Financial Report 2024",
            "Comprehensive financial analysis for the year 2024",
            "application/pdf",
            1,
        ),
        (
            2,
            "Market Research Q4",
            "Quarterly market analysis and trends",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            2,
        ),
        (
            3,
            "Policy Framework 2024-2025",
            "Updated policy framework for the next fiscal year",
            "application/pdf",
            3,
        ),
        (
            4,
            "Research Findings: Economic Impact",
            "Analysis of economic impact in the region",
            "application/pdf",
            0,
        ),
    ];

    seed.into_iter()
        .map(|(id, title, description, file_type, category)| Document {
            id,
            title: title.to_string(),
            description: description.to_string(),
            file_type: file_type.to_string(),
            file_url: "#".to_string(),
            date_posted: days_ago(id - 1),
            category: categories[category].clone(),
        })
        .collect()
}

pub fn documents_in_category(category_id: &str) -> Vec<Document> {
    documents()
        .into_iter()
        .filter(|doc| doc.category.id == category_id)
        .collect()
}

pub fn news() -> Vec<News> {
    let seed = [
        (
            1,
            "New Research Initiative Launched",
            "IJG Research announces a new initiative focused on sustainable development in the region.",
        ),
        (
            2,
            "Quarterly Economic Review Published",
            "Our latest economic review highlights growth opportunities in key sectors.",
        ),
        (
            3,
            "IJG Partners with International Organizations",
            "New partnerships aim to enhance research capabilities and global reach.",
        ),
    ];

    seed.into_iter()
        .map(|(id, title, description)| News {
            id,
            title: title.to_string(),
            description: description.to_string(),
            date_posted: days_ago(id - 1),
        })
        .collect()
}

pub fn users() -> Vec<User> {
    let roles = roles();
    [
        (1, "John Doe", "admin@ijg.com", "admin123"),
        (2, "Jane Smith", "editor@ijg.com", "editor123"),
        (3, "Mike Johnson", "viewer@ijg.com", "viewer123"),
    ]
    .into_iter()
    .zip(roles)
    .map(|((id, name, email, password), role)| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: Some(password.to_string()),
        role,
    })
    .collect()
}

/// Next category id in a mock-only context: one past the largest numeric id.
pub fn next_category_id(existing: &[Category]) -> String {
    let max = existing
        .iter()
        .filter_map(|c| c.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}
