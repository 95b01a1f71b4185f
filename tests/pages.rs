mod common;

use common::{broken_router, client, seeded, serve};
use ijg_admin::auth::{AuthState, Navigation, HOME_ROUTE, LOGIN_ROUTE};
use ijg_admin::dashboard::DashboardSummary;
use ijg_admin::models::{CategoryForm, NewsForm, UserForm};
use ijg_admin::pages::{CategoriesPage, Deletion, DocumentsPage, NewsPage, UsersPage};
use ijg_admin::AuthGuard;

#[tokio::test]
async fn submit_refetches_the_whole_list() {
    let (backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = CategoriesPage::load(&api).await;
    assert_eq!(page.categories.len(), 4);

    // changed behind the page's back; the re-fetch must pick it up
    backend.categories.write().await.remove(0);

    let message = page
        .submit(&api, None, &CategoryForm { name: "Briefings".to_string() })
        .await
        .unwrap();

    assert_eq!(message, "Category created successfully");
    let names: Vec<&str> = page.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Financial Reports", "Market Analysis", "Policy Documents", "Briefings"]
    );
}

#[tokio::test]
async fn failed_submit_keeps_the_previous_list() {
    let url = serve(broken_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = CategoriesPage::default();
    let err = page
        .submit(&api, None, &CategoryForm { name: "Briefings".to_string() })
        .await
        .unwrap_err();

    assert!(!err.is_validation());
    assert!(page.categories.is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_and_refetches() {
    let (_backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = NewsPage::load(&api).await;
    let outcome = page.delete(&api, 2, |_| true).await.unwrap();

    assert_eq!(outcome, Deletion::Deleted);
    assert_eq!(page.news.len(), 2);
    assert!(page.find(2).is_none());
}

#[tokio::test]
async fn news_edit_updates_in_place_on_the_backend() {
    let (_backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = NewsPage::load(&api).await;
    let form = NewsForm {
        title: "Quarterly Economic Review (Q3)".to_string(),
        description: "Updated review".to_string(),
    };
    let message = page.submit(&api, Some(2), &form).await.unwrap();

    assert_eq!(message, "News updated successfully");
    assert_eq!(page.find(2).unwrap().title, "Quarterly Economic Review (Q3)");
}

#[tokio::test]
async fn documents_page_spans_all_categories() {
    let (_backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = DocumentsPage::load(&api).await;
    assert_eq!(page.documents.len(), 4);

    page.delete(&api, 3, |_| true).await.unwrap();
    assert_eq!(page.documents.len(), 3);
    assert!(page.in_category("4").is_empty());
}

#[tokio::test]
async fn users_page_creates_with_a_known_role() {
    let (_backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut page = UsersPage::load(&api).await;
    let form = UserForm {
        name: "Ama Mensah".to_string(),
        email: "ama@ijg.com".to_string(),
        password: "s3cret!".to_string(),
        role_id: "2".to_string(),
    };
    page.submit(&api, None, &form).await.unwrap();

    let ama = page.users.iter().find(|u| u.email == "ama@ijg.com").unwrap();
    assert_eq!(ama.role.name, "Editor");
}

#[tokio::test]
async fn dashboard_counts_what_the_backend_holds() {
    let (backend, url) = seeded().await;
    backend.news.write().await.truncate(1);
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let summary = DashboardSummary::load(&api).await;

    assert_eq!(summary.stats.categories, 4);
    assert_eq!(summary.stats.documents, 4);
    assert_eq!(summary.stats.news, 1);
    assert_eq!(summary.stats.users, 3);
    assert_eq!(summary.recent_documents[0].id, 1);
}

#[tokio::test]
async fn guard_login_then_logout_round_trip() {
    let (_backend, url) = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let api = client(&url, &dir);

    let mut guard = AuthGuard::new();
    assert_eq!(guard.init(api.session(), HOME_ROUTE), Navigation::Redirect(LOGIN_ROUTE));

    let user = guard.login(&api, "viewer@ijg.com", "viewer123").await.unwrap();
    assert_eq!(user.role.name, "Viewer");
    assert!(matches!(guard.state(), AuthState::Authenticated(_)));

    // a fresh start picks the session back up
    let mut restarted = AuthGuard::new();
    assert_eq!(restarted.init(api.session(), "/users"), Navigation::Stay);
    assert_eq!(restarted.current_user().map(|u| u.id), Some(3));

    assert_eq!(restarted.logout(&api), Navigation::Redirect(LOGIN_ROUTE));
    let mut after = AuthGuard::new();
    assert_eq!(after.init(api.session(), "/users"), Navigation::Redirect(LOGIN_ROUTE));
}
