//! Sign-in session persisted in an on-disk local storage database.

use financial_storyteller::auth::{DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD};
use financial_storyteller::cli::state::App;
use financial_storyteller::database::db::storage::{IS_AUTHENTICATED_KEY, USER_KEY};
use financial_storyteller::database::db::LocalStorage;
use financial_storyteller::latency::Latency;
use financial_storyteller::pages::login::{LoginField, LoginPage};
use financial_storyteller::pages::DashboardPage;
use financial_storyteller::router::{self, Page};
use pretty_assertions::assert_eq;

fn storage_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("storage.db").display())
}

async fn sign_in(storage: &LocalStorage) -> Option<&'static str> {
    let mut page = LoginPage::mount();
    page.set_field(LoginField::Email, DEMO_EMAIL.into());
    page.set_field(LoginField::Password, DEMO_PASSWORD.into());
    page.submit(storage, &Latency::none()).await
}

#[tokio::test]
async fn session_survives_reopening_storage() {
    let dir = tempfile::tempdir().unwrap();
    let url = storage_url(&dir);

    {
        let storage = LocalStorage::open(&url).await.unwrap();
        assert!(!storage.is_authenticated().await.unwrap());
        assert_eq!(sign_in(&storage).await, Some(router::DASHBOARD));
        storage.close().await;
    }

    let storage = LocalStorage::open(&url).await.unwrap();
    assert!(storage.is_authenticated().await.unwrap());
    let user = storage.stored_user().await.unwrap().unwrap();
    assert_eq!(user.name, DEMO_NAME);
    assert_eq!(user.email, DEMO_EMAIL);
    assert_eq!(storage.keys().await.unwrap(), vec![IS_AUTHENTICATED_KEY.to_string(), USER_KEY.to_string()]);

    let page = LoginPage::mount();
    assert_eq!(page.on_mount(&storage).await.unwrap(), Some(router::DASHBOARD));
}

#[tokio::test]
async fn logout_keeps_the_stored_session() {
    let storage = LocalStorage::in_memory().await.unwrap();
    sign_in(&storage).await;

    let mut dashboard = DashboardPage::mount();
    dashboard.load(&Latency::none(), chrono::Utc::now()).await;
    assert_eq!(dashboard.logout(), router::LOGIN);
    assert!(dashboard.user.is_none());

    assert!(storage.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn signed_in_app_skips_the_login_page() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let fresh = App::start(storage.clone(), Latency::none(), router::LOGIN).await;
    assert_eq!(fresh.page.page(), Page::Login);

    sign_in(&storage).await;
    let app = App::start(storage, Latency::none(), router::LOGIN).await;
    assert_eq!(app.nav.path(), router::DASHBOARD);
    assert_eq!(app.page.page(), Page::Dashboard);
    assert!(app.nav.can_go_back());
}

#[tokio::test]
async fn wrong_password_stores_nothing() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let mut page = LoginPage::mount();
    page.set_field(LoginField::Email, DEMO_EMAIL.into());
    page.set_field(LoginField::Password, "not-the-password".into());
    assert_eq!(page.submit(&storage, &Latency::none()).await, None);
    assert!(page.general_error.is_some());
    assert!(storage.keys().await.unwrap().is_empty());
}
