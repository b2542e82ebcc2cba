use async_trait::async_trait;
use folio::core::site::ContactField;
use folio::core::view::CarouselView;
use folio::core::{ContactMessage, MailRelay, Project, ProjectSource, Theme};
use folio::{
    Action, FilePreferenceStore, LoadError, LoadPolicy, ProjectStore, SiteEngine, SiteEvent,
    SubmissionError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;

fn projects(n: usize) -> Vec<Project> {
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "id": i,
                "title": format!("Project {}", i),
                "description": "",
                "image": "",
                "technologies": [],
                "live": ""
            }))
            .unwrap()
        })
        .collect()
}

/// Holds the answer back until the test releases it.
struct GatedSource {
    gate: Arc<Notify>,
    answer: Mutex<Option<Result<Vec<Project>, LoadError>>>,
}

#[async_trait]
impl ProjectSource for GatedSource {
    async fn fetch_all(&self) -> Result<Vec<Project>, LoadError> {
        self.gate.notified().await;
        self.answer.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
struct RecordingRelay {
    fail: bool,
    sent: Mutex<Vec<ContactMessage>>,
    calls: AtomicUsize,
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn submit(&self, message: &ContactMessage) -> Result<serde_json::Value, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SubmissionError::Rejected {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(serde_json::json!({"id": "ok"}))
    }
}

/// Never answers.
struct StalledRelay;

#[async_trait]
impl MailRelay for StalledRelay {
    async fn submit(&self, _message: &ContactMessage) -> Result<serde_json::Value, SubmissionError> {
        std::future::pending().await
    }
}

async fn engine_with<R: MailRelay + 'static>(
    answer: Result<Vec<Project>, LoadError>,
    relay: R,
    dir: &TempDir,
) -> (SiteEngine<GatedSource, R, FilePreferenceStore>, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let source = GatedSource {
        gate: Arc::clone(&gate),
        answer: Mutex::new(Some(answer)),
    };
    let store = Arc::new(ProjectStore::new(source, LoadPolicy::default()));
    let preferences = FilePreferenceStore::new(dir.path().join("prefs.json"));
    let engine = SiteEngine::start(store, relay, preferences, Theme::Dark).await;
    (engine, gate)
}

async fn fill_form<R: MailRelay + 'static>(engine: &mut SiteEngine<GatedSource, R, FilePreferenceStore>) {
    engine.apply(Action::OpenContact).await.unwrap();
    engine.apply(Action::Edit(ContactField::Name, "Ada".into())).await.unwrap();
    engine.apply(Action::Edit(ContactField::Email, "ada@example.com".into())).await.unwrap();
    engine.apply(Action::Edit(ContactField::Message, "Hello".into())).await.unwrap();
}

#[tokio::test]
async fn test_page_shows_loading_until_projects_arrive() {
    let dir = TempDir::new().unwrap();
    let (mut engine, gate) = engine_with(Ok(projects(3)), RecordingRelay::default(), &dir).await;

    let load = engine.spawn_load();
    assert_eq!(engine.carousel_view(), CarouselView::Loading);

    // navigation while loading does nothing
    engine.apply(Action::NextProject).await.unwrap();
    assert_eq!(engine.state().carousel().position(), None);

    gate.notify_one();
    load.await.unwrap();
    engine.projects_published().await;
    engine.sync_projects();

    assert_eq!(engine.state().carousel().position(), Some(0));
    match engine.carousel_view() {
        CarouselView::Showing(card) => assert_eq!(card.title, "Project 0"),
        CarouselView::Loading => panic!("projects should be showing"),
    }

    engine.apply(Action::PreviousProject).await.unwrap();
    assert_eq!(engine.state().carousel().position(), Some(2));
}

#[tokio::test]
async fn test_failed_load_keeps_loading_state() {
    let dir = TempDir::new().unwrap();
    let failure = Err(LoadError::Status {
        status: 500,
        body: "boom".to_string(),
    });
    let (mut engine, gate) = engine_with(failure, RecordingRelay::default(), &dir).await;

    gate.notify_one();
    engine.spawn_load().await.unwrap();
    engine.sync_projects();

    assert_eq!(engine.carousel_view(), CarouselView::Loading);
    assert!(engine.collection().is_empty());
}

#[tokio::test]
async fn test_successful_submission() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;

    fill_form(&mut engine).await;
    engine.apply(Action::Submit).await.unwrap();
    assert!(!engine.state().contact_open());
    assert_eq!(engine.submissions_in_flight(), 1);

    assert_eq!(engine.settle().await, SiteEvent::SubmissionSent);
    assert_eq!(engine.submissions_in_flight(), 0);
    assert!(!engine.state().contact_open());
    assert!(engine.state().form().name.is_empty());
    assert!(engine.state().notice().unwrap().starts_with("Thanks"));
    let sent = engine.relay().sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "ada@example.com");
}

#[tokio::test]
async fn test_failed_submission_is_surfaced() {
    let dir = TempDir::new().unwrap();
    let relay = RecordingRelay {
        fail: true,
        ..RecordingRelay::default()
    };
    let (mut engine, _gate) = engine_with(Ok(vec![]), relay, &dir).await;

    fill_form(&mut engine).await;
    engine.apply(Action::Submit).await.unwrap();
    assert_eq!(engine.settle().await, SiteEvent::SubmissionFailed);

    assert!(engine.state().contact_open());
    assert_eq!(engine.state().form().message, "Hello");
    assert!(engine.state().notice().unwrap().contains("502"));
}

#[tokio::test]
async fn test_stalled_relay_leaves_page_responsive() {
    let dir = TempDir::new().unwrap();
    let (mut engine, gate) = engine_with(Ok(projects(2)), StalledRelay, &dir).await;
    let load = engine.spawn_load();

    fill_form(&mut engine).await;
    tokio::time::timeout(Duration::from_secs(2), engine.apply(Action::Submit))
        .await
        .expect("submit should return before the relay answers")
        .unwrap();
    assert!(!engine.state().contact_open());
    assert_eq!(engine.submissions_in_flight(), 1);

    gate.notify_one();
    load.await.unwrap();
    assert_eq!(engine.settle().await, SiteEvent::ProjectsPublished);

    engine.apply(Action::NextProject).await.unwrap();
    assert_eq!(engine.state().carousel().position(), Some(1));
    engine.apply(Action::ToggleTheme).await.unwrap();
    assert_eq!(engine.state().theme(), Theme::Light);
    assert_eq!(engine.submissions_in_flight(), 1);
}

#[tokio::test]
async fn test_incomplete_form_never_reaches_relay() {
    let dir = TempDir::new().unwrap();
    let (mut engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;

    engine.apply(Action::OpenContact).await.unwrap();
    engine.apply(Action::Edit(ContactField::Name, "Ada".into())).await.unwrap();

    let err = engine.apply(Action::Submit).await.unwrap_err();
    assert_eq!(err.user_friendly_message(), "Email is required");
    assert!(engine.state().contact_open());
    assert_eq!(engine.relay().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_theme_toggle_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let (mut engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;
        assert_eq!(engine.state().theme(), Theme::Dark);
        engine.apply(Action::ToggleTheme).await.unwrap();
        assert_eq!(engine.state().theme(), Theme::Light);
    }

    let (engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;
    assert_eq!(engine.state().theme(), Theme::Light);
}

#[tokio::test]
async fn test_previewed_theme_is_not_saved() {
    let dir = TempDir::new().unwrap();
    {
        let (mut engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;
        engine.preview_theme(Theme::Light);
        assert_eq!(engine.state().theme(), Theme::Light);
    }

    let (engine, _gate) = engine_with(Ok(vec![]), RecordingRelay::default(), &dir).await;
    assert_eq!(engine.state().theme(), Theme::Dark);
}
