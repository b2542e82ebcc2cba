use crate::core::project_store::ProjectStore;
use crate::core::site::{ContactField, SiteState};
use crate::core::theme::ThemePreference;
use crate::core::view::CarouselView;
use crate::domain::model::{ContactMessage, ProjectCollection, Theme};
use crate::domain::ports::{MailRelay, PreferenceStore, ProjectSource};
use crate::utils::error::{Result, SubmissionError};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// One user action on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NextProject,
    PreviousProject,
    ToggleTheme,
    Scroll(u32),
    OpenContact,
    CloseContact,
    Edit(ContactField, String),
    Submit,
}

/// Background work that finished and has been applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteEvent {
    ProjectsPublished,
    SubmissionSent,
    SubmissionFailed,
}

struct SettledSubmission {
    draft: ContactMessage,
    outcome: std::result::Result<serde_json::Value, SubmissionError>,
}

/// The UI root: owns the page state and wires it to the store, the theme
/// preference, and the mail relay.
pub struct SiteEngine<S, R, P>
where
    S: ProjectSource + 'static,
    R: MailRelay + 'static,
    P: PreferenceStore,
{
    store: Arc<ProjectStore<S>>,
    projects: watch::Receiver<Arc<ProjectCollection>>,
    relay: Arc<R>,
    settled_tx: mpsc::UnboundedSender<SettledSubmission>,
    settled_rx: mpsc::UnboundedReceiver<SettledSubmission>,
    in_flight: usize,
    theme: ThemePreference<P>,
    state: SiteState,
}

impl<S, R, P> SiteEngine<S, R, P>
where
    S: ProjectSource + 'static,
    R: MailRelay + 'static,
    P: PreferenceStore,
{
    /// Build the engine with the theme read once from `preferences`,
    /// falling back to `system`.
    pub async fn start(store: Arc<ProjectStore<S>>, relay: R, preferences: P, system: Theme) -> Self {
        let theme = ThemePreference::new(preferences);
        let initial = theme.resolve(system).await;
        tracing::debug!("Starting with {} theme", initial);

        let projects = store.subscribe();
        let mut state = SiteState::new(initial);
        state.projects_changed(projects.borrow().len());
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        Self {
            store,
            projects,
            relay: Arc::new(relay),
            settled_tx,
            settled_rx,
            in_flight: 0,
            theme,
            state,
        }
    }

    /// Kick off the one-time load without blocking the page. Failures are
    /// logged by the store; the page keeps its loading state.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.load().await {
                tracing::debug!("Project section stays in loading state: {}", e);
            }
        })
    }

    /// Resolves when the store publishes a new collection. Pending forever
    /// once the store is gone.
    pub async fn projects_published(&mut self) {
        if self.projects.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Apply the latest published collection to the carousel.
    pub fn sync_projects(&mut self) {
        let len = self.projects.borrow_and_update().len();
        self.state.projects_changed(len);
    }

    /// Wait for the next piece of background work to land and apply it:
    /// a published collection or a relay answer.
    pub async fn settle(&mut self) -> SiteEvent {
        // the engine holds a sender and the store, so neither branch closes
        tokio::select! {
            Ok(()) = self.projects.changed() => {
                self.sync_projects();
                SiteEvent::ProjectsPublished
            }
            Some(settled) = self.settled_rx.recv() => self.record_submission(settled),
        }
    }

    fn record_submission(&mut self, settled: SettledSubmission) -> SiteEvent {
        self.in_flight = self.in_flight.saturating_sub(1);
        match settled.outcome {
            Ok(receipt) => {
                tracing::info!("📨 Contact message relayed");
                tracing::debug!("Relay receipt: {}", receipt);
                self.state.submission_succeeded();
                SiteEvent::SubmissionSent
            }
            Err(e) => {
                tracing::error!("❌ Contact submission failed: {}", e);
                self.state.submission_failed(settled.draft, &e);
                SiteEvent::SubmissionFailed
            }
        }
    }

    /// Messages handed to the relay that have not been answered yet.
    pub fn submissions_in_flight(&self) -> usize {
        self.in_flight
    }

    /// Show `theme` for this run without saving it.
    pub fn preview_theme(&mut self, theme: Theme) {
        if self.state.theme() != theme {
            self.state.toggle_theme();
        }
    }

    pub async fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::NextProject => self.state.next_project(),
            Action::PreviousProject => self.state.previous_project(),
            Action::Scroll(offset) => self.state.scroll_to(offset),
            Action::OpenContact => self.state.open_contact(),
            Action::CloseContact => self.state.close_contact(),
            Action::Edit(field, value) => self.state.edit_field(field, value),
            Action::ToggleTheme => {
                let theme = self.state.toggle_theme();
                if let Err(e) = self.theme.persist(theme).await {
                    tracing::warn!("Theme switched to {} but could not be saved: {}", theme, e);
                }
            }
            Action::Submit => {
                let draft = self.state.take_submission()?;
                let relay = Arc::clone(&self.relay);
                let settled = self.settled_tx.clone();
                self.in_flight += 1;

                // the page moves on; the answer comes back through `settle`
                tokio::spawn(async move {
                    let outcome = relay.submit(&draft).await;
                    if settled.send(SettledSubmission { draft, outcome }).is_err() {
                        tracing::debug!("Page closed before the relay answered");
                    }
                });
            }
        }
        Ok(())
    }

    pub fn relay(&self) -> &R {
        self.relay.as_ref()
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn collection(&self) -> Arc<ProjectCollection> {
        self.projects.borrow().clone()
    }

    pub fn carousel_view(&self) -> CarouselView {
        let collection = self.collection();
        CarouselView::build(self.state.carousel(), &collection)
    }
}
