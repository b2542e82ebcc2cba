use crate::core::carousel::CarouselController;
use crate::domain::model::{ContactMessage, Theme};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::validate_email;

/// Scroll offset past which the navigation bar switches to its compact look.
pub const SCROLL_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn is_blank(&self) -> bool {
        ContactField::ALL.into_iter().all(|f| self.field(f).trim().is_empty())
    }

    /// First field still blank, in form order.
    pub fn next_blank(&self) -> Option<ContactField> {
        ContactField::ALL
            .into_iter()
            .find(|f| self.field(*f).trim().is_empty())
    }

    fn to_message(&self) -> Result<ContactMessage> {
        if let Some(field) = self.next_blank() {
            return Err(SiteError::ValidationError {
                message: format!("{} is required", field.label()),
            });
        }
        validate_email("email", &self.email).map_err(|_| SiteError::ValidationError {
            message: format!("'{}' is not an email address", self.email.trim()),
        })?;

        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.clone(),
        })
    }
}

impl From<ContactMessage> for ContactForm {
    fn from(message: ContactMessage) -> Self {
        Self {
            name: message.name,
            email: message.email,
            message: message.message,
        }
    }
}

/// Everything the page remembers between events, owned by the UI root.
#[derive(Debug, Clone, Default)]
pub struct SiteState {
    scrolled: bool,
    theme: Theme,
    carousel: CarouselController,
    contact_open: bool,
    form: ContactForm,
    notice: Option<String>,
}

impl SiteState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn contact_open(&self) -> bool {
        self.contact_open
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.scrolled = offset > SCROLL_THRESHOLD;
    }

    pub fn next_project(&mut self) {
        self.carousel.next();
    }

    pub fn previous_project(&mut self) {
        self.carousel.previous();
    }

    pub fn projects_changed(&mut self, len: usize) {
        self.carousel.reconcile(len);
    }

    /// Flip the theme and return the new one for the caller to persist.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn open_contact(&mut self) {
        self.contact_open = true;
        self.notice = None;
    }

    pub fn close_contact(&mut self) {
        self.contact_open = false;
    }

    pub fn edit_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.form.name = value,
            ContactField::Email => self.form.email = value,
            ContactField::Message => self.form.message = value,
        }
    }

    /// Validate the form and hand back the message to send. On success the
    /// modal closes and the form is cleared; on a validation error nothing
    /// changes.
    pub fn take_submission(&mut self) -> Result<ContactMessage> {
        let message = self.form.to_message()?;
        self.contact_open = false;
        self.form = ContactForm::default();
        Ok(message)
    }

    pub fn submission_succeeded(&mut self) {
        self.notice = Some("Thanks! Your message is on its way.".to_string());
    }

    /// Put the draft back so the visitor does not have to retype it. A newer
    /// draft already in the form is left alone.
    pub fn submission_failed(&mut self, draft: ContactMessage, reason: impl std::fmt::Display) {
        if self.form.is_blank() {
            self.form = draft.into();
        }
        self.contact_open = true;
        self.notice = Some(format!("Your message could not be sent: {}", reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(state: &mut SiteState) {
        state.open_contact();
        state.edit_field(ContactField::Name, " Ada ");
        state.edit_field(ContactField::Email, "ada@example.com");
        state.edit_field(ContactField::Message, "Let's build something");
    }

    #[test]
    fn test_scroll_threshold() {
        let mut state = SiteState::default();
        state.scroll_to(50);
        assert!(!state.scrolled());
        state.scroll_to(51);
        assert!(state.scrolled());
        state.scroll_to(0);
        assert!(!state.scrolled());
    }

    #[test]
    fn test_toggle_theme_returns_new_theme() {
        let mut state = SiteState::new(Theme::Light);
        assert_eq!(state.toggle_theme(), Theme::Dark);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_navigation_before_load_is_noop() {
        let mut state = SiteState::default();
        state.next_project();
        state.previous_project();
        assert_eq!(state.carousel().position(), None);

        state.projects_changed(3);
        state.previous_project();
        assert_eq!(state.carousel().position(), Some(2));
    }

    #[test]
    fn test_submission_clears_and_closes() {
        let mut state = SiteState::default();
        filled(&mut state);

        let message = state.take_submission().unwrap();
        assert_eq!(message.name, "Ada");
        assert!(!state.contact_open());
        assert_eq!(state.form(), &ContactForm::default());
    }

    #[test]
    fn test_blank_field_blocks_submission() {
        let mut state = SiteState::default();
        filled(&mut state);
        state.edit_field(ContactField::Email, "   ");

        let err = state.take_submission().unwrap_err();
        assert_eq!(err.user_friendly_message(), "Email is required");
        assert!(state.contact_open());
        assert_eq!(state.form().name, " Ada ");
    }

    #[test]
    fn test_failed_submission_restores_draft() {
        let mut state = SiteState::default();
        filled(&mut state);
        let draft = state.take_submission().unwrap();

        state.submission_failed(draft, "relay timed out");
        assert!(state.contact_open());
        assert_eq!(state.form().email, "ada@example.com");
        assert!(state.notice().unwrap().contains("relay timed out"));

        state.close_contact();
        assert_eq!(state.form().email, "ada@example.com");
    }

    #[test]
    fn test_late_failure_keeps_newer_draft() {
        let mut state = SiteState::default();
        filled(&mut state);
        let draft = state.take_submission().unwrap();

        state.open_contact();
        state.edit_field(ContactField::Name, "Grace");
        state.submission_failed(draft, "bad gateway");

        assert!(state.contact_open());
        assert_eq!(state.form().name, "Grace");
        assert!(state.form().email.is_empty());
    }

    #[test]
    fn test_next_blank_follows_form_order() {
        let mut form = ContactForm::default();
        assert_eq!(form.next_blank(), Some(ContactField::Name));
        form.name = "Ada".to_string();
        form.message = "hi".to_string();
        assert_eq!(form.next_blank(), Some(ContactField::Email));
    }
}
