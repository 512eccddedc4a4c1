//! App state - pure data structure with no I/O logic

use std::time::Duration;

use crate::app::form::{FormController, Hosting, CONTACT_FORM};
use crate::app::loader::{DetailLoader, ListingLoader};
use crate::app::navbar::NavbarObserver;
use crate::app::notifications::Notifications;
use crate::constants::{DEFAULT_API_URL, DEFAULT_NOTIFICATION_TTL_MS};
use crate::messages::render::FormView;
use crate::messages::ui_events::{InputMode, Page};
use crate::messages::RenderState;

/// Request to close the modal with the given generation after `delay`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledClose {
    pub generation: u64,
    pub delay: Duration,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Navigation
    pub page: Page,
    pub history: Vec<Page>,
    pub input_mode: InputMode,
    pub scroll: u16,
    pub navbar: NavbarObserver,

    // Request ids, shared by every loader and form
    pub next_request_id: u64,

    // Portfolio
    pub listing: ListingLoader,
    pub selected_property: usize,

    // Property detail
    pub detail: DetailLoader,

    // Home
    pub faq_open: Option<usize>,
    pub contact_form: FormController,

    // Offer form modal; the generation changes every time one opens
    pub modal: Option<FormController>,
    pub modal_generation: u64,
    /// Modal forms closed while their submission was still in flight
    pub detached_forms: Vec<FormController>,

    pub notifications: Notifications,
    pub show_help: bool,
    pub api_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS))
    }
}

impl AppState {
    pub fn new(api_url: &str, notification_ttl: Duration) -> Self {
        AppState {
            page: Page::Home,
            history: Vec::new(),
            input_mode: InputMode::Normal,
            scroll: 0,
            navbar: NavbarObserver::default(),
            next_request_id: 1,
            listing: ListingLoader::new(),
            selected_property: 0,
            detail: DetailLoader::new(),
            faq_open: None,
            contact_form: FormController::new(&CONTACT_FORM, Hosting::Inline),
            modal: None,
            modal_generation: 0,
            detached_forms: Vec::new(),
            notifications: Notifications::new(notification_ttl),
            show_help: false,
            api_url: api_url.to_string(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            page: self.page.clone(),
            can_go_back: !self.history.is_empty(),
            navbar_scrolled: self.navbar.is_scrolled(),
            scroll: self.scroll,
            listing: self.listing.state().clone(),
            selected_property: self.selected_property,
            detail: self.detail.state().clone(),
            faq_open: self.faq_open,
            contact_form: FormView::from_controller(
                &self.contact_form,
                self.modal.is_none() && self.input_mode == InputMode::Editing,
            ),
            modal: self
                .modal
                .as_ref()
                .map(|form| FormView::from_controller(form, true)),
            notifications: self.notifications.iter().cloned().collect(),
            input_mode: self.input_mode,
            show_help: self.show_help,
            api_url: self.api_url.clone(),
        }
    }
}
