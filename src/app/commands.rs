//! Command handlers - business logic for processing UI events and responses

use chrono::{DateTime, Utc};

use crate::app::form::{FormCompletion, FormController, Hosting, SubmitAttempt, SubmitOutcome, OFFER_FORM};
use crate::app::state::{AppState, ScheduledClose};
use crate::constants::MAX_PAGE_HISTORY;
use crate::content::FAQS;
use crate::error::ApiError;
use crate::messages::ui_events::{InputMode, Page};
use crate::messages::{NetworkCommand, NetworkResponse};

const MAX_SCROLL: u16 = 200;

impl AppState {
    // ========================
    // Navigation
    // ========================

    /// Mount the first page. Call once before processing events.
    pub fn mount_initial(&mut self) -> Option<NetworkCommand> {
        let page = self.page.clone();
        self.mount(page)
    }

    /// Go to `page`, remembering the current one for `go_back`
    pub fn navigate(&mut self, page: Page) -> Option<NetworkCommand> {
        if page != self.page {
            if self.history.len() >= MAX_PAGE_HISTORY {
                self.history.remove(0);
            }
            self.history.push(self.page.clone());
        }
        self.mount(page)
    }

    pub fn go_back(&mut self) -> Option<NetworkCommand> {
        let page = self.history.pop()?;
        self.mount(page)
    }

    /// Remount the current page, which restarts its loader
    pub fn reload(&mut self) -> Option<NetworkCommand> {
        let page = self.page.clone();
        self.mount(page)
    }

    fn mount(&mut self, page: Page) -> Option<NetworkCommand> {
        self.navbar.unmount();
        tracing::info!(from = self.page.title(), to = page.title(), "Navigating");

        self.page = page;
        self.scroll = 0;
        self.input_mode = InputMode::Normal;
        self.navbar.mount();

        match self.page.clone() {
            Page::Home => None,
            Page::Portfolio => {
                self.selected_property = 0;
                let id = self.next_id();
                Some(self.listing.mount(id))
            }
            Page::PropertyDetail(property_id) => {
                let id = self.next_id();
                Some(self.detail.load(&property_id, id))
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
        self.navbar.on_scroll(self.scroll);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(MAX_SCROLL);
        self.navbar.on_scroll(self.scroll);
    }

    // ========================
    // Portfolio
    // ========================

    pub fn select_next(&mut self) {
        let len = self.listing.len();
        if len > 0 {
            self.selected_property = (self.selected_property + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.listing.len();
        if len > 0 {
            self.selected_property = self.selected_property.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn open_selected(&mut self) -> Option<NetworkCommand> {
        let property_id = self.listing.property_at(self.selected_property)?.id.clone();
        self.navigate(Page::PropertyDetail(property_id))
    }

    // ========================
    // Home
    // ========================

    /// Open FAQ `index`, or close it if it is already open
    pub fn toggle_faq(&mut self, index: usize) {
        if index >= FAQS.len() {
            return;
        }
        self.faq_open = if self.faq_open == Some(index) { None } else { Some(index) };
    }

    // ========================
    // Offer modal
    // ========================

    pub fn open_offer_form(&mut self, address: Option<&str>) {
        if self.modal.is_some() {
            return;
        }
        self.modal_generation += 1;
        let mut form = FormController::new(&OFFER_FORM, Hosting::Modal);
        if let Some(address) = address {
            form.set_text("address", address);
        }
        self.modal = Some(form);
        self.input_mode = InputMode::Editing;
    }

    /// "Contact us about this property" on the detail page
    pub fn contact_about_property(&mut self) {
        let address = self.detail.property().map(|p| p.address.clone());
        self.open_offer_form(address.as_deref());
    }

    pub fn close_modal(&mut self) {
        if let Some(form) = self.modal.take() {
            if form.is_submitting() {
                // Keep it so the result still produces a notification
                self.detached_forms.push(form);
            }
        }
        self.input_mode = InputMode::Normal;
    }

    /// Close the modal from a delayed timer, unless it was replaced meanwhile
    pub fn close_modal_after_delay(&mut self, generation: u64) -> bool {
        if self.modal.is_some() && self.modal_generation == generation {
            self.close_modal();
            true
        } else {
            false
        }
    }

    // ========================
    // Form editing
    // ========================

    /// The form receiving keystrokes: the modal if open, else the home form
    fn active_form_mut(&mut self) -> Option<&mut FormController> {
        if self.modal.is_some() {
            return self.modal.as_mut();
        }
        match self.page {
            Page::Home => Some(&mut self.contact_form),
            _ => None,
        }
    }

    pub fn start_editing(&mut self) {
        if self.active_form_mut().is_some() {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focus_next();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focus_prev();
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.input_mode != InputMode::Editing {
            return;
        }
        if let Some(form) = self.active_form_mut() {
            form.type_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if self.input_mode != InputMode::Editing {
            return;
        }
        if let Some(form) = self.active_form_mut() {
            form.backspace();
        }
    }

    /// Submit the active form; returns the command to send if it validated
    pub fn submit_form(&mut self) -> Option<NetworkCommand> {
        let id = self.next_id();
        let attempt = self.active_form_mut()?.submit(id);
        match attempt {
            SubmitAttempt::Dispatched(cmd) => Some(cmd),
            SubmitAttempt::Invalid(message) => {
                self.notifications.error(message);
                None
            }
            SubmitAttempt::Busy => None,
        }
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<ScheduledClose> {
        match response {
            NetworkResponse::Properties { id, result } => {
                if self.listing.apply(id, result) {
                    self.selected_property = self
                        .selected_property
                        .min(self.listing.len().saturating_sub(1));
                }
                None
            }
            NetworkResponse::Property { id, property_id, result } => {
                self.detail.apply(id, &property_id, result);
                None
            }
            NetworkResponse::ContactSubmitted { id, result } => self.finish_submission(id, result),
        }
    }

    fn finish_submission(&mut self, id: u64, result: Result<(), ApiError>) -> Option<ScheduledClose> {
        if self.contact_form.pending_request() == Some(id) {
            let completion = self.contact_form.finish(id, result)?;
            self.notify(&completion);
            return None;
        }

        if let Some(form) = self.modal.as_mut().filter(|f| f.pending_request() == Some(id)) {
            let completion = form.finish(id, result)?;
            self.notify(&completion);
            return completion.close_after.map(|delay| ScheduledClose {
                generation: self.modal_generation,
                delay,
            });
        }

        if let Some(pos) = self
            .detached_forms
            .iter()
            .position(|f| f.pending_request() == Some(id))
        {
            let mut form = self.detached_forms.remove(pos);
            if let Some(completion) = form.finish(id, result) {
                self.notify(&completion);
            }
            return None;
        }

        tracing::warn!(id, "Submission result with no matching form");
        None
    }

    fn notify(&mut self, completion: &FormCompletion) {
        match completion.outcome {
            SubmitOutcome::Succeeded => self.notifications.success(completion.message.clone()),
            SubmitOutcome::Failed => self.notifications.error(completion.message.clone()),
        }
    }

    /// Drop expired toasts; true if anything changed
    pub fn expire_notifications(&mut self, now: DateTime<Utc>) -> bool {
        self.notifications.expire(now)
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::loader::{DetailState, ListingState};
    use crate::app::notifications::NotificationKind;
    use crate::constants::MODAL_CLOSE_DELAY;
    use crate::models::{ContactSubmission, Property};

    fn property(id: &str, title: &str) -> Property {
        Property {
            id: id.into(),
            title: title.into(),
            address: format!("{} Main St", id),
            price: String::from("$450,000"),
            bedrooms: 2,
            bathrooms: 2,
            sqft: 1200,
            image: String::new(),
            description: String::new(),
            status: String::from("Available"),
            created_at: None,
        }
    }

    fn type_into(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    #[test]
    fn test_home_mount_fetches_nothing() {
        let mut state = AppState::default();
        assert!(state.mount_initial().is_none());
        assert!(state.navbar.is_subscribed());
    }

    #[test]
    fn test_each_portfolio_visit_fetches() {
        let mut state = AppState::default();
        state.mount_initial();
        let first = state.navigate(Page::Portfolio);
        assert!(matches!(first, Some(NetworkCommand::ListProperties { .. })));
        state.navigate(Page::Home);
        let second = state.navigate(Page::Portfolio);
        assert!(matches!(second, Some(NetworkCommand::ListProperties { .. })));
        assert_ne!(first, second);
    }

    #[test]
    fn test_open_selected_navigates_to_detail() {
        let mut state = AppState::default();
        let Some(NetworkCommand::ListProperties { id }) = state.navigate(Page::Portfolio) else {
            panic!("expected list command");
        };
        state.handle_response(NetworkResponse::Properties {
            id,
            result: Ok(vec![property("a", "Loft"), property("b", "Villa")]),
        });
        state.select_next();
        let cmd = state.open_selected();
        assert!(matches!(cmd, Some(NetworkCommand::GetProperty { ref property_id, .. }) if property_id == "b"));
        assert_eq!(state.page, Page::PropertyDetail("b".into()));
        assert_eq!(state.detail.state(), &DetailState::Loading);

        // Back returns to the listing and reloads it
        assert!(matches!(state.go_back(), Some(NetworkCommand::ListProperties { .. })));
        assert_eq!(state.listing.state(), &ListingState::Loading);
    }

    #[test]
    fn test_rapid_detail_navigation_keeps_latest() {
        let mut state = AppState::default();
        let Some(NetworkCommand::GetProperty { id: first, .. }) =
            state.navigate(Page::PropertyDetail("1".into()))
        else {
            panic!("expected get command");
        };
        let Some(NetworkCommand::GetProperty { id: second, .. }) =
            state.navigate(Page::PropertyDetail("2".into()))
        else {
            panic!("expected get command");
        };

        state.handle_response(NetworkResponse::Property {
            id: second,
            property_id: "2".into(),
            result: Ok(property("2", "Second")),
        });
        state.handle_response(NetworkResponse::Property {
            id: first,
            property_id: "1".into(),
            result: Ok(property("1", "First")),
        });

        assert_eq!(state.detail.property().map(|p| p.title.as_str()), Some("Second"));
    }

    #[test]
    fn test_contact_form_round_trip() {
        let mut state = AppState::default();
        state.mount_initial();
        state.start_editing();
        type_into(&mut state, "A");
        state.next_field();
        type_into(&mut state, "a@b.com");
        state.next_field();
        type_into(&mut state, "555");
        state.next_field();
        type_into(&mut state, "hi");

        let cmd = state.submit_form();
        let Some(NetworkCommand::SubmitContact { id, payload }) = cmd else {
            panic!("expected submit command");
        };
        assert_eq!(
            payload,
            ContactSubmission {
                name: "A".into(),
                email: "a@b.com".into(),
                phone: "555".into(),
                message: "hi".into(),
            }
        );
        assert!(state.submit_form().is_none());

        let close = state.handle_response(NetworkResponse::ContactSubmitted { id, result: Ok(()) });
        assert!(close.is_none());
        assert_eq!(state.contact_form.fields().text("name"), "");
        let toast = state.notifications.latest().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
    }

    #[test]
    fn test_invalid_submit_raises_error_toast() {
        let mut state = AppState::default();
        state.mount_initial();
        assert!(state.submit_form().is_none());
        assert_eq!(
            state.notifications.latest().map(|n| n.message.as_str()),
            Some("Name is required")
        );
    }

    #[test]
    fn test_modal_success_schedules_close_for_current_generation() {
        let mut state = AppState::default();
        state.navigate(Page::PropertyDetail("9".into()));
        let id = state.detail.pending().unwrap();
        state.handle_response(NetworkResponse::Property {
            id,
            property_id: "9".into(),
            result: Ok(property("9", "Nine")),
        });

        state.contact_about_property();
        let modal = state.modal.as_mut().unwrap();
        assert_eq!(modal.fields().text("address"), "9 Main St");
        modal.set_text("name", "Dana");
        modal.set_text("email", "dana@example.com");
        modal.set_text("phone", "555");
        modal.set_checked("agreedToTerms", true);

        let Some(NetworkCommand::SubmitContact { id, .. }) = state.submit_form() else {
            panic!("expected submit command");
        };
        let close = state
            .handle_response(NetworkResponse::ContactSubmitted { id, result: Ok(()) })
            .unwrap();
        assert_eq!(close.delay, MODAL_CLOSE_DELAY);
        assert!(state.modal.is_some());

        assert!(!state.close_modal_after_delay(close.generation + 1));
        assert!(state.close_modal_after_delay(close.generation));
        assert!(state.modal.is_none());
    }

    #[test]
    fn test_stale_close_does_not_close_new_modal() {
        let mut state = AppState::default();
        state.open_offer_form(None);
        let old_generation = state.modal_generation;
        state.close_modal();
        state.open_offer_form(None);
        assert!(!state.close_modal_after_delay(old_generation));
        assert!(state.modal.is_some());
    }

    #[test]
    fn test_modal_closed_mid_submit_still_notifies() {
        let mut state = AppState::default();
        state.open_offer_form(Some("1 Elm"));
        let modal = state.modal.as_mut().unwrap();
        modal.set_text("name", "Lee");
        modal.set_text("email", "lee@example.com");
        modal.set_text("phone", "555");
        modal.set_checked("agreedToTerms", true);
        let Some(NetworkCommand::SubmitContact { id, .. }) = state.submit_form() else {
            panic!("expected submit command");
        };
        state.close_modal();
        assert_eq!(state.detached_forms.len(), 1);

        let close = state.handle_response(NetworkResponse::ContactSubmitted {
            id,
            result: Err(ApiError::Network("HTTP 500".into())),
        });
        assert!(close.is_none());
        assert!(state.detached_forms.is_empty());
        assert_eq!(
            state.notifications.latest().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn test_history_is_bounded() {
        let mut state = AppState::default();
        state.mount_initial();
        for _ in 0..MAX_PAGE_HISTORY {
            state.navigate(Page::Portfolio);
            state.navigate(Page::Home);
        }
        assert_eq!(state.history.len(), MAX_PAGE_HISTORY);

        // Newest entries survive
        state.go_back();
        assert_eq!(state.page, Page::Portfolio);
        state.go_back();
        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn test_faq_toggle() {
        let mut state = AppState::default();
        state.toggle_faq(1);
        assert_eq!(state.faq_open, Some(1));
        state.toggle_faq(3);
        assert_eq!(state.faq_open, Some(3));
        state.toggle_faq(3);
        assert_eq!(state.faq_open, None);
        state.toggle_faq(FAQS.len());
        assert_eq!(state.faq_open, None);
    }

    #[test]
    fn test_scroll_drives_navbar() {
        let mut state = AppState::default();
        state.mount_initial();
        for _ in 0..5 {
            state.scroll_down();
        }
        assert!(state.navbar.is_scrolled());
        state.navigate(Page::Portfolio);
        assert_eq!(state.scroll, 0);
        assert!(!state.navbar.is_scrolled());
    }
}
