//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::{AppState, ScheduledClose};
use crate::constants::TICK_INTERVAL;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// Delayed events the actor schedules for itself
#[derive(Debug)]
enum TimerEvent {
    CloseModal { generation: u64 },
}

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<TimerEvent>();
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        if let Some(cmd) = self.state.mount_initial() {
            self.send_command(cmd);
        }
        self.publish();

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    let Some(event) = event else { break };
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.send_command(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    if let Some(close) = self.state.handle_response(response) {
                        schedule_close(&timer_tx, close);
                    }
                    self.publish();
                }
                Some(timer) = timer_rx.recv() => {
                    match timer {
                        TimerEvent::CloseModal { generation } => {
                            if self.state.close_modal_after_delay(generation) {
                                self.publish();
                            }
                        }
                    }
                }
                _ = tick.tick() => {
                    if self.state.expire_notifications(chrono::Utc::now()) {
                        self.publish();
                    }
                }
            }
        }
    }

    fn publish(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    fn send_command(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor is gone, dropping command");
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let cmd = match event {
            // Navigation
            UiEvent::GoHome => self.state.navigate(crate::messages::Page::Home),
            UiEvent::GoPortfolio => self.state.navigate(crate::messages::Page::Portfolio),
            UiEvent::Back => self.state.go_back(),
            UiEvent::Reload => self.state.reload(),
            UiEvent::ScrollUp => {
                self.state.scroll_up();
                None
            }
            UiEvent::ScrollDown => {
                self.state.scroll_down();
                None
            }

            // Portfolio
            UiEvent::SelectNext => {
                self.state.select_next();
                None
            }
            UiEvent::SelectPrev => {
                self.state.select_prev();
                None
            }
            UiEvent::OpenSelected => self.state.open_selected(),

            // Home
            UiEvent::ToggleFaq(index) => {
                self.state.toggle_faq(index);
                None
            }
            UiEvent::OpenOfferForm => {
                self.state.open_offer_form(None);
                None
            }

            // Property detail
            UiEvent::ContactAboutProperty => {
                self.state.contact_about_property();
                None
            }

            // Form editing
            UiEvent::StartEditing => {
                self.state.start_editing();
                None
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                None
            }
            UiEvent::NextField => {
                self.state.next_field();
                None
            }
            UiEvent::PrevField => {
                self.state.prev_field();
                None
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                None
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                None
            }
            UiEvent::SubmitForm => self.state.submit_form(),
            UiEvent::CloseModal => {
                self.state.close_modal();
                None
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            self.send_command(cmd);
        }
        false
    }
}

fn schedule_close(timer_tx: &mpsc::UnboundedSender<TimerEvent>, close: ScheduledClose) {
    let timer_tx = timer_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(close.delay).await;
        let _ = timer_tx.send(TimerEvent::CloseModal {
            generation: close.generation,
        });
    });
}
