use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{CardAction, FocusedPane, UI};

pub struct EventHandler {
    should_quit: bool,
}

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Continue,
    CardAction(CardAction),
}

impl EventHandler {
    pub fn new() -> Self {
        Self { should_quit: false }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn handle_key_event(&mut self, key: KeyEvent, ui: &mut UI) -> EventResult {
        // Edit mode traps every key for the card; nothing global runs until
        // the edit is committed or cancelled
        if ui.is_editing() {
            if let Some(action) = ui.handle_card_key(key) {
                return EventResult::CardAction(action);
            }
            return EventResult::Continue;
        }

        match key.code {
            // Global quit commands
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Navigation between panes
            KeyCode::Tab | KeyCode::BackTab => {
                ui.next_pane();
            }

            // Vim-style navigation in the list
            KeyCode::Char('j') | KeyCode::Down => {
                if let FocusedPane::RecordList = ui.focused_pane() {
                    ui.record_list_mut().select_next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let FocusedPane::RecordList = ui.focused_pane() {
                    ui.record_list_mut().select_previous();
                }
            }

            // Theme cycling
            KeyCode::Char('t') => {
                let name = ui.theme_manager_mut().cycle_next().name.clone();
                ui.status_bar_mut().set_info(format!("Theme: {}", name));
            }

            // Enter moves focus from the list onto the card; on the card it
            // is handled by the card itself (starts an edit)
            KeyCode::Enter => match ui.focused_pane() {
                FocusedPane::RecordList => {
                    ui.focus_card();
                }
                FocusedPane::Card => {
                    if let Some(action) = ui.handle_card_key(key) {
                        return EventResult::CardAction(action);
                    }
                }
            },

            // Everything else goes to the card when it has focus
            _ => {
                if let FocusedPane::Card = ui.focused_pane() {
                    if let Some(action) = ui.handle_card_key(key) {
                        return EventResult::CardAction(action);
                    }
                }
            }
        }

        EventResult::Continue
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
