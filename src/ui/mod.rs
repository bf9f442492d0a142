pub mod card;
pub mod record_list;
pub mod status_bar;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use uuid::Uuid;

use crate::record::Record;
use crate::theme::ThemeManager;

use self::{record_list::RecordList, status_bar::StatusBar};

// Re-export card types for external use
pub use card::{CardAction, CardField, EditState, EditableCard, SaveCallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    RecordList,
    Card,
}

/// Top-level UI: bookmark list on the left, the selected bookmark's card
/// on the right, status bar along the bottom.
pub struct UI {
    focused_pane: FocusedPane,
    record_list: RecordList,
    card: Option<EditableCard>,
    status_bar: StatusBar,
    theme_manager: ThemeManager,
    list_width_percent: u16,
}

impl UI {
    pub fn new() -> Self {
        Self {
            focused_pane: FocusedPane::RecordList,
            record_list: RecordList::new(),
            card: None,
            status_bar: StatusBar::default(),
            theme_manager: ThemeManager::new(),
            list_width_percent: 38,
        }
    }

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn theme_manager_mut(&mut self) -> &mut ThemeManager {
        &mut self.theme_manager
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub fn status_bar_mut(&mut self) -> &mut StatusBar {
        &mut self.status_bar
    }

    pub fn record_list(&self) -> &RecordList {
        &self.record_list
    }

    pub fn record_list_mut(&mut self) -> &mut RecordList {
        &mut self.record_list
    }

    pub fn card(&self) -> Option<&EditableCard> {
        self.card.as_ref()
    }

    pub fn card_mut(&mut self) -> Option<&mut EditableCard> {
        self.card.as_mut()
    }

    /// Install the card for the currently selected record, replacing any
    /// previous one
    pub fn set_card(&mut self, card: EditableCard) {
        self.card = Some(card);
    }

    pub fn clear_card(&mut self) {
        self.card = None;
        if matches!(self.focused_pane, FocusedPane::Card) {
            self.focused_pane = FocusedPane::RecordList;
        }
    }

    pub fn set_records(&mut self, records: &[Record]) {
        self.record_list.set_records(records);
    }

    pub fn selected_record_id(&self) -> Option<Uuid> {
        self.record_list.selected_id()
    }

    pub fn set_list_width_percent(&mut self, percent: u16) {
        self.list_width_percent = percent.clamp(20, 60);
    }

    pub fn focused_pane(&self) -> FocusedPane {
        self.focused_pane
    }

    pub fn focus_card(&mut self) {
        if self.card.is_some() {
            self.focused_pane = FocusedPane::Card;
        }
    }

    pub fn focus_list(&mut self) {
        self.focused_pane = FocusedPane::RecordList;
    }

    /// True while the card is in edit mode; key handling and focus are
    /// trapped in the card for the duration
    pub fn is_editing(&self) -> bool {
        self.card.as_ref().map(|c| c.is_editing()).unwrap_or(false)
    }

    pub fn next_pane(&mut self) {
        if self.is_editing() {
            return; // No pane switching while the edit form is open
        }

        self.focused_pane = match self.focused_pane {
            FocusedPane::RecordList if self.card.is_some() => FocusedPane::Card,
            FocusedPane::RecordList => FocusedPane::RecordList,
            FocusedPane::Card => FocusedPane::RecordList,
        };
    }

    /// Forward a key to the card, if one is installed
    pub fn handle_card_key(&mut self, key: crossterm::event::KeyEvent) -> Option<CardAction> {
        self.card.as_mut().and_then(|card| card.handle_key(key))
    }

    pub fn tick(&mut self) {
        self.status_bar.tick();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(self.list_width_percent),
                Constraint::Percentage(100 - self.list_width_percent),
            ])
            .split(chunks[0]);

        self.render_record_list(frame, panes[0]);
        self.render_card(frame, panes[1]);
        self.render_status_bar(frame, chunks[1]);
    }

    fn render_record_list(&mut self, frame: &mut Frame, area: Rect) {
        let is_focused = matches!(self.focused_pane, FocusedPane::RecordList) && !self.is_editing();
        let theme = self.theme_manager.current_theme();
        self.record_list.render(frame, area, theme, is_focused);
    }

    fn render_card(&self, frame: &mut Frame, area: Rect) {
        let is_focused = matches!(self.focused_pane, FocusedPane::Card) || self.is_editing();
        let theme = self.theme_manager.current_theme();

        match &self.card {
            Some(card) => card.render(frame, area, theme, is_focused),
            None => {
                let placeholder = Paragraph::new("Select a bookmark")
                    .style(Style::default().fg(theme.colors.text_muted))
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .title(" Bookmark ")
                            .borders(Borders::ALL)
                            .border_style(theme.border_style(false)),
                    );
                frame.render_widget(placeholder, area);
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme_manager.current_theme();
        self.status_bar.render(frame, area, theme, self.is_editing());
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}
