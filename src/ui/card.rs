//! Inline-editable bookmark card widget.
//!
//! The card shows one record at a time. In view mode the fields are
//! read-only projections; Enter flips the card into an edit form bound to
//! the same fields. Committing (Ctrl+S) hands the record to the save
//! callback supplied at construction and returns to view mode without
//! waiting on or inspecting whatever the callback does with it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::record::Record;
use crate::theme::Theme;

/// Callback invoked with the current record when an edit is committed.
///
/// Owned and defined by the embedding controller; the card only stores and
/// fires it.
pub type SaveCallback = Box<dyn FnMut(&Record) + Send>;

/// View/edit mode of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing,
}

impl EditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing)
    }
}

/// Fields of the edit form, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Url,
    Topic,
    Description,
}

impl CardField {
    pub fn label(&self) -> &'static str {
        match self {
            CardField::Title => "Title",
            CardField::Url => "URL",
            CardField::Topic => "Topic",
            CardField::Description => "Description",
        }
    }

    fn next(self) -> Self {
        match self {
            CardField::Title => CardField::Url,
            CardField::Url => CardField::Topic,
            CardField::Topic => CardField::Description,
            CardField::Description => CardField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            CardField::Title => CardField::Description,
            CardField::Url => CardField::Title,
            CardField::Topic => CardField::Url,
            CardField::Description => CardField::Topic,
        }
    }
}

/// Actions bubbled up to the app after the card handled a key
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    /// The card switched into edit mode
    StartedEdit,
    /// An edit was committed and handed to the save callback
    Saved { title: String },
    /// Edit mode was left without saving
    Cancelled,
    /// Open the record's URL in the default browser
    OpenUrl(String),
    /// Copy the record's URL to the clipboard
    CopyUrl(String),
}

/// A single bookmark rendered as a card with an inline edit form.
///
/// The record here is a working copy; the canonical one lives in the
/// collection and is only updated through the save callback.
pub struct EditableCard {
    record: Record,
    state: EditState,
    on_save: SaveCallback,

    // Edit form state
    snapshot: Option<Record>,
    current_field: CardField,
    title_cursor: usize,
    url_cursor: usize,
    topic_cursor: usize,
    description_cursor: usize,
    is_modified: bool,
}

impl EditableCard {
    /// Create a card for `record`. `on_save` is stored and fired on every
    /// commit; the card starts in view mode.
    pub fn new(record: Record, on_save: SaveCallback) -> Self {
        Self {
            record,
            state: EditState::Viewing,
            on_save,
            snapshot: None,
            current_field: CardField::Title,
            title_cursor: 0,
            url_cursor: 0,
            topic_cursor: 0,
            description_cursor: 0,
            is_modified: false,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    /// Whether any field changed since edit mode was entered
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Form field currently receiving input
    pub fn current_field(&self) -> CardField {
        self.current_field
    }

    /// Switch from view mode into the edit form.
    ///
    /// Idempotent: calling this while already editing changes nothing, the
    /// snapshot and field focus from the first call stay in place.
    pub fn begin_edit(&mut self) {
        if self.state.is_editing() {
            tracing::debug!("begin_edit while already editing: ignored");
            return;
        }

        self.snapshot = Some(self.record.clone());
        self.current_field = CardField::Title;
        self.title_cursor = self.record.title.chars().count();
        self.url_cursor = self.record.url.chars().count();
        self.topic_cursor = self.record.topic.chars().count();
        self.description_cursor = self.record.description.chars().count();
        self.is_modified = false;
        self.state = EditState::Editing;
    }

    /// Commit the current edit: fire the save callback with the record as
    /// it stands now, then return to view mode.
    ///
    /// The callback's outcome is not observed here; whatever it does with
    /// the record (persist it, drop it, fail) is the controller's business.
    /// Calling this in view mode is a no-op and does not fire the callback.
    pub fn commit(&mut self) {
        if !self.state.is_editing() {
            tracing::debug!("commit while viewing: ignored");
            return;
        }

        (self.on_save)(&self.record);

        self.snapshot = None;
        self.is_modified = false;
        self.state = EditState::Viewing;
    }

    /// Leave edit mode without saving, restoring the record as it was when
    /// editing began
    pub fn cancel_edit(&mut self) {
        if !self.state.is_editing() {
            return;
        }

        if let Some(snapshot) = self.snapshot.take() {
            self.record = snapshot;
        }
        self.is_modified = false;
        self.state = EditState::Viewing;
    }

    /// Handle a key event, returning an action for the app to execute
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<CardAction> {
        match self.state {
            EditState::Viewing => self.handle_view_key(key),
            EditState::Editing => self.handle_edit_key(key),
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) -> Option<CardAction> {
        match key.code {
            KeyCode::Enter => {
                self.begin_edit();
                Some(CardAction::StartedEdit)
            }
            KeyCode::Char('o') => Some(CardAction::OpenUrl(self.record.url.clone())),
            KeyCode::Char('y') => Some(CardAction::CopyUrl(self.record.url.clone())),
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<CardAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.commit();
            return Some(CardAction::Saved {
                title: self.record.title.clone(),
            });
        }

        match key.code {
            KeyCode::Esc => {
                self.cancel_edit();
                Some(CardAction::Cancelled)
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.current_field = self.current_field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.current_field = self.current_field.previous();
                None
            }
            KeyCode::Left => {
                self.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.move_cursor_right();
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                None
            }
            _ => None,
        }
    }

    fn active_field_mut(&mut self) -> (&mut String, &mut usize) {
        match self.current_field {
            CardField::Title => (&mut self.record.title, &mut self.title_cursor),
            CardField::Url => (&mut self.record.url, &mut self.url_cursor),
            CardField::Topic => (&mut self.record.topic, &mut self.topic_cursor),
            CardField::Description => {
                (&mut self.record.description, &mut self.description_cursor)
            }
        }
    }

    fn field_value_and_cursor(&self, field: CardField) -> (&str, usize) {
        match field {
            CardField::Title => (&self.record.title, self.title_cursor),
            CardField::Url => (&self.record.url, self.url_cursor),
            CardField::Topic => (&self.record.topic, self.topic_cursor),
            CardField::Description => (&self.record.description, self.description_cursor),
        }
    }

    fn insert_char(&mut self, c: char) {
        let (value, cursor) = self.active_field_mut();
        let mut chars: Vec<char> = value.chars().collect();
        let pos = (*cursor).min(chars.len());
        chars.insert(pos, c);
        *value = chars.into_iter().collect();
        *cursor = pos + 1;
        self.is_modified = true;
    }

    fn delete_char(&mut self) {
        let (value, cursor) = self.active_field_mut();
        if *cursor == 0 || value.is_empty() {
            return;
        }
        let mut chars: Vec<char> = value.chars().collect();
        let pos = (*cursor).min(chars.len());
        chars.remove(pos - 1);
        *value = chars.into_iter().collect();
        *cursor = pos - 1;
        self.is_modified = true;
    }

    fn move_cursor_left(&mut self) {
        let (_, cursor) = self.active_field_mut();
        *cursor = cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        let len = {
            let (value, _) = self.field_value_and_cursor(self.current_field);
            value.chars().count()
        };
        let (_, cursor) = self.active_field_mut();
        *cursor = (*cursor + 1).min(len);
    }

    /// Render the card. Exactly one of the two surfaces is drawn,
    /// depending on the edit state.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        match self.state {
            EditState::Viewing => self.render_view(f, area, theme, focused),
            EditState::Editing => self.render_form(f, area, theme),
        }
    }

    fn render_view(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let block = Block::default()
            .title(" Bookmark ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // URL
                Constraint::Length(1), // Topic + added date
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Description
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            self.record.title.clone(),
            Style::default()
                .fg(theme.colors.text_primary)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(title, chunks[0]);

        let mut url_spans = vec![Span::styled(
            self.record.url.clone(),
            Style::default().fg(theme.colors.accent),
        )];
        if !self.record.has_valid_url() {
            url_spans.push(Span::styled(
                "  (invalid URL)",
                Style::default().fg(theme.colors.error),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(url_spans)), chunks[1]);

        let meta = Line::from(vec![
            Span::styled("Topic: ", Style::default().fg(theme.colors.text_muted)),
            Span::styled(
                if self.record.topic.is_empty() {
                    "-".to_string()
                } else {
                    self.record.topic.clone()
                },
                Style::default().fg(theme.colors.success),
            ),
            Span::styled(
                format!("   Added {}", self.record.added_at.format("%Y-%m-%d")),
                Style::default().fg(theme.colors.text_muted),
            ),
        ]);
        f.render_widget(Paragraph::new(meta), chunks[2]);

        let description = Paragraph::new(self.record.description.clone())
            .style(Style::default().fg(theme.colors.text_secondary))
            .wrap(Wrap { trim: true });
        f.render_widget(description, chunks[4]);

        let hints = Paragraph::new("Enter Edit | o Open | y Copy URL")
            .style(Style::default().fg(theme.colors.text_muted))
            .alignment(Alignment::Center);
        f.render_widget(hints, chunks[5]);
    }

    fn render_form(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Edit Bookmark ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // URL
                Constraint::Length(3), // Topic
                Constraint::Length(3), // Description
                Constraint::Min(0),    // Filler
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        self.render_input_field(f, chunks[0], CardField::Title, theme);
        self.render_input_field(f, chunks[1], CardField::Url, theme);
        self.render_input_field(f, chunks[2], CardField::Topic, theme);
        self.render_input_field(f, chunks[3], CardField::Description, theme);

        let modified_marker = if self.is_modified { " [modified]" } else { "" };
        let hints = Paragraph::new(format!(
            "Ctrl+S Save | Esc Cancel | Tab Next field{}",
            modified_marker
        ))
        .style(Style::default().fg(theme.colors.text_muted))
        .alignment(Alignment::Center);
        f.render_widget(hints, chunks[5]);
    }

    fn render_input_field(&self, f: &mut Frame, area: Rect, field: CardField, theme: &Theme) {
        let is_focused = self.current_field == field;
        let (value, cursor) = self.field_value_and_cursor(field);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(13), Constraint::Min(0)])
            .split(area);

        let label_style = if is_focused {
            Style::default()
                .fg(theme.colors.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.colors.text_muted)
        };
        let label = Paragraph::new(format!("{} ", field.label()))
            .style(label_style)
            .alignment(Alignment::Right);
        f.render_widget(label, chunks[0]);

        // Inline cursor rendered into the active field's text
        let display_value = if is_focused {
            let mut chars: Vec<char> = value.chars().collect();
            let pos = cursor.min(chars.len());
            chars.insert(pos, '|');
            chars.into_iter().collect()
        } else {
            value.to_string()
        };

        let mut input_style = Style::default().fg(theme.colors.text_primary);
        if field == CardField::Url && !self.record.has_valid_url() {
            input_style = Style::default().fg(theme.colors.warning);
        }

        let input = Paragraph::new(display_value).style(input_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(is_focused)),
        );
        f.render_widget(input, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::{Arc, Mutex};

    fn recording_callback() -> (SaveCallback, Arc<Mutex<Vec<Record>>>) {
        let saves = Arc::new(Mutex::new(Vec::new()));
        let sink = saves.clone();
        let callback: SaveCallback = Box::new(move |record: &Record| {
            sink.lock().unwrap().push(record.clone());
        });
        (callback, saves)
    }

    fn sample_card() -> (EditableCard, Arc<Mutex<Vec<Record>>>) {
        let record = Record::new(
            "A",
            "https://a.example/",
            "testing",
            "A bookmark used in tests",
        );
        let (callback, saves) = recording_callback();
        (EditableCard::new(record, callback), saves)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    #[test]
    fn starts_in_view_mode() {
        let (card, _) = sample_card();
        assert_eq!(card.state(), EditState::Viewing);
        assert!(!card.is_editing());
    }

    #[test]
    fn begin_edit_enters_edit_mode() {
        let (mut card, _) = sample_card();
        card.begin_edit();
        assert_eq!(card.state(), EditState::Editing);
        assert_eq!(card.current_field(), CardField::Title);
    }

    #[test]
    fn begin_edit_is_idempotent() {
        let (mut card, saves) = sample_card();

        card.begin_edit();
        card.handle_key(key(KeyCode::Char('X')));
        card.handle_key(key(KeyCode::Tab));

        // Second call must not re-snapshot or reset field focus
        card.begin_edit();
        assert_eq!(card.state(), EditState::Editing);
        assert_eq!(card.current_field(), CardField::Url);

        card.cancel_edit();
        assert_eq!(card.record().title, "A");
        assert!(saves.lock().unwrap().is_empty());
    }

    #[test]
    fn commit_while_viewing_is_a_noop() {
        let (mut card, saves) = sample_card();
        card.commit();
        assert_eq!(card.state(), EditState::Viewing);
        assert!(saves.lock().unwrap().is_empty());
    }

    #[test]
    fn commit_fires_callback_exactly_once_and_returns_to_view_mode() {
        let (mut card, saves) = sample_card();
        card.begin_edit();
        card.commit();

        let saved = saves.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "A");
        drop(saved);

        assert_eq!(card.state(), EditState::Viewing);

        // A second commit without a new edit must not fire again
        card.commit();
        assert_eq!(saves.lock().unwrap().len(), 1);
    }

    #[test]
    fn callback_sees_the_edited_record() {
        let (mut card, saves) = sample_card();

        card.handle_key(key(KeyCode::Enter));
        assert!(card.is_editing());

        // Replace the title "A" with "B" through the edit surface
        card.handle_key(key(KeyCode::Backspace));
        card.handle_key(key(KeyCode::Char('B')));
        assert_eq!(card.record().title, "B");

        let action = card.handle_key(ctrl_s());
        assert_eq!(
            action,
            Some(CardAction::Saved {
                title: "B".to_string()
            })
        );

        let saved = saves.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "B");
        drop(saved);

        assert_eq!(card.state(), EditState::Viewing);
    }

    #[test]
    fn esc_cancels_and_restores_the_snapshot() {
        let (mut card, saves) = sample_card();

        card.begin_edit();
        card.handle_key(key(KeyCode::Char('!')));
        assert!(card.is_modified());
        assert_ne!(card.record().title, "A");

        let action = card.handle_key(key(KeyCode::Esc));
        assert_eq!(action, Some(CardAction::Cancelled));
        assert_eq!(card.record().title, "A");
        assert_eq!(card.state(), EditState::Viewing);
        assert!(!card.is_modified());
        assert!(saves.lock().unwrap().is_empty());
    }

    #[test]
    fn view_mode_keys_produce_url_actions() {
        let (mut card, _) = sample_card();

        let open = card.handle_key(key(KeyCode::Char('o')));
        assert_eq!(open, Some(CardAction::OpenUrl("https://a.example/".to_string())));

        let copy = card.handle_key(key(KeyCode::Char('y')));
        assert_eq!(copy, Some(CardAction::CopyUrl("https://a.example/".to_string())));

        // Neither leaves view mode
        assert_eq!(card.state(), EditState::Viewing);
    }

    #[test]
    fn enter_begins_editing_from_view_mode() {
        let (mut card, _) = sample_card();
        let action = card.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(CardAction::StartedEdit));
        assert!(card.is_editing());
    }

    #[test]
    fn tab_cycles_through_all_fields() {
        let (mut card, _) = sample_card();
        card.begin_edit();

        assert_eq!(card.current_field(), CardField::Title);
        card.handle_key(key(KeyCode::Tab));
        assert_eq!(card.current_field(), CardField::Url);
        card.handle_key(key(KeyCode::Tab));
        assert_eq!(card.current_field(), CardField::Topic);
        card.handle_key(key(KeyCode::Tab));
        assert_eq!(card.current_field(), CardField::Description);
        card.handle_key(key(KeyCode::Tab));
        assert_eq!(card.current_field(), CardField::Title);

        card.handle_key(key(KeyCode::BackTab));
        assert_eq!(card.current_field(), CardField::Description);
    }

    #[test]
    fn cursor_edits_in_the_middle_of_a_field() {
        let record = Record::new("AB", "https://ab.example/", "t", "");
        let (callback, _) = recording_callback();
        let mut card = EditableCard::new(record, callback);

        card.begin_edit();
        // Cursor starts at the end of the title ("AB|")
        card.handle_key(key(KeyCode::Left));
        card.handle_key(key(KeyCode::Char('X')));
        assert_eq!(card.record().title, "AXB");

        card.handle_key(key(KeyCode::Backspace));
        assert_eq!(card.record().title, "AB");
    }

    #[test]
    fn ctrl_chords_do_not_type_into_fields() {
        let (mut card, saves) = sample_card();
        card.begin_edit();

        card.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        card.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(card.record().title, "A");
        assert!(!card.is_modified());
        assert!(card.is_editing());

        // Ctrl+S still commits
        card.handle_key(ctrl_s());
        assert_eq!(saves.lock().unwrap().len(), 1);
    }

    #[test]
    fn render_draws_only_the_active_surface() {
        let (mut card, _) = sample_card();
        let theme = Theme::default();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = Rect::new(0, 0, 80, 24);
                card.render(f, area, &theme, true);
            })
            .unwrap();

        // View mode: the read-only card and its hints, none of the form chrome
        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("Enter Edit | o Open | y Copy URL"));
        assert!(!content.contains(" Edit Bookmark "));
        assert!(!content.contains("Ctrl+S Save"));

        card.begin_edit();
        terminal
            .draw(|f| {
                let area = Rect::new(0, 0, 80, 24);
                card.render(f, area, &theme, true);
            })
            .unwrap();

        // Edit mode: the form replaces the view card wholesale
        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains(" Edit Bookmark "));
        assert!(content.contains("Ctrl+S Save"));
        assert!(!content.contains("Enter Edit | o Open"));
    }

    #[test]
    fn modified_flag_tracks_edits() {
        let (mut card, _) = sample_card();
        card.begin_edit();
        assert!(!card.is_modified());

        card.handle_key(key(KeyCode::Char('x')));
        assert!(card.is_modified());

        card.handle_key(ctrl_s());
        assert!(!card.is_modified());
    }
}
