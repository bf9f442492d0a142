//! Scrollable list of bookmarks in the collection.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use uuid::Uuid;

use crate::record::Record;
use crate::theme::Theme;

/// One display row, projected from a record
#[derive(Debug, Clone)]
struct RecordRow {
    id: Uuid,
    title: String,
    topic: String,
    host: String,
}

impl RecordRow {
    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            topic: record.topic.clone(),
            host: record.url_host().unwrap_or_default(),
        }
    }
}

/// List pane showing every bookmark, one per row.
///
/// Selection is tracked by position but survives re-population: when the
/// rows are rebuilt from the collection the previously selected record is
/// re-selected by id if it still exists.
pub struct RecordList {
    rows: Vec<RecordRow>,
    state: ListState,
}

impl RecordList {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            state: ListState::default(),
        }
    }

    /// Rebuild the rows from the collection's records
    pub fn set_records(&mut self, records: &[Record]) {
        let previous = self.selected_id();
        self.rows = records.iter().map(RecordRow::from_record).collect();

        if self.rows.is_empty() {
            self.state.select(None);
            return;
        }

        let index = previous
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
            .unwrap_or(0);
        self.state.select(Some(index.min(self.rows.len() - 1)));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Id of the currently selected record, if any
    pub fn selected_id(&self) -> Option<Uuid> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id)
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 >= self.rows.len() => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = match self.state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(previous));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let block = Block::default()
            .title(format!(" Bookmarks ({}) ", self.rows.len()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        if self.rows.is_empty() {
            let empty = List::new(vec![ListItem::new(Line::from(Span::styled(
                "No bookmarks yet",
                Style::default().fg(theme.colors.text_muted),
            )))])
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let mut spans = vec![Span::styled(
                    row.title.clone(),
                    Style::default().fg(theme.colors.text_primary),
                )];
                if !row.topic.is_empty() {
                    spans.push(Span::styled(
                        format!("  [{}]", row.topic),
                        Style::default().fg(theme.colors.success),
                    ));
                }
                if !row.host.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", row.host),
                        Style::default().fg(theme.colors.text_muted),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selection_style().add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Default for RecordList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("First", "https://one.example/", "a", ""),
            Record::new("Second", "https://two.example/", "b", ""),
            Record::new("Third", "https://three.example/", "c", ""),
        ]
    }

    #[test]
    fn selects_first_row_on_population() {
        let mut list = RecordList::new();
        let records = sample_records();
        list.set_records(&records);

        assert_eq!(list.len(), 3);
        assert_eq!(list.selected_index(), Some(0));
        assert_eq!(list.selected_id(), Some(records[0].id));
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut list = RecordList::new();
        list.set_records(&sample_records());

        list.select_previous();
        assert_eq!(list.selected_index(), Some(2));

        list.select_next();
        assert_eq!(list.selected_index(), Some(0));

        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn selection_survives_repopulation_by_id() {
        let mut list = RecordList::new();
        let mut records = sample_records();
        list.set_records(&records);

        list.select_next();
        let selected = list.selected_id();
        assert_eq!(selected, Some(records[1].id));

        // Reorder: the selected record moves to the front
        records.swap(0, 1);
        list.set_records(&records);
        assert_eq!(list.selected_id(), selected);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list = RecordList::new();
        list.set_records(&sample_records());
        list.set_records(&[]);

        assert!(list.is_empty());
        assert_eq!(list.selected_id(), None);

        list.select_next();
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn renders_without_panic() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut list = RecordList::new();
        list.set_records(&sample_records());

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = Rect::new(0, 0, 40, 12);
                list.render(f, area, &Theme::default(), true);
            })
            .unwrap();
    }
}
