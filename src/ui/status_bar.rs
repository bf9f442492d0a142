//! Bottom status bar: collection info, transient feedback, key hints.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

/// How long a transient message stays visible
const MESSAGE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: MessageKind,
    shown_at: Instant,
}

/// Single-line bar at the bottom of the screen
pub struct StatusBar {
    message: Option<StatusMessage>,
    collection_label: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: None,
            collection_label: String::new(),
        }
    }

    /// Left-hand label describing the backing collection
    pub fn set_collection_label(&mut self, label: impl Into<String>) {
        self.collection_label = label.into();
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.set_message(MessageKind::Info, text);
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.set_message(MessageKind::Success, text);
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.set_message(MessageKind::Error, text);
    }

    fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Drop the message once its TTL has passed. Called from the app's
    /// tick loop.
    pub fn tick(&mut self) {
        if let Some(message) = &self.message {
            if message.shown_at.elapsed() > MESSAGE_TTL {
                self.message = None;
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, editing: bool) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        let label = Paragraph::new(Span::styled(
            self.collection_label.clone(),
            Style::default().fg(theme.colors.text_muted),
        ));
        f.render_widget(label, chunks[0]);

        if let Some(message) = &self.message {
            let color = match message.kind {
                MessageKind::Info => theme.colors.text_secondary,
                MessageKind::Success => theme.colors.success,
                MessageKind::Error => theme.colors.error,
            };
            let center = Paragraph::new(Span::styled(
                message.text.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            f.render_widget(center, chunks[1]);
        }

        let hints = if editing {
            "Ctrl+S Save | Esc Cancel"
        } else {
            "q Quit | Tab Focus | t Theme"
        };
        let right = Paragraph::new(Line::from(vec![
            Span::styled(hints, Style::default().fg(theme.colors.text_muted)),
            Span::styled(
                format!("  {}", chrono::Local::now().format("%H:%M")),
                Style::default().fg(theme.colors.text_secondary),
            ),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(right, chunks[2]);
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
