use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Color palette shared by all widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub surface: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub selection_text: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Special purpose colors
    pub accent: Color,
    pub disabled: Color,
}

/// A named theme: palette plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ColorPalette,
}

impl Theme {
    /// Gruvbox dark theme with warm, earthy colors
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "Gruvbox Dark".to_string(),
            description: "Retro groove dark theme with warm, earthy colors".to_string(),
            colors: ColorPalette {
                background: Color::Rgb(40, 40, 40),
                foreground: Color::Rgb(235, 219, 178),
                surface: Color::Rgb(60, 56, 54),
                text_primary: Color::Rgb(235, 219, 178),
                text_secondary: Color::Rgb(213, 196, 161),
                text_muted: Color::Rgb(189, 174, 147),
                border: Color::Rgb(102, 92, 84),
                border_focused: Color::Rgb(131, 165, 152),
                selection: Color::Rgb(131, 165, 152),
                selection_text: Color::Rgb(40, 40, 40),
                success: Color::Rgb(152, 151, 26),
                warning: Color::Rgb(215, 153, 33),
                error: Color::Rgb(204, 36, 29),
                accent: Color::Rgb(250, 189, 47),
                disabled: Color::Rgb(146, 131, 116),
            },
        }
    }

    /// Clean, minimalistic dark theme for professional use
    pub fn professional_dark() -> Self {
        Self {
            name: "Professional Dark".to_string(),
            description: "Clean, minimalistic dark theme for professional use".to_string(),
            colors: ColorPalette {
                background: Color::Rgb(16, 16, 20),
                foreground: Color::Rgb(224, 224, 230),
                surface: Color::Rgb(24, 24, 28),
                text_primary: Color::Rgb(224, 224, 230),
                text_secondary: Color::Rgb(160, 160, 168),
                text_muted: Color::Rgb(112, 112, 120),
                border: Color::Rgb(64, 64, 72),
                border_focused: Color::Rgb(88, 166, 255),
                selection: Color::Rgb(88, 166, 255),
                selection_text: Color::Rgb(16, 16, 20),
                success: Color::Rgb(76, 175, 80),
                warning: Color::Rgb(255, 193, 7),
                error: Color::Rgb(244, 67, 54),
                accent: Color::Rgb(88, 166, 255),
                disabled: Color::Rgb(96, 96, 104),
            },
        }
    }

    /// High contrast theme for better accessibility
    pub fn high_contrast() -> Self {
        Self {
            name: "High Contrast".to_string(),
            description: "High contrast theme for better accessibility".to_string(),
            colors: ColorPalette {
                background: Color::Black,
                foreground: Color::White,
                surface: Color::Rgb(32, 32, 32),
                text_primary: Color::White,
                text_secondary: Color::Rgb(200, 200, 200),
                text_muted: Color::Rgb(160, 160, 160),
                border: Color::Rgb(128, 128, 128),
                border_focused: Color::Yellow,
                selection: Color::Yellow,
                selection_text: Color::Black,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                accent: Color::Yellow,
                disabled: Color::Rgb(80, 80, 80),
            },
        }
    }

    /// Border style for a pane, brighter when the pane has focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.border_focused)
        } else {
            Style::default().fg(self.colors.border)
        }
    }

    /// Highlight style for list selections
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.colors.selection)
            .fg(self.colors.selection_text)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

/// Theme manager for switching between the built-in themes
#[derive(Debug)]
pub struct ThemeManager {
    themes: Vec<Theme>,
    current: usize,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            themes: vec![
                Theme::gruvbox_dark(),
                Theme::professional_dark(),
                Theme::high_contrast(),
            ],
            current: 0,
        }
    }

    pub fn current_theme(&self) -> &Theme {
        &self.themes[self.current]
    }

    /// Switch to a theme by name (case-insensitive)
    pub fn set_theme(&mut self, name: &str) -> Result<(), String> {
        match self
            .themes
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.current = index;
                Ok(())
            }
            None => Err(format!(
                "Unknown theme: {}. Available themes: {}",
                name,
                self.available_themes().join(", ")
            )),
        }
    }

    /// Rotate to the next theme and return it
    pub fn cycle_next(&mut self) -> &Theme {
        self.current = (self.current + 1) % self.themes.len();
        &self.themes[self.current]
    }

    pub fn available_themes(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_gruvbox_dark() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Gruvbox Dark");
        assert!(theme.description.contains("Retro groove"));
    }

    #[test]
    fn manager_switches_by_name() {
        let mut manager = ThemeManager::new();
        assert_eq!(manager.current_theme().name, "Gruvbox Dark");

        assert!(manager.set_theme("Professional Dark").is_ok());
        assert_eq!(manager.current_theme().name, "Professional Dark");

        // Case-insensitive lookup
        assert!(manager.set_theme("high contrast").is_ok());
        assert_eq!(manager.current_theme().name, "High Contrast");

        assert!(manager.set_theme("Nonexistent Theme").is_err());
        assert_eq!(manager.current_theme().name, "High Contrast");
    }

    #[test]
    fn cycling_visits_every_theme() {
        let mut manager = ThemeManager::new();
        let count = manager.available_themes().len();

        let mut seen = vec![manager.current_theme().name.clone()];
        for _ in 1..count {
            seen.push(manager.cycle_next().name.clone());
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), count);

        // Full cycle comes back around
        manager.cycle_next();
        assert_eq!(manager.current_theme().name, "Gruvbox Dark");
    }
}
