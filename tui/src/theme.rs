//! Color theme for the Lumen TUI.
//!
//! Tokyo Night Storm palette with semantic aliases; the dashboard only ever
//! styles through [`Palette`] fields, never raw colors.

use ratatui::style::{Color, Modifier, Style};

/// Tokyo Night Storm color constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(36, 40, 59); // bg
    pub const BG_PANEL: Color = Color::Rgb(41, 46, 66); // bg_highlight
    pub const BG_BORDER: Color = Color::Rgb(59, 66, 97); // terminal_black

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(192, 202, 245); // fg
    pub const TEXT_MUTED: Color = Color::Rgb(86, 95, 137); // comment

    // === Accents ===
    pub const BLUE: Color = Color::Rgb(122, 162, 247);
    pub const CYAN: Color = Color::Rgb(125, 207, 255);
    pub const GREEN: Color = Color::Rgb(158, 206, 106);
    pub const YELLOW: Color = Color::Rgb(224, 175, 104);
    pub const RED: Color = Color::Rgb(247, 118, 142);
    pub const MAGENTA: Color = Color::Rgb(187, 154, 247);

    // === Semantic Aliases ===
    pub const ACCENT: Color = CYAN;
    pub const SUCCESS: Color = GREEN;
    pub const WARNING: Color = YELLOW;
    pub const ERROR: Color = RED;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub map_land: Color,
    pub map_pin: Color,
}

impl Palette {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
            map_land: colors::BLUE,
            map_pin: colors::MAGENTA,
        }
    }

    #[must_use]
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(self.bg_border)
    }

    #[must_use]
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn info_line(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn warning_line(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn error_line(&self) -> Style {
        Style::default().fg(self.error)
    }
}

/// The palette in use. One theme for now; the indirection keeps call sites
/// ready for a high-contrast variant.
#[must_use]
pub const fn palette() -> Palette {
    Palette::standard()
}
