use crate::tui::terminal_compat::ColorMode;
use ratatui::style::{Color, Modifier, Style};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
pub enum ThemeName {
    #[default]
    OceanDark,
    Nord,
    Gruvbox,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,
    pub background: Color,
    pub foreground: Color,
    /// Heading colors for levels 1..=5; deeper levels reuse the last one
    pub headings: [Color; 5],
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Row and content line of the heading last navigated to
    pub anchor_bg: Color,
    pub anchor_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub title_bar_fg: Color,
    pub scrollbar_fg: Color,
    pub search_fg: Color,
    pub muted_fg: Color,
    pub modal_bg: Color,
    pub modal_border: Color,
    pub modal_title: Color,
    pub modal_key_fg: Color,
    pub modal_description: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::OceanDark => Self::ocean_dark(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Gruvbox => Self::gruvbox(),
        }
    }

    fn ocean_dark() -> Self {
        Self {
            name: ThemeName::OceanDark,
            background: Color::Rgb(27, 43, 52),
            foreground: Color::Rgb(192, 197, 206),
            headings: [
                Color::Rgb(102, 153, 204),
                Color::Rgb(95, 179, 179),
                Color::Rgb(153, 199, 148),
                Color::Rgb(250, 200, 99),
                Color::Rgb(197, 148, 197),
            ],
            border_focused: Color::Rgb(95, 179, 179),
            border_unfocused: Color::Rgb(79, 91, 102),
            selection_bg: Color::Rgb(52, 61, 70),
            selection_fg: Color::Rgb(216, 222, 233),
            anchor_bg: Color::Rgb(64, 84, 48),
            anchor_fg: Color::Rgb(236, 239, 244),
            status_bar_bg: Color::Rgb(52, 61, 70),
            status_bar_fg: Color::Rgb(192, 197, 206),
            title_bar_fg: Color::Rgb(102, 153, 204),
            scrollbar_fg: Color::Rgb(79, 91, 102),
            search_fg: Color::Rgb(250, 200, 99),
            muted_fg: Color::Rgb(101, 115, 126),
            modal_bg: Color::Rgb(30, 30, 50),
            modal_border: Color::Rgb(95, 179, 179),
            modal_title: Color::Rgb(102, 153, 204),
            modal_key_fg: Color::Rgb(250, 200, 99),
            modal_description: Color::Rgb(167, 173, 186),
        }
    }

    fn nord() -> Self {
        Self {
            name: ThemeName::Nord,
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            headings: [
                Color::Rgb(136, 192, 208),
                Color::Rgb(129, 161, 193),
                Color::Rgb(163, 190, 140),
                Color::Rgb(235, 203, 139),
                Color::Rgb(180, 142, 173),
            ],
            border_focused: Color::Rgb(136, 192, 208),
            border_unfocused: Color::Rgb(76, 86, 106),
            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(236, 239, 244),
            anchor_bg: Color::Rgb(94, 129, 172),
            anchor_fg: Color::Rgb(236, 239, 244),
            status_bar_bg: Color::Rgb(59, 66, 82),
            status_bar_fg: Color::Rgb(216, 222, 233),
            title_bar_fg: Color::Rgb(136, 192, 208),
            scrollbar_fg: Color::Rgb(76, 86, 106),
            search_fg: Color::Rgb(235, 203, 139),
            muted_fg: Color::Rgb(97, 110, 136),
            modal_bg: Color::Rgb(59, 66, 82),
            modal_border: Color::Rgb(136, 192, 208),
            modal_title: Color::Rgb(143, 188, 187),
            modal_key_fg: Color::Rgb(235, 203, 139),
            modal_description: Color::Rgb(229, 233, 240),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: ThemeName::Gruvbox,
            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            headings: [
                Color::Rgb(251, 73, 52),
                Color::Rgb(250, 189, 47),
                Color::Rgb(184, 187, 38),
                Color::Rgb(131, 165, 152),
                Color::Rgb(211, 134, 155),
            ],
            border_focused: Color::Rgb(250, 189, 47),
            border_unfocused: Color::Rgb(102, 92, 84),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(251, 241, 199),
            anchor_bg: Color::Rgb(121, 116, 14),
            anchor_fg: Color::Rgb(251, 241, 199),
            status_bar_bg: Color::Rgb(60, 56, 54),
            status_bar_fg: Color::Rgb(235, 219, 178),
            title_bar_fg: Color::Rgb(254, 128, 25),
            scrollbar_fg: Color::Rgb(102, 92, 84),
            search_fg: Color::Rgb(250, 189, 47),
            muted_fg: Color::Rgb(146, 131, 116),
            modal_bg: Color::Rgb(50, 48, 47),
            modal_border: Color::Rgb(250, 189, 47),
            modal_title: Color::Rgb(254, 128, 25),
            modal_key_fg: Color::Rgb(142, 192, 124),
            modal_description: Color::Rgb(213, 196, 161),
        }
    }

    /// Downgrade every RGB color to the 256-color palette when required.
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        if mode == ColorMode::Rgb {
            return self;
        }

        for color in self.colors_mut() {
            *color = to_indexed(*color);
        }
        self
    }

    fn colors_mut(&mut self) -> impl Iterator<Item = &mut Color> {
        let Self {
            name: _,
            background,
            foreground,
            headings,
            border_focused,
            border_unfocused,
            selection_bg,
            selection_fg,
            anchor_bg,
            anchor_fg,
            status_bar_bg,
            status_bar_fg,
            title_bar_fg,
            scrollbar_fg,
            search_fg,
            muted_fg,
            modal_bg,
            modal_border,
            modal_title,
            modal_key_fg,
            modal_description,
        } = self;

        headings.iter_mut().chain([
            background,
            foreground,
            border_focused,
            border_unfocused,
            selection_bg,
            selection_fg,
            anchor_bg,
            anchor_fg,
            status_bar_bg,
            status_bar_fg,
            title_bar_fg,
            scrollbar_fg,
            search_fg,
            muted_fg,
            modal_bg,
            modal_border,
            modal_title,
            modal_key_fg,
            modal_description,
        ])
    }

    pub fn heading_color(&self, level: usize) -> Color {
        let index = level.clamp(1, self.headings.len()) - 1;
        self.headings[index]
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_unfocused)
        }
    }

    pub fn content_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// The one heading marked as the current navigation target.
    pub fn anchor_style(&self) -> Style {
        Style::default()
            .bg(self.anchor_bg)
            .fg(self.anchor_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }

    pub fn modal_bg(&self) -> Color {
        self.modal_bg
    }

    pub fn modal_border(&self) -> Color {
        self.modal_border
    }

    pub fn modal_title(&self) -> Color {
        self.modal_title
    }

    pub fn modal_key_fg(&self) -> Color {
        self.modal_key_fg
    }

    pub fn modal_description(&self) -> Color {
        self.modal_description
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(ThemeName::default())
    }
}

/// Nearest xterm-256 entry for an RGB color; other colors pass through.
fn to_indexed(color: Color) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };

    // Grays map better onto the 24-step grayscale ramp
    if r == g && g == b {
        return match r {
            0..=7 => Color::Indexed(16),
            249..=255 => Color::Indexed(231),
            _ => Color::Indexed(232 + ((r - 8) / 10).min(23)),
        };
    }

    let cube = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    Color::Indexed(16 + 36 * cube(r) + 6 * cube(g) + cube(b))
}
