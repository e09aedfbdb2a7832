use ratatui::style::Color;

pub const THEME_NAMES: [&str; 5] = ["dark", "light", "nord", "catppuccin", "colorblind"];

pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub highlight: Color,
    pub axis: Color,
    pub title: Color,
    pub muted: Color,
    pub tooltip_bg: Color,
    pub tooltip_fg: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            axis: Color::Gray,
            title: Color::White,
            muted: Color::DarkGray,
            tooltip_bg: Color::Rgb(40, 40, 40),
            tooltip_fg: Color::White,
            error: Color::Red,
        }
    }
    pub fn light() -> Self {
        Self {
            name: "light",
            bg: Color::White,
            fg: Color::Black,
            highlight: Color::Blue,
            axis: Color::DarkGray,
            title: Color::Black,
            muted: Color::Gray,
            tooltip_bg: Color::Rgb(245, 245, 220),
            tooltip_fg: Color::Black,
            error: Color::Red,
        }
    }
    pub fn nord() -> Self {
        Self {
            name: "nord",
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            highlight: Color::Rgb(136, 192, 208),
            axis: Color::Rgb(129, 161, 193),
            title: Color::Rgb(236, 239, 244),
            muted: Color::Rgb(76, 86, 106),
            tooltip_bg: Color::Rgb(59, 66, 82),
            tooltip_fg: Color::Rgb(229, 233, 240),
            error: Color::Rgb(191, 97, 106),
        }
    }
    pub fn catppuccin() -> Self {
        Self {
            name: "catppuccin",
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            highlight: Color::Rgb(137, 180, 250),
            axis: Color::Rgb(166, 173, 200),
            title: Color::Rgb(245, 224, 220),
            muted: Color::Rgb(88, 91, 112),
            tooltip_bg: Color::Rgb(49, 50, 68),
            tooltip_fg: Color::Rgb(205, 214, 244),
            error: Color::Rgb(243, 139, 168),
        }
    }
    pub fn colorblind() -> Self {
        Self {
            name: "colorblind",
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Rgb(0x00, 0x80, 0xFF), // blue instead of yellow
            axis: Color::Gray,
            title: Color::White,
            muted: Color::DarkGray,
            tooltip_bg: Color::Rgb(30, 30, 30),
            tooltip_fg: Color::White,
            error: Color::Rgb(0xFF, 0x8C, 0x00), // orange instead of red
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "nord" => Self::nord(),
            "catppuccin" => Self::catppuccin(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }
    pub fn next(&self) -> Self {
        let i = THEME_NAMES.iter().position(|n| *n == self.name).unwrap_or(0);
        Self::from_name(THEME_NAMES[(i + 1) % THEME_NAMES.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn unknown_name_is_dark() { assert_eq!(Theme::from_name("neon").name, "dark"); }
    #[test] fn names_round_trip() { for n in THEME_NAMES { assert_eq!(Theme::from_name(n).name, n); } }
    #[test] fn next_wraps() { assert_eq!(Theme::colorblind().next().name, "dark"); assert_eq!(Theme::dark().next().name, "light"); }
}
