use nu_ansi_term::{Color, Style};

pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        pub const TEXT: Color = Color::Rgb(205, 214, 244);
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);

        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const SKY: Color = Color::Rgb(137, 220, 235);
    }
}

use catppuccin::Mocha;

/// Styles used for everything the CLI writes to stderr.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub fault_name: Style,
    pub fault_message: Style,
    pub context: Style,
    pub caret: Style,
    pub notice: Style,
    pub report_heading: Style,
    pub report_index: Style,
    pub report_value: Style,
    pub pointer: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fault_name: Mocha::RED.bold(),
            fault_message: Style::new().fg(Mocha::RED),
            context: Style::new().fg(Mocha::SURFACE2),
            caret: Mocha::PEACH.bold(),
            notice: Style::new().fg(Mocha::YELLOW),
            report_heading: Style::new().fg(Mocha::TEXT).bold(),
            report_index: Style::new().fg(Mocha::SKY),
            report_value: Style::new().fg(Mocha::GREEN),
            pointer: Style::new().fg(Mocha::SKY),
        }
    }
}

impl Palette {
    /// No colours at all, for `--no-color` and `NO_COLOR`.
    pub fn plain() -> Self {
        let s = Style::new();
        Self {
            fault_name: s,
            fault_message: s,
            context: s,
            caret: s,
            notice: s,
            report_heading: s,
            report_index: s,
            report_value: s,
            pointer: s,
        }
    }

    /// Override the foreground of the style named `key`. Returns false for unknown keys.
    pub fn set_color(&mut self, key: &str, color: Color) -> bool {
        let slot = match key {
            "fault_name" => &mut self.fault_name,
            "fault_message" => &mut self.fault_message,
            "context" => &mut self.context,
            "caret" => &mut self.caret,
            "notice" => &mut self.notice,
            "report_heading" => &mut self.report_heading,
            "report_index" => &mut self.report_index,
            "report_value" => &mut self.report_value,
            "pointer" => &mut self.pointer,
            _ => return false,
        };
        slot.foreground = Some(color);
        true
    }
}

/// Parse `#RRGGBB` or a named colour.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        return None;
    }

    let name = s.to_ascii_lowercase();
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "darkgray" | "dark_gray" | "darkgrey" | "dark_grey" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightyellow" | "light_yellow" => Color::LightYellow,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightmagenta" | "light_magenta" => Color::LightPurple,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        "lightgray" | "light_gray" | "lightgrey" | "light_grey" => Color::LightGray,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("  Cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("light_magenta"), Some(Color::LightPurple));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn set_color_keeps_other_attributes() {
        let mut palette = Palette::default();
        assert!(palette.set_color("fault_name", Color::Blue));
        assert_eq!(palette.fault_name.foreground, Some(Color::Blue));
        assert!(palette.fault_name.is_bold);
        assert!(!palette.set_color("nope", Color::Blue));
    }

    #[test]
    fn plain_palette_has_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.fault_name.paint("x").to_string(), "x");
    }
}
