use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cross_xdg::BaseDirs;

use crate::theme::{Palette, parse_color};

/// Name of the optional settings file inside the user's config home.
pub const CONFIG_FILE: &str = "brainfuck.toml";

/// User-tunable settings. Everything has a default; a broken file never fails a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub palette: Palette,
    pub max_steps: Option<u64>,
}

impl Settings {
    /// Settings from `<config home>/brainfuck.toml`, or defaults.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::from_toml(&content))
            .unwrap_or_default()
    }

    /// Build settings from the `[colors]` and `[limits]` sections of `content`.
    pub fn from_toml(content: &str) -> Self {
        let sections = parse_sections(content);
        let mut settings = Settings::default();

        if let Some(colors) = sections.get("colors") {
            for (key, value) in colors {
                if let Some(color) = parse_color(value) {
                    settings.palette.set_color(key, color);
                }
            }
        }

        if let Some(limits) = sections.get("limits") {
            settings.max_steps = limits.get("max_steps").and_then(|v| v.parse().ok());
        }

        settings
    }
}

fn config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().into_iter().next()?;

    // Linux: /home/<user>/.config, Windows: C:\Users\<user>\.config,
    // macOS: /Users/<user>/.config
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE);
    Some(path)
}

/// Small line-oriented reader for `[section]` headers and `key = value` pairs.
/// Values may be quoted; `#` starts a comment line.
fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            current = Some(line[1..line.len() - 1].trim().to_string());
            continue;
        }
        let Some(section) = current.as_ref() else { continue };
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            let val = if val_raw.len() >= 2 && val_raw.starts_with('"') && val_raw.ends_with('"') {
                val_raw[1..val_raw.len() - 1].to_string()
            } else {
                val_raw.to_string()
            };
            sections.entry(section.clone()).or_default().insert(key, val);
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use nu_ansi_term::Color;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml(""), Settings::default());
    }

    #[test]
    fn reads_colors_and_limits() {
        let content = r##"
# user overrides
[colors]
fault_name = "#010203"
report_value = green
unknown_key = "red"
pointer = "not-a-color"

[limits]
max_steps = 1000
"##;
        let settings = Settings::from_toml(content);
        assert_eq!(settings.palette.fault_name.foreground, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(settings.palette.report_value.foreground, Some(Color::Green));
        assert_eq!(settings.palette.pointer, Palette::default().pointer);
        assert_eq!(settings.max_steps, Some(1000));
    }

    #[test]
    fn keys_outside_a_section_are_ignored() {
        let settings = Settings::from_toml("max_steps = 5\n[limits]\nmax_steps = oops\n");
        assert_eq!(settings.max_steps, None);
    }
}
