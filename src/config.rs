use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};

use crate::{
    action::{Action, GameInput},
    game::GameSettings,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub game: GameSettings,
}

impl Config {
    /// Loads the user's `config.yaml` on top of the bundled defaults and validates the game settings.
    pub fn new() -> Result<Self> {
        let default_config: Config = serde_yaml::from_str(CONFIG)?;
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder();

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file found in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.keybindings.merge(default_config.keybindings);
        cfg.game.validate()?;
        tracing::debug!(settings = ?cfg.game, "Loaded configuration");

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct _RawKeyBindings {
    #[serde(default)]
    pub global: HashMap<String, String>,
    #[serde(default)]
    pub game: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyMap(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: KeyMap,
    pub game: KeyMap,
}

impl KeyBindings {
    /// Global bindings win over game bindings for the same key.
    pub fn action_for(&self, key: &KeyEvent) -> Option<&Action> {
        self.global.get(key).or_else(|| self.game.get(key))
    }

    /// Fills in every default binding the user did not override.
    fn merge(&mut self, defaults: KeyBindings) {
        for (key, action) in defaults.global.0 {
            self.global.entry(key).or_insert(action);
        }
        for (key, action) in defaults.game.0 {
            self.game.entry(key).or_insert(action);
        }
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_keybindings = _RawKeyBindings::deserialize(deserializer)?;

        let global = parse_bindings(&raw_keybindings.global, |raw| serde_yaml::from_str::<Action>(raw))
            .map_err(de::Error::custom)?;
        let game = parse_bindings(&raw_keybindings.game, |raw| serde_yaml::from_str::<GameInput>(raw).map(Action::Game))
            .map_err(de::Error::custom)?;

        Ok(KeyBindings { global, game })
    }
}

fn parse_bindings<F>(raw: &HashMap<String, String>, parse_action: F) -> Result<KeyMap, String>
where
    F: Fn(&str) -> Result<Action, serde_yaml::Error>,
{
    raw.iter()
        .map(|(key_str, action_str)| {
            let event = parse_key_event(key_str)?;
            let action = parse_action(action_str).map_err(|e| format!("Unable to parse action `{action_str}`: {e}"))?;
            Ok((event, action))
        })
        .collect::<Result<HashMap<_, _>, String>>()
        .map(KeyMap)
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        let raw = raw.strip_prefix('>').unwrap_or(raw);
        raw
    } else {
        raw
    };
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" => KeyCode::Char('-'),
        "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().ok_or_else(|| format!("Unable to parse {raw}"))?;
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::F(c) => {
            char = format!("F({c})");
            &char
        },
        KeyCode::Char(' ') => "Space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        KeyCode::Esc => "Esc",
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("Ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("Shift");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("Alt");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::game;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    #[test]
    fn test_bundled_config() {
        let c: Config = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(c.keybindings.action_for(&key(' ')), Some(&Action::Game(GameInput::Flap)));
        assert_eq!(
            c.keybindings.action_for(&KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())),
            Some(&Action::Game(GameInput::Click))
        );
        assert_eq!(
            c.keybindings.action_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(&Action::Quit)
        );
        assert_eq!(c.game, GameSettings::default());
    }

    #[test]
    fn test_config() -> Result<()> {
        let c = Config::new()?;
        assert!(c.keybindings.action_for(&key('q')).is_some());
        assert!(c.game.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_help_toggle_key() {
        let c: Config = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(c.keybindings.action_for(&key('h')), Some(&Action::ToggleShowHelp));
    }

    #[test]
    fn test_game_section_overrides() {
        let c: Config = serde_yaml::from_str("game:\n  gravity: 0.3\n  spawn_interval: 90\n").unwrap();
        assert_eq!(c.game.gravity, 0.3);
        assert_eq!(c.game.spawn_interval, 90);
        assert_eq!(c.game.gap, game::PIPE_GAP);
    }

    #[test]
    fn test_merge_keeps_user_bindings() {
        let defaults: Config = serde_yaml::from_str(CONFIG).unwrap();
        let mut user: Config = serde_yaml::from_str("keybindings:\n  game:\n    \"<space>\": Click\n").unwrap();
        user.keybindings.merge(defaults.keybindings);

        assert_eq!(user.keybindings.action_for(&key(' ')), Some(&Action::Game(GameInput::Click)));
        assert_eq!(user.keybindings.action_for(&key('q')), Some(&Action::Quit));
    }

    #[test]
    fn test_global_wins_over_game() {
        let c: Config =
            serde_yaml::from_str("keybindings:\n  global:\n    \"<x>\": Quit\n  game:\n    \"<x>\": Flap\n").unwrap();
        assert_eq!(c.keybindings.action_for(&key('x')), Some(&Action::Quit));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let c = serde_yaml::from_str::<Config>("keybindings:\n  game:\n    \"<space>\": Jump\n");
        assert!(c.is_err());
        let c = serde_yaml::from_str::<Config>("keybindings:\n  global:\n    \"<nope>\": Quit\n");
        assert!(c.is_err());
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), key('a'));

        assert_eq!(parse_key_event("<space>").unwrap(), key(' '));

        assert_eq!(parse_key_event("enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

        assert_eq!(parse_key_event("esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));

        assert_eq!(parse_key_event("<f5>").unwrap(), KeyEvent::new(KeyCode::F(5), KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));

        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        assert_eq!(
            parse_key_event("ctrl-shift-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_key_event_to_string() {
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)),
            "Ctrl-Alt-a".to_string()
        );
        assert_eq!(key_event_to_string(&key(' ')), "Space".to_string());
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("<f13>").is_err());
        assert!(parse_key_event("<space").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
