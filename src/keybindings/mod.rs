//! Customizable keybindings for headnav
//!
//! Each [`KeybindingMode`] owns a `keybinds` dispatcher mapping key sequences
//! to [`Action`]s. Defaults come from [`defaults`]; users override them per
//! mode in the config file:
//!
//! ```toml
//! [keybindings.Normal]
//! "o" = "Activate"
//! "Ctrl+c" = "Quit"
//!
//! [keybindings.Search]
//! "Ctrl+w" = "ClearSearch"
//! ```

mod action;
mod defaults;

pub use action::Action;

use crossterm::event::KeyEvent;
use keybinds::{Key, KeyInput, KeySeq, Keybinds, Mods};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Application modes that have their own keybinding sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum KeybindingMode {
    Normal,
    /// Search bar open; unbound printable keys are query text
    Search,
    /// Help popup shown
    Help,
}

impl KeybindingMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            KeybindingMode::Normal => "Normal",
            KeybindingMode::Search => "Search",
            KeybindingMode::Help => "Help",
        }
    }
}

/// A user override whose key string `keybinds` could not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key '{key}' in [keybindings.{mode}]: {reason}")]
pub struct KeybindingError {
    pub mode: &'static str,
    pub key: String,
    pub reason: String,
}

/// Per-mode key dispatchers.
#[derive(Debug)]
pub struct Keybindings {
    modes: HashMap<KeybindingMode, Keybinds<Action>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        defaults::default_keybindings()
    }
}

impl Keybindings {
    fn empty() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }

    /// Feed a key press to the dispatcher of `mode`.
    pub fn dispatch(&mut self, mode: KeybindingMode, event: KeyEvent) -> Option<Action> {
        self.modes
            .get_mut(&mode)
            .and_then(|binds| binds.dispatch(event).copied())
    }

    /// Drop half-typed sequences; call on every mode switch.
    pub fn reset_sequences(&mut self) {
        for binds in self.modes.values_mut() {
            binds.reset();
        }
    }

    fn bind(
        &mut self,
        mode: KeybindingMode,
        key_sequence: &str,
        action: Action,
    ) -> Result<(), keybinds::Error> {
        self.modes
            .entry(mode)
            .or_default()
            .bind(key_sequence, action)
    }

    /// Number of key sequences bound in `mode`.
    pub fn binding_count(&self, mode: KeybindingMode) -> usize {
        self.modes.get(&mode).map_or(0, |binds| binds.as_slice().len())
    }

    /// Labels of every key sequence bound to `action`, in binding order.
    pub fn keys_for_action(&self, mode: KeybindingMode, action: Action) -> Vec<String> {
        self.modes
            .get(&mode)
            .into_iter()
            .flat_map(|binds| binds.as_slice())
            .filter(|bind| bind.action == action)
            .map(|bind| sequence_label(&bind.seq))
            .collect()
    }

    /// Bound actions of `mode` with their key labels, ordered by category
    /// then description.
    pub fn help_entries(&self, mode: KeybindingMode) -> Vec<(Action, Vec<String>)> {
        let mut entries: Vec<(Action, Vec<String>)> = Vec::new();
        for bind in self.modes.get(&mode).map_or(&[][..], |b| b.as_slice()) {
            let label = sequence_label(&bind.seq);
            match entries.iter_mut().find(|(action, _)| *action == bind.action) {
                Some((_, keys)) => keys.push(label),
                None => entries.push((bind.action, vec![label])),
            }
        }

        entries.sort_by_key(|(action, _)| (action.category(), action.description()));
        entries
    }

    /// Apply user overrides on top of the current bindings.
    ///
    /// Stops at the first key string that does not parse.
    pub fn apply_overrides(&mut self, overrides: &KeybindingsConfig) -> Result<(), KeybindingError> {
        for (mode, keys) in &overrides.0 {
            for (key, action) in keys {
                self.bind(*mode, key, *action)
                    .map_err(|e| KeybindingError {
                        mode: mode.display_name(),
                        key: key.clone(),
                        reason: e.to_string(),
                    })?;
            }
        }
        Ok(())
    }
}

/// "g g", "Ctrl+u", "Enter"
fn sequence_label(seq: &KeySeq) -> String {
    seq.as_slice()
        .iter()
        .map(input_label)
        .collect::<Vec<_>>()
        .join(" ")
}

fn input_label(input: &KeyInput) -> String {
    let mods = input.mods();
    let mut label = String::new();
    for (flag, name) in [(Mods::CTRL, "Ctrl+"), (Mods::ALT, "Alt+")] {
        if mods.contains(flag) {
            label.push_str(name);
        }
    }

    match input.key() {
        Key::Char(' ') => label.push_str("Space"),
        Key::Char(c) => label.push(c),
        Key::Up => label.push('↑'),
        Key::Down => label.push('↓'),
        Key::Left => label.push('←'),
        Key::Right => label.push('→'),
        Key::Esc => label.push_str("Esc"),
        other => label.push_str(&format!("{:?}", other)),
    }
    label
}

/// Config-file form of the overrides: mode -> key string -> action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeybindingsConfig(pub HashMap<KeybindingMode, HashMap<String, Action>>);

impl KeybindingsConfig {
    /// Defaults with these overrides applied. An invalid key is logged and
    /// the overrides after it are skipped.
    pub fn to_keybindings(&self) -> Keybindings {
        let mut keybindings = Keybindings::default();
        if let Err(e) = keybindings.apply_overrides(self) {
            tracing::warn!(error = %e, "ignoring keybinding overrides");
        }
        keybindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_default_keybindings_exist() {
        let mut kb = Keybindings::default();

        // Check some basic normal mode bindings
        assert!(kb
            .dispatch(
                KeybindingMode::Normal,
                make_key_event(KeyCode::Char('j'), KeyModifiers::NONE)
            )
            .is_some());
        assert!(kb
            .dispatch(
                KeybindingMode::Normal,
                make_key_event(KeyCode::Char('k'), KeyModifiers::NONE)
            )
            .is_some());
        assert!(kb
            .dispatch(
                KeybindingMode::Normal,
                make_key_event(KeyCode::Char('q'), KeyModifiers::NONE)
            )
            .is_some());
    }

    #[test]
    fn test_dispatch() {
        let mut kb = Keybindings::default();

        let action = kb.dispatch(
            KeybindingMode::Normal,
            make_key_event(KeyCode::Char('j'), KeyModifiers::NONE),
        );
        assert_eq!(action, Some(Action::Next));

        let action = kb.dispatch(
            KeybindingMode::Normal,
            make_key_event(KeyCode::Char('x'), KeyModifiers::NONE),
        );
        assert!(action.is_none());
    }

    #[test]
    fn test_keys_for_action() {
        let kb = Keybindings::default();

        let keys = kb.keys_for_action(KeybindingMode::Normal, Action::Activate);
        assert_eq!(keys, ["Enter", "Space"]);

        let clear = kb.keys_for_action(KeybindingMode::Search, Action::ClearSearch);
        assert_eq!(clear, ["Ctrl+u"]);
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let mut user = HashMap::new();
        user.insert("NoSuchKey".to_string(), Action::Quit);
        let mut config = KeybindingsConfig::default();
        config.0.insert(KeybindingMode::Help, user);

        let mut kb = Keybindings::default();
        let err = kb.apply_overrides(&config).unwrap_err();
        assert_eq!(err.mode, "Help");
        assert_eq!(err.key, "NoSuchKey");

        // Defaults survive a rejected override
        assert_eq!(
            config.to_keybindings().binding_count(KeybindingMode::Help),
            Keybindings::default().binding_count(KeybindingMode::Help)
        );
    }

    #[test]
    fn test_user_config_overrides_defaults() {
        let mut user = HashMap::new();
        user.insert("x".to_string(), Action::Quit);
        let mut config = KeybindingsConfig::default();
        config.0.insert(KeybindingMode::Normal, user);

        let mut kb = config.to_keybindings();
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Normal,
                make_key_event(KeyCode::Char('x'), KeyModifiers::NONE)
            ),
            Some(Action::Quit)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Normal,
                make_key_event(KeyCode::Char('k'), KeyModifiers::NONE)
            ),
            Some(Action::Previous)
        );
    }

    #[test]
    fn test_help_entries_grouped_by_category() {
        let kb = Keybindings::default();
        let entries = kb.help_entries(KeybindingMode::Normal);

        let categories: Vec<_> = entries.iter().map(|(a, _)| a.category()).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert!(entries.iter().any(|(a, _)| *a == Action::EnterSearchMode));
    }
}
