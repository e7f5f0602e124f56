use serde::{Deserialize, Serialize};

use shared_store::{Dispatch, Reducer};
use shared_utils::{keys, LocalStore};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Pure-local UI preference; no network, persisted under the theme
/// key.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub primary_color: String,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            primary_color: "#0ea5e9".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ThemeAction {
    SetMode(ThemeMode),
    Toggled,
}

impl Reducer for ThemeState {
    type Action = ThemeAction;

    fn reduce(&mut self, action: ThemeAction) {
        match action {
            ThemeAction::SetMode(mode) => self.mode = mode,
            ThemeAction::Toggled => {
                self.mode = match self.mode {
                    ThemeMode::Light => ThemeMode::Dark,
                    ThemeMode::Dark => ThemeMode::Light,
                };
            }
        }
    }
}

pub fn restore<D: Dispatch<ThemeAction>>(storage: &LocalStore, dispatch: &D) {
    if let Some(mode) = storage.get_as::<ThemeMode>(keys::THEME) {
        dispatch.dispatch(ThemeAction::SetMode(mode));
    }
}

pub fn set_mode<D: Dispatch<ThemeAction>>(storage: &LocalStore, dispatch: &D, mode: ThemeMode) {
    storage.set(keys::THEME, &mode);
    dispatch.dispatch(ThemeAction::SetMode(mode));
}
