//! Persisted light/dark preference.
//!
//! The toggle owns a [`PreferenceStore`] (a string key/value store such as
//! `localStorage`) and a [`ThemeMarker`] (the `dark-mode` class on the page
//! body). After every click the two agree.

use strum_macros::{AsRefStr, Display, EnumString};

/// Storage key holding the preference.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Class applied to the document body while dark mode is on.
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ThemePreference {
    Enabled,
    Disabled,
}

impl ThemePreference {
    pub fn from_marker(present: bool) -> Self {
        if present {
            ThemePreference::Enabled
        } else {
            ThemePreference::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == ThemePreference::Enabled
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Preference storage error: {0}")]
pub struct StoreError(pub String);

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub trait ThemeMarker {
    fn is_present(&self) -> bool;
    fn set_present(&mut self, present: bool);
}

pub struct ThemeToggle<S, M> {
    store: S,
    marker: M,
}

impl<S: PreferenceStore, M: ThemeMarker> ThemeToggle<S, M> {
    pub fn new(store: S, marker: M) -> Self {
        Self { store, marker }
    }

    /// Applies the stored preference. Only an exact `"enabled"` turns the
    /// marker on; anything else leaves the page as rendered.
    pub fn on_ready(&mut self) {
        let stored = self
            .store
            .get(DARK_MODE_KEY)
            .and_then(|value| value.parse::<ThemePreference>().ok());

        if stored == Some(ThemePreference::Enabled) {
            self.marker.set_present(true);
        }
    }

    /// Flips the marker and persists the new state.
    pub fn on_click(&mut self) -> Result<ThemePreference, StoreError> {
        let present = !self.marker.is_present();
        self.marker.set_present(present);

        let preference = ThemePreference::from_marker(present);
        self.store.set(DARK_MODE_KEY, preference.as_ref())?;
        Ok(preference)
    }

    pub fn preference(&self) -> ThemePreference {
        ThemePreference::from_marker(self.marker.is_present())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }
}
