use gloo_storage::{LocalStorage, Storage};
use shared::theme::{DARK_MODE_CLASS, PreferenceStore, StoreError, ThemeMarker};
use web_sys::HtmlElement;

/// `localStorage` holding plain string values (not JSON encoded), so the
/// stored preference reads `enabled` / `disabled` in devtools.
pub struct LocalStorageStore;

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StoreError(format!("{:?}", e)))
    }
}

pub struct BodyClassMarker {
    body: HtmlElement,
}

impl BodyClassMarker {
    pub fn from_document() -> Option<Self> {
        let body = web_sys::window()?.document()?.body()?;
        Some(Self { body })
    }
}

impl ThemeMarker for BodyClassMarker {
    fn is_present(&self) -> bool {
        self.body.class_list().contains(DARK_MODE_CLASS)
    }

    fn set_present(&mut self, present: bool) {
        let classes = self.body.class_list();
        let result = if present {
            classes.add_1(DARK_MODE_CLASS)
        } else {
            classes.remove_1(DARK_MODE_CLASS)
        };

        if let Err(e) = result {
            log::error!("Failed to update body class: {:?}", e);
        }
    }
}
