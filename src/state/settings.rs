/// Editable copy of the configuration shown in the settings overlay.
///
/// Edits never touch the live configuration; closing the overlay drops
/// the draft and submitting hands it back to the controller.

use super::data::{ConfigData, ConfigField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    draft: ConfigData,
}

impl SettingsForm {
    pub fn open(current: &ConfigData) -> Self {
        Self {
            draft: current.clone(),
        }
    }

    pub fn value(&self, field: ConfigField) -> &str {
        self.draft.get(field)
    }

    pub fn edit(&mut self, field: ConfigField, value: String) {
        self.draft.set(field, value);
    }

    pub fn submit(self) -> ConfigData {
        self.draft
    }
}
