/// The upload → extract → edit → save controller
///
/// All mutable page state lives here and every change goes through a
/// named transition, so the UI only forwards events and renders.
///
/// Front uploads and remounts bump a generation counter. A completion
/// carrying an older generation is dropped, which keeps a slow back-side
/// response from landing in a record that a newer front upload already
/// reset.

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::config::ConfigStore;
use super::data::{ConfigData, ConfigField, Field, IdentityRecord, Preview, Previews, Side};
use super::settings::SettingsForm;
use crate::api::{ApiError, Recognition};

/// Binarization threshold used until the user moves the slider
pub const DEFAULT_THRESHOLD: u8 = 110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Local>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Local::now(),
        }
    }
}

/// Identifies one in-flight upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub side: Side,
    generation: u64,
}

/// Identifies one in-flight `/save` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    generation: u64,
}

/// What happened to a finished upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Applied,
    Failed,
    /// Superseded by a newer front upload
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot save. Please process an ID card first.")]
pub struct SaveRejected;

#[derive(Debug)]
pub struct ExtractorState {
    record: IdentityRecord,
    previews: Previews,
    loading: Option<Side>,
    saving: bool,
    error: Option<String>,
    threshold: u8,
    settings: Option<SettingsForm>,
    notice: Option<Notice>,
    config: ConfigData,
    config_store: ConfigStore,
    generation: u64,
}

impl ExtractorState {
    /// Fresh page state with the cached configuration loaded.
    pub fn mount(config_store: ConfigStore) -> Self {
        let config = config_store.load();
        Self {
            record: IdentityRecord::default(),
            previews: Previews::default(),
            loading: None,
            saving: false,
            error: None,
            threshold: DEFAULT_THRESHOLD,
            settings: None,
            notice: None,
            config,
            config_store,
            generation: 0,
        }
    }

    pub fn record(&self) -> &IdentityRecord {
        &self.record
    }

    pub fn previews(&self) -> &Previews {
        &self.previews
    }

    pub fn loading(&self) -> Option<Side> {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn settings(&self) -> Option<&SettingsForm> {
        self.settings.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    #[cfg(test)]
    pub fn config(&self) -> &ConfigData {
        &self.config
    }

    /// Drop everything the page holds and reload the cached configuration,
    /// as when the page is left and entered again. Requests still in
    /// flight belong to the old page and will be discarded.
    pub fn remount(&mut self) {
        self.record.reset();
        self.previews.clear();
        self.loading = None;
        self.saving = false;
        self.error = None;
        self.threshold = DEFAULT_THRESHOLD;
        self.settings = None;
        self.notice = None;
        self.config = self.config_store.load();
        self.generation += 1;
    }

    // ========== Editing ==========

    pub fn set_threshold(&mut self, threshold: u8) {
        self.threshold = threshold;
    }

    pub fn edit_field(&mut self, field: Field, value: String) {
        self.record.set(field, value);
    }

    // ========== Upload ==========

    /// The upload button of a side is disabled while that side is loading
    /// and while a save is in flight
    pub fn can_upload(&self, side: Side) -> bool {
        self.loading != Some(side) && !self.saving
    }

    /// Mark `side` as loading. A front upload also wipes the record and
    /// every preview before the request goes out.
    pub fn begin_upload(&mut self, side: Side) -> UploadTicket {
        if side == Side::Front {
            self.generation += 1;
            self.record.reset();
            self.previews.clear();
        }

        self.loading = Some(side);
        self.error = None;

        UploadTicket {
            side,
            generation: self.generation,
        }
    }

    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<Recognition, String>,
    ) -> UploadOutcome {
        if ticket.generation != self.generation {
            warn!(
                "⏭️  Dropping stale {} result (generation {} < {})",
                ticket.side.title(),
                ticket.generation,
                self.generation
            );
            return UploadOutcome::Discarded;
        }

        if self.loading == Some(ticket.side) {
            self.loading = None;
        }

        match (ticket.side, result) {
            (Side::Front, Ok(Recognition::Front(front))) => {
                self.record.apply_front(&front);
                self.previews.front = Preview::from_base64_jpeg(&front.image);
                self.previews.face = Preview::from_base64_jpeg(&front.face);
                if let Some(preview) = &self.previews.front {
                    debug!("🖼️  Front preview is {} chars", preview.data_uri().len());
                }
                info!("✅ Front side extracted");
                UploadOutcome::Applied
            }
            (Side::Back, Ok(Recognition::Back(back))) => {
                self.record.apply_back(&back);
                self.previews.back = Preview::from_base64_jpeg(&back.image);
                if let Some(preview) = &self.previews.back {
                    debug!("🖼️  Back preview is {} chars", preview.data_uri().len());
                }
                info!("✅ Back side extracted");
                UploadOutcome::Applied
            }
            (side, Ok(_)) => {
                error!("❌ {} upload returned the other side's fields", side.title());
                self.error = Some(ApiError::InvalidResponse.to_string());
                UploadOutcome::Failed
            }
            (side, Err(message)) => {
                error!("❌ {} upload failed: {}", side.title(), message);
                self.error = Some(message);
                UploadOutcome::Failed
            }
        }
    }

    // ========== Save ==========

    /// The save button is disabled while an upload or another save is
    /// running
    pub fn can_save(&self) -> bool {
        self.loading.is_none() && !self.saving
    }

    /// Returns the record to send, or prompts the user when there is no
    /// national ID yet.
    pub fn begin_save(&mut self) -> Result<(SaveTicket, IdentityRecord), SaveRejected> {
        if !self.record.has_national_id() {
            self.notice = Some(Notice::new(NoticeKind::Warning, SaveRejected.to_string()));
            return Err(SaveRejected);
        }

        self.saving = true;
        let ticket = SaveTicket {
            generation: self.generation,
        };
        Ok((ticket, self.record.clone()))
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: Result<(), String>) {
        if ticket.generation != self.generation {
            warn!(
                "⏭️  Dropping stale save result (generation {} < {})",
                ticket.generation, self.generation
            );
            return;
        }

        self.saving = false;
        match result {
            Ok(()) => {
                info!("💾 Record saved, resetting form");
                self.record.reset();
                self.previews.clear();
                self.notice = Some(Notice::new(NoticeKind::Info, "Data saved successfully!"));
            }
            Err(message) => {
                error!("❌ Saving failed: {}", message);
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    format!("Saving Failed: {}", message),
                ));
            }
        }
    }

    // ========== Settings ==========

    pub fn open_settings(&mut self) {
        self.settings = Some(SettingsForm::open(&self.config));
    }

    pub fn edit_settings(&mut self, field: ConfigField, value: String) {
        if let Some(form) = self.settings.as_mut() {
            form.edit(field, value);
        }
    }

    /// Close without saving; edits are dropped.
    pub fn close_settings(&mut self) {
        self.settings = None;
    }

    /// Close the overlay right away and hand back the draft to send.
    pub fn begin_config_save(&mut self) -> Option<ConfigData> {
        self.settings.take().map(SettingsForm::submit)
    }

    /// Commit `config` once the backend accepted it. On failure the
    /// previous configuration stays active and the overlay stays closed.
    pub fn finish_config_save(&mut self, config: ConfigData, result: Result<(), String>) {
        if let Err(message) = result {
            error!("❌ Failed to save configuration: {}", message);
            self.notice = Some(Notice::new(
                NoticeKind::Error,
                format!("Failed to save configuration: {}", message),
            ));
            return;
        }

        self.config = config;
        self.notice = Some(match self.config_store.save(&self.config) {
            Ok(()) => {
                info!("⚙️  Configuration saved");
                Notice::new(
                    NoticeKind::Info,
                    "Configuration saved successfully to backend and local storage.",
                )
            }
            Err(e) => {
                warn!("⚠️  Configuration not cached locally: {}", e);
                Notice::new(
                    NoticeKind::Warning,
                    format!("Configuration saved to backend but not cached locally: {}", e),
                )
            }
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
