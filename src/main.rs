use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, scrollable, slider, text, Column};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod routes;
mod state;
mod ui;

use api::{OcrClient, Recognition};
use routes::Route;
use state::config::ConfigStore;
use state::data::{ConfigData, ConfigField, Field, Side};
use state::extractor::{ExtractorState, SaveTicket, UploadTicket};
use state::session::{Session, StaticCredentials};
use state::storage::{FileStorage, MemoryStorage, Storage};
use ui::login::LoginForm;

/// Main application state
struct IdExtractor {
    /// Screen currently requested (the guard decides what is shown)
    route: Route,
    /// Logged-in flag, scoped to this process
    session: Session,
    /// Typed credentials on the login screen
    login: LoginForm,
    /// Record, previews, settings and notices of the extractor screen
    extractor: ExtractorState,
    /// OCR backend client
    client: OcrClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    LoginSubmitted,
    Logout,
    ThresholdChanged(u8),
    /// User clicked a side's upload button
    PickImage(Side),
    /// Background upload completed
    UploadFinished(UploadTicket, Result<Recognition, String>),
    FieldChanged(Field, String),
    SaveRecord,
    RecordSaved(SaveTicket, Result<(), String>),
    OpenSettings,
    CloseSettings,
    SettingsFieldChanged(ConfigField, String),
    SubmitSettings,
    ConfigSaved(ConfigData, Result<(), String>),
    DismissNotice,
}

impl IdExtractor {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let session = Session::restore(
            Box::new(MemoryStorage::new()),
            Box::new(StaticCredentials::default()),
        );
        let extractor = ExtractorState::mount(ConfigStore::new(open_durable_storage()));
        let app = Self::with_parts(session, extractor, OcrClient::default());

        info!("🪪 ID Extractor ready, backend at {}", app.client.base_url());

        (app, Task::none())
    }

    fn with_parts(session: Session, extractor: ExtractorState, client: OcrClient) -> Self {
        IdExtractor {
            route: routes::guard(Route::Extractor, session.is_logged_in()),
            session,
            login: LoginForm::default(),
            extractor,
            client,
        }
    }

    fn navigate(&mut self, to: Route) {
        self.route = routes::guard(to, self.session.is_logged_in());
        info!("🧭 Showing {}", self.route.path());
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UsernameChanged(username) => {
                self.login.username = username;
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.login.password = password;
                Task::none()
            }
            Message::LoginSubmitted => {
                if self.login.submit(&mut self.session) {
                    self.navigate(Route::Extractor);
                }
                Task::none()
            }
            Message::Logout => {
                self.session.logout();
                // Leaving the page drops everything it held
                self.extractor.remount();
                self.navigate(Route::Login);
                Task::none()
            }
            Message::ThresholdChanged(threshold) => {
                self.extractor.set_threshold(threshold);
                Task::none()
            }
            Message::PickImage(side) => {
                if !self.extractor.can_upload(side) {
                    return Task::none();
                }

                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title(format!("Select {} Image", side.title()))
                    .add_filter("Images", &["png", "jpg", "jpeg"])
                    .pick_file();

                let Some(path) = picked else {
                    return Task::none();
                };

                let ticket = self.extractor.begin_upload(side);
                let client = self.client.clone();
                let threshold = self.extractor.threshold();

                // Launch async upload task
                Task::perform(
                    async move {
                        api::upload_image(client, path, side, threshold)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::UploadFinished(ticket, result),
                )
            }
            Message::UploadFinished(ticket, result) => {
                self.extractor.finish_upload(ticket, result);
                Task::none()
            }
            Message::FieldChanged(field, value) => {
                self.extractor.edit_field(field, value);
                Task::none()
            }
            Message::SaveRecord => {
                if !self.extractor.can_save() {
                    return Task::none();
                }
                let Ok((ticket, record)) = self.extractor.begin_save() else {
                    return Task::none();
                };
                let client = self.client.clone();

                Task::perform(
                    async move {
                        client
                            .save_record(&record)
                            .await
                            .map(|_| ())
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::RecordSaved(ticket, result),
                )
            }
            Message::RecordSaved(ticket, result) => {
                self.extractor.finish_save(ticket, result);
                Task::none()
            }
            Message::OpenSettings => {
                self.extractor.open_settings();
                Task::none()
            }
            Message::CloseSettings => {
                self.extractor.close_settings();
                Task::none()
            }
            Message::SettingsFieldChanged(field, value) => {
                self.extractor.edit_settings(field, value);
                Task::none()
            }
            Message::SubmitSettings => {
                let Some(config) = self.extractor.begin_config_save() else {
                    return Task::none();
                };
                let client = self.client.clone();

                Task::perform(
                    async move {
                        let result = client
                            .save_config(&config)
                            .await
                            .map(|_| ())
                            .map_err(|e| e.to_string());
                        (config, result)
                    },
                    |(config, result)| Message::ConfigSaved(config, result),
                )
            }
            Message::ConfigSaved(config, result) => {
                self.extractor.finish_config_save(config, result);
                Task::none()
            }
            Message::DismissNotice => {
                self.extractor.dismiss_notice();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match routes::guard(self.route, self.session.is_logged_in()) {
            Route::Login => ui::login::view(&self.login),
            Route::Extractor => self.extractor_view(),
        }
    }

    fn extractor_view(&self) -> Element<Message> {
        let state = &self.extractor;
        let mut page = Column::new().spacing(24).padding(24);

        if let Some(error) = state.error() {
            page = page.push(ui::layout::error_banner(error));
        }

        let threshold = container(
            column![
                text(format!("Set Threshold: {}", state.threshold()))
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
                slider(0..=255, state.threshold(), Message::ThresholdChanged),
            ]
            .spacing(8),
        )
        .max_width(420)
        .padding(16)
        .style(container::rounded_box);

        let save_label = if state.saving() {
            "Saving…"
        } else if state.loading().is_some() {
            "Processing…"
        } else {
            "Save Data"
        };
        let save = button(text(save_label))
            .on_press_maybe(state.can_save().then_some(Message::SaveRecord))
            .padding([12, 32])
            .style(button::success);

        page = page
            .push(container(threshold).center_x(Length::Fill))
            .push(
                row![
                    ui::card_section::card_section(Side::Front, state),
                    ui::card_section::card_section(Side::Back, state),
                ]
                .spacing(24),
            )
            .push(container(save).center_x(Length::Fill));

        let mut screen: Element<Message> =
            column![ui::layout::header(), scrollable(page).height(Length::Fill)].into();

        if let Some(form) = state.settings() {
            screen = ui::layout::modal(
                screen,
                ui::settings::settings_modal(form),
                Message::CloseSettings,
            );
        }

        if let Some(notice) = state.notice() {
            screen = ui::layout::modal(
                screen,
                ui::layout::notice_dialog(notice),
                Message::DismissNotice,
            );
        }

        screen
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Durable storage for the cached configuration. Falls back to memory
/// when the data directory is unusable so the app still starts.
fn open_durable_storage() -> Box<dyn Storage> {
    let Some(path) = FileStorage::default_location() else {
        warn!("⚠️  No data directory found, settings will not persist");
        return Box::new(MemoryStorage::new());
    };

    match FileStorage::open(path) {
        Ok(storage) => {
            info!("📁 Local storage opened at: {}", storage.path().display());
            Box::new(storage)
        }
        Err(e) => {
            warn!("⚠️  {}, settings will not persist", e);
            Box::new(MemoryStorage::new())
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("ID Extractor", IdExtractor::update, IdExtractor::view)
        .theme(IdExtractor::theme)
        .centered()
        .run_with(IdExtractor::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::FrontResponse;

    fn app() -> IdExtractor {
        let session = Session::restore(
            Box::new(MemoryStorage::new()),
            Box::new(StaticCredentials::default()),
        );
        let extractor = ExtractorState::mount(ConfigStore::new(Box::new(MemoryStorage::new())));
        IdExtractor::with_parts(session, extractor, OcrClient::default())
    }

    fn log_in(app: &mut IdExtractor) {
        let _ = app.update(Message::UsernameChanged("Admin".into()));
        let _ = app.update(Message::PasswordChanged("Admin".into()));
        let _ = app.update(Message::LoginSubmitted);
    }

    fn front_result(id: &str) -> Result<Recognition, String> {
        Ok(Recognition::Front(FrontResponse {
            image: "/9j/4AAQ".into(),
            face: "/9j/4AAQ".into(),
            name: "Mona Adel".into(),
            address: "Giza".into(),
            id: id.into(),
            dob: "1998-01-01".into(),
        }))
    }

    #[test]
    fn test_starts_on_login_screen() {
        let app = app();
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn test_logout_then_login_shows_empty_page() {
        let mut app = app();
        log_in(&mut app);
        assert_eq!(app.route, Route::Extractor);

        let ticket = app.extractor.begin_upload(Side::Front);
        let _ = app.update(Message::UploadFinished(ticket, front_result("29801011234567")));
        assert_eq!(app.extractor.record().id_number, "29801011234567");
        let _ = app.update(Message::OpenSettings);

        let _ = app.update(Message::Logout);
        assert_eq!(app.route, Route::Login);
        log_in(&mut app);

        assert_eq!(app.route, Route::Extractor);
        assert!(app.extractor.record().is_empty());
        assert!(app.extractor.previews().is_empty());
        assert!(app.extractor.settings().is_none());
        assert!(app.extractor.notice().is_none());
    }

    #[test]
    fn test_upload_from_previous_session_is_dropped() {
        let mut app = app();
        log_in(&mut app);
        let ticket = app.extractor.begin_upload(Side::Front);

        let _ = app.update(Message::Logout);
        log_in(&mut app);
        let _ = app.update(Message::UploadFinished(ticket, front_result("29801011234567")));

        assert!(app.extractor.record().is_empty());
        assert_eq!(app.extractor.loading(), None);
    }

    #[test]
    fn test_save_ignored_while_saving() {
        let mut app = app();
        log_in(&mut app);
        let ticket = app.extractor.begin_upload(Side::Front);
        let _ = app.update(Message::UploadFinished(ticket, front_result("29801011234567")));

        let (save, _) = app.extractor.begin_save().unwrap();
        let _ = app.update(Message::SaveRecord);
        assert!(app.extractor.saving());

        let _ = app.update(Message::RecordSaved(save, Ok(())));
        assert!(!app.extractor.saving());
        assert!(app.extractor.record().is_empty());
    }
}
