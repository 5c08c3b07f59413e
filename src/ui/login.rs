/// Login screen and its local field state

use iced::widget::{button, column, container, text, text_input};
use iced::alignment::Horizontal;
use iced::{Element, Length};

use crate::state::session::Session;
use crate::Message;

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginForm {
    /// Try the typed credentials against `session`. The form is cleared on
    /// success and carries an error line on failure.
    pub fn submit(&mut self, session: &mut Session) -> bool {
        self.error = None;

        if session.login(&self.username, &self.password) {
            *self = Self::default();
            true
        } else {
            self.error = Some("Invalid username or password!".to_string());
            false
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub fn view(form: &LoginForm) -> Element<'_, Message> {
    let title = text("Login")
        .size(32)
        .width(Length::Fill)
        .align_x(Horizontal::Center);
    let mut content = column![title].spacing(16);

    if let Some(error) = form.error() {
        content = content.push(super::layout::error_banner(error));
    }

    content = content
        .push(
            column![
                text("Username").size(14),
                text_input("Admin", &form.username)
                    .on_input(Message::UsernameChanged)
                    .on_submit(Message::LoginSubmitted)
                    .padding(10),
            ]
            .spacing(4),
        )
        .push(
            column![
                text("Password").size(14),
                text_input("Admin", &form.password)
                    .secure(true)
                    .on_input(Message::PasswordChanged)
                    .on_submit(Message::LoginSubmitted)
                    .padding(10),
            ]
            .spacing(4),
        )
        .push(
            button(text("Login").width(Length::Fill).align_x(Horizontal::Center))
                .on_press(Message::LoginSubmitted)
                .width(Length::Fill)
                .padding(12),
        );

    container(container(content).width(400).padding(32).style(container::rounded_box))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
