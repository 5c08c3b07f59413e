/// Page chrome shared by the extractor screen: header, banners, modals

use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, text,
};
use iced::alignment::Horizontal;
use iced::{Alignment, Color, Element, Length, Theme};

use crate::state::extractor::{Notice, NoticeKind};
use crate::Message;

pub fn header<'a>() -> Element<'a, Message> {
    container(
        row![
            text("ID Extractor").size(28),
            horizontal_space(),
            button("Settings")
                .on_press(Message::OpenSettings)
                .style(button::secondary),
            button("Logout")
                .on_press(Message::Logout)
                .style(button::danger),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding([16, 24])
    .width(Length::Fill)
    .style(container::dark)
    .into()
}

/// Inline error shown above the cards after a failed upload
pub fn error_banner(message: &str) -> Element<'_, Message> {
    container(text(message).width(Length::Fill).align_x(Horizontal::Center))
        .padding(12)
        .width(Length::Fill)
        .style(|theme: &Theme| {
            let danger = theme.extended_palette().danger.base;
            container::Style {
                background: Some(danger.color.into()),
                text_color: Some(danger.text),
                ..container::Style::default()
            }
        })
        .into()
}

/// Dialog that has to be acknowledged
pub fn notice_dialog(notice: &Notice) -> Element<'_, Message> {
    let title = match notice.kind {
        NoticeKind::Info => "Done",
        NoticeKind::Warning => "Attention",
        NoticeKind::Error => "Error",
    };

    container(
        column![
            text(title).size(20),
            text(notice.message.as_str()),
            text(notice.raised_at.format("%H:%M:%S").to_string()).size(12),
            row![horizontal_space(), button("OK").on_press(Message::DismissNotice)],
        ]
        .spacing(12),
    )
    .width(380)
    .padding(20)
    .style(container::rounded_box)
    .into()
}

/// Draw `content` over a dimmed `base`; clicking outside emits `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.7,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
