use iced::widget::text::Shaping;
use iced::widget::{column, horizontal_space, row, text, text_input};
use iced::Element;

use crate::state::data::Field;
use crate::Message;

/// Controlled input with the English label on the left and the Arabic
/// label on the right
pub fn form_field(field: Field, value: &str) -> Element<'_, Message> {
    column![
        row![
            text(field.label()).size(14),
            horizontal_space(),
            text(field.label_arabic())
                .size(14)
                .shaping(Shaping::Advanced),
        ],
        text_input(field.placeholder(), value)
            .on_input(move |value| Message::FieldChanged(field, value))
            .padding(8),
    ]
    .spacing(4)
    .into()
}
