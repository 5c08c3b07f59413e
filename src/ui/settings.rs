/// Settings overlay content

use iced::widget::{button, column, container, horizontal_space, row, text, text_input, Column};
use iced::{Alignment, Element};

use crate::state::data::ConfigField;
use crate::state::settings::SettingsForm;
use crate::Message;

pub fn settings_modal(form: &SettingsForm) -> Element<'_, Message> {
    let fields = Column::with_children(ConfigField::ALL.into_iter().map(|field| {
        column![
            text(field.label()).size(14),
            text_input(field.placeholder(), form.value(field))
                .on_input(move |value| Message::SettingsFieldChanged(field, value))
                .on_submit(Message::SubmitSettings)
                .padding(8),
        ]
        .spacing(4)
        .into()
    }))
    .spacing(16);

    container(
        column![
            row![
                text("Settings").size(24),
                horizontal_space(),
                button(text("×").size(20))
                    .on_press(Message::CloseSettings)
                    .style(button::text),
            ]
            .align_y(Alignment::Center),
            fields,
            row![
                horizontal_space(),
                button("Save Config")
                    .on_press(Message::SubmitSettings)
                    .padding([8, 16]),
            ],
        ]
        .spacing(20),
    )
    .width(420)
    .padding(24)
    .style(container::rounded_box)
    .into()
}
