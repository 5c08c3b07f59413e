/// One side of the card: upload button, previews and its form fields

use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, text, Column};
use iced::{ContentFit, Element, Length};

use super::form_field::form_field;
use crate::state::data::{Preview, Side};
use crate::state::extractor::ExtractorState;
use crate::Message;

/// Height of the image preview boxes
const PREVIEW_HEIGHT: f32 = 192.0;

pub fn card_section(side: Side, state: &ExtractorState) -> Element<'_, Message> {
    let is_loading = state.loading() == Some(side);

    let label = if is_loading {
        "Processing…".to_string()
    } else {
        format!("Upload {} Image", side.title())
    };
    let upload = button(text(label).width(Length::Fill).align_x(Horizontal::Center))
        .on_press_maybe(state.can_upload(side).then_some(Message::PickImage(side)))
        .width(Length::Fill)
        .padding(10);

    let previews = state.previews();
    let preview_row = match side {
        Side::Front => row![
            preview_box(previews.front.as_ref(), is_loading, "Image Preview"),
            preview_box(previews.face.as_ref(), is_loading, "Face Preview"),
        ]
        .spacing(16),
        Side::Back => row![preview_box(previews.back.as_ref(), is_loading, "Image Preview")],
    };

    // The spouse field only exists once the backend reported one
    let record = state.record();
    let fields = Column::with_children(
        side.fields()
            .iter()
            .filter(move |field| record.is_present(**field))
            .map(move |&field| form_field(field, record.get(field))),
    )
    .spacing(12);

    container(
        column![
            text(side.title())
                .size(22)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
            upload,
            preview_row,
            fields,
        ]
        .spacing(16),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

fn preview_box<'a>(
    preview: Option<&'a Preview>,
    is_loading: bool,
    placeholder: &'static str,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match preview {
        _ if is_loading => text("Processing…").into(),
        Some(preview) => iced::widget::image(preview.handle().clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => text(placeholder).into(),
    };

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fixed(PREVIEW_HEIGHT))
        .style(container::bordered_box)
        .into()
}
