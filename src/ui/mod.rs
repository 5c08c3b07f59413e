/// Presentational components
///
/// Views only read state and emit `Message`s; the one exception is the
/// login form, which owns its typed credentials.

pub mod card_section;
pub mod form_field;
pub mod layout;
pub mod login;
pub mod settings;
