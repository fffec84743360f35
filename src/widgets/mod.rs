//! Built-in widgets: Toggle, Button, Input, NumberInput, Select, Toast, Login, Application.

use serde_json::Value;

use crate::event::trigger::TriggerEvent;

pub mod application;
pub mod button;
pub mod input;
pub mod login;
pub mod number;
pub mod select;
pub mod toast;
pub mod toggle;

pub use application::{Application, Theme};
pub use button::{Button, ButtonStyle, ButtonType};
pub use input::{Input, InputType};
pub use login::Login;
pub use number::NumberInput;
pub use select::{Select, SelectOption};
pub use toast::{Toast, ToastType};
pub use toggle::Toggle;

/// A value was edited.
pub const EVENT_CHANGE: &str = "change";
/// A button was pressed.
pub const EVENT_CLICK: &str = "click";
/// The theme was switched.
pub const EVENT_THEME: &str = "theme";
/// Credentials were submitted.
pub const EVENT_LOGIN: &str = "login";

/// The posted form value of a field.
///
/// Looks up the trigger name first, then the component's own name. `Null`
/// when neither was posted.
pub(crate) fn posted_value(event: &TriggerEvent, own_name: &str) -> Value {
    [event.name.as_str(), own_name]
        .into_iter()
        .filter(|name| !name.is_empty())
        .find_map(|name| event.value(name))
        .map(|value| Value::String(value.to_owned()))
        .unwrap_or(Value::Null)
}
