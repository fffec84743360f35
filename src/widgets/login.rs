//! Login widget: a composite of inputs and buttons with its own event vocabulary.
//!
//! Every child is hooked to the login, which turns their raw `change` and
//! `click` events into `change`, `theme` and `login` events of its own.

use std::any::Any;
use std::fmt;

use serde_json::{json, Map, Value};

use super::{Button, ButtonStyle, Input, InputType, Theme, EVENT_CHANGE, EVENT_CLICK, EVENT_LOGIN, EVENT_THEME};
use crate::component::base::BaseComponent;
use crate::component::context::RenderContext;
use crate::component::traits::{Child, Component};
use crate::event::response::ResponseEvent;
use crate::named_enum;
use crate::property::validate::{to_enum, to_string};
use crate::property::{Named, Properties};
use crate::render::{Element, RenderError};
use crate::state::directory::ComponentKey;

named_enum! {
    /// Property names declared by [`Login`].
    pub enum LoginProp {
        Theme => "theme",
        Version => "version",
    }
}

/// Roles of the login's children.
const FIELD_USERNAME: &str = "username";
const FIELD_PASSWORD: &str = "password";
const FIELD_DATABASE: &str = "database";
const BUTTON_THEME: &str = "theme";
const BUTTON_LOGIN: &str = "login";

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login form. The entered username and database live in `data`.
///
/// The password is not a property: it is held for the current request only
/// and never reaches the ledger or the markup.
#[derive(Clone, Default)]
pub struct Login {
    pub base: BaseComponent,
    pub theme: Theme,
    pub version: String,
    password: String,
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("base", &self.base)
            .field("theme", &self.theme)
            .field("version", &self.version)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Login {
    /// Create a login form.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the displayed version string (builder).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    fn credentials(&self) -> Value {
        json!({
            FIELD_USERNAME: self.base.data_str(FIELD_USERNAME),
            FIELD_PASSWORD: self.password,
            FIELD_DATABASE: self.base.data_str(FIELD_DATABASE),
        })
    }
}

impl Properties for Login {
    type Key = LoginProp;

    fn get_key(&self, key: LoginProp) -> Value {
        match key {
            LoginProp::Theme => json!(self.theme.as_str()),
            LoginProp::Version => json!(self.version),
        }
    }

    fn validate_key(&self, key: LoginProp, raw: &Value) -> Value {
        match key {
            LoginProp::Theme => json!(to_enum::<Theme>(raw).as_str()),
            LoginProp::Version => json!(to_string(raw, "")),
        }
    }

    fn assign_key(&mut self, key: LoginProp, value: &Value) {
        match key {
            LoginProp::Theme => self.theme = to_enum(value),
            LoginProp::Version => self.version = to_string(value, ""),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Login {
    fn component_type(&self) -> &'static str {
        "Login"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn compose(&self) -> Vec<Child> {
        let id = |name: &str| self.base.child_id(name);
        let switch_to = match self.theme {
            Theme::Light => "Dark",
            Theme::Dark => "Light",
        };
        vec![
            Child::hooked(
                Input::new(id(FIELD_USERNAME))
                    .with_name(FIELD_USERNAME)
                    .with_placeholder("Username")
                    .with_value(self.base.data_str(FIELD_USERNAME)),
            ),
            Child::hooked(
                Input::new(id(FIELD_PASSWORD))
                    .with_name(FIELD_PASSWORD)
                    .with_type(InputType::Password)
                    .with_placeholder("Password"),
            ),
            Child::hooked(
                Input::new(id(FIELD_DATABASE))
                    .with_name(FIELD_DATABASE)
                    .with_placeholder("Database")
                    .with_value(self.base.data_str(FIELD_DATABASE)),
            ),
            Child::hooked(
                Button::new(id(BUTTON_THEME))
                    .with_name(BUTTON_THEME)
                    .with_label(switch_to),
            ),
            Child::hooked(
                Button::new(id(BUTTON_LOGIN))
                    .with_name(BUTTON_LOGIN)
                    .with_label("Login")
                    .style(ButtonStyle::Primary),
            ),
        ]
    }

    fn on_response(
        &mut self,
        this: ComponentKey,
        event: ResponseEvent,
        ctx: &mut RenderContext,
    ) -> ResponseEvent {
        match (event.trigger_name.as_str(), event.name.as_str()) {
            (FIELD_USERNAME | FIELD_DATABASE, EVENT_CHANGE) => {
                let mut entry = Map::new();
                entry.insert(event.trigger_name.clone(), event.value.clone());
                ctx.update(self, "data", Value::Object(entry));
                event
            }
            (BUTTON_THEME, EVENT_CLICK) => {
                let next = self.theme.toggled();
                let value = ctx.update(self, "theme", json!(next.as_str()));
                ResponseEvent::from_node(this, self.name(), EVENT_THEME, value)
            }
            (FIELD_PASSWORD, EVENT_CHANGE) => {
                self.password = to_string(&event.value, "");
                event
            }
            (BUTTON_LOGIN, EVENT_CLICK) => {
                if let Some(password) = ctx.posted(FIELD_PASSWORD) {
                    self.password = password.to_owned();
                }
                ResponseEvent::from_node(this, self.name(), EVENT_LOGIN, self.credentials())
            }
            _ => event,
        }
    }

    fn render(&self, children: &[String]) -> Result<String, RenderError> {
        let footer = Element::new("small").text(&self.version).finish();
        Ok(Element::for_component("form", &self.base, self.component_type())
            .attr("data-theme", self.theme.as_str())
            .children(children)
            .child(if self.version.is_empty() { String::new() } else { footer })
            .finish())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
