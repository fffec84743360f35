//! Application widget: the page root holding the title, theme and main view.
//!
//! The main view is produced by a factory so it can be rebuilt whenever the
//! application is recomposed. It is hooked to the application, which reacts
//! to `theme` and `login` events coming out of it.

use std::any::Any;
use std::fmt;

use serde_json::{json, Value};

use super::toast::{Toast, ToastType};
use super::{EVENT_LOGIN, EVENT_THEME};
use crate::component::base::{BaseComponent, Swap};
use crate::component::context::RenderContext;
use crate::component::traits::{Child, Component};
use crate::config::DEFAULT_TOAST_TARGET;
use crate::event::response::ResponseEvent;
use crate::named_enum;
use crate::property::validate::{to_enum, to_string};
use crate::property::{Named, Properties};
use crate::render::{Element, RenderError};
use crate::state::directory::{ComponentKey, Hook};

named_enum! {
    /// Color theme of the page.
    #[derive(Default)]
    pub enum Theme {
        #[default]
        Light => "light",
        Dark => "dark",
    }
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

named_enum! {
    /// Property names declared by [`Application`].
    pub enum ApplicationProp {
        Title => "title",
        Theme => "theme",
    }
}

type ViewFactory = Box<dyn Fn() -> Box<dyn Component>>;

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// The page root.
pub struct Application {
    pub base: BaseComponent,
    pub title: String,
    pub theme: Theme,
    /// Element id of the toast container rendered at the end of the page.
    ///
    /// Empty until mounted, when it follows the configured toast target.
    pub toast_container: String,
    main: Option<ViewFactory>,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            base: BaseComponent::default(),
            title: String::new(),
            theme: Theme::default(),
            toast_container: String::new(),
            main: None,
        }
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("base", &self.base)
            .field("title", &self.title)
            .field("theme", &self.theme)
            .field("has_main", &self.main.is_some())
            .finish()
    }
}

impl Application {
    /// Create an empty page.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: BaseComponent::new(id),
            ..Self::default()
        }
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the main view factory (builder). The view is hooked to the page.
    pub fn with_main<F, C>(mut self, factory: F) -> Self
    where
        F: Fn() -> C + 'static,
        C: Component,
    {
        self.main = Some(Box::new(move || Box::new(factory()) as Box<dyn Component>));
        self
    }

    fn container_id(&self) -> &str {
        if self.toast_container.is_empty() {
            DEFAULT_TOAST_TARGET.trim_start_matches('#')
        } else {
            &self.toast_container
        }
    }

    /// Set the toast container element id (builder). Overrides the configured target.
    pub fn with_toast_container(mut self, id: impl Into<String>) -> Self {
        self.toast_container = id.into();
        self
    }
}

impl Properties for Application {
    type Key = ApplicationProp;

    fn get_key(&self, key: ApplicationProp) -> Value {
        match key {
            ApplicationProp::Title => json!(self.title),
            ApplicationProp::Theme => json!(self.theme.as_str()),
        }
    }

    fn validate_key(&self, key: ApplicationProp, raw: &Value) -> Value {
        match key {
            ApplicationProp::Title => json!(to_string(raw, "")),
            ApplicationProp::Theme => json!(to_enum::<Theme>(raw).as_str()),
        }
    }

    fn assign_key(&mut self, key: ApplicationProp, value: &Value) {
        match key {
            ApplicationProp::Title => self.title = to_string(value, ""),
            ApplicationProp::Theme => self.theme = to_enum(value),
        }
    }

    fn delegate(&self) -> Option<&BaseComponent> {
        Some(&self.base)
    }

    fn delegate_mut(&mut self) -> Option<&mut BaseComponent> {
        Some(&mut self.base)
    }
}

impl Component for Application {
    fn component_type(&self) -> &'static str {
        "Application"
    }

    fn base(&self) -> &BaseComponent {
        &self.base
    }

    fn compose(&self) -> Vec<Child> {
        self.main
            .iter()
            .map(|factory| Child {
                component: factory(),
                hook: Hook::Parent,
            })
            .collect()
    }

    fn on_mount(&mut self, ctx: &RenderContext) {
        if self.toast_container.is_empty() {
            let target = &ctx.config().toast_target;
            self.toast_container = target.trim_start_matches('#').to_owned();
        }
    }

    fn on_response(
        &mut self,
        this: ComponentKey,
        event: ResponseEvent,
        ctx: &mut RenderContext,
    ) -> ResponseEvent {
        match event.name.as_str() {
            EVENT_THEME => {
                ctx.update(self, "theme", event.value.clone());
                let selector = format!("#{}", self.base.id);
                event
                    .with_node(this, self.name())
                    .retarget(selector, Swap::OuterHtml)
            }
            EVENT_LOGIN => {
                let username = event
                    .value
                    .get("username")
                    .map(|v| to_string(v, ""))
                    .unwrap_or_default();
                let toast = Toast::new("")
                    .with_type(ToastType::Success)
                    .with_message(format!("Welcome, {username}!"));
                let target = ctx.config().toast_target.clone();
                event
                    .with_detached(toast)
                    .retarget(target, Swap::InnerHtml)
            }
            _ => event,
        }
    }

    fn render(&self, children: &[String]) -> Result<String, RenderError> {
        let header = Element::new("h1").text(&self.title).finish();
        let toasts = Element::new("div")
            .attr("id", self.container_id())
            .finish();
        Ok(Element::for_component("main", &self.base, self.component_type())
            .attr("data-theme", self.theme.as_str())
            .child(if self.title.is_empty() { String::new() } else { header })
            .children(children)
            .child(toasts)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::mount::mount;
    use crate::config::EngineConfig;
    use crate::event::pipeline::dispatch;
    use crate::event::response::Trigger;
    use crate::event::trigger::TriggerEvent;
    use crate::property::PropertyAccess;
    use crate::state::directory::Directory;
    use crate::widgets::Login;
    use pretty_assertions::assert_eq;

    fn page() -> Application {
        Application::new("app")
            .with_title("Demo")
            .with_main(|| Login::new("login"))
    }

    #[test]
    fn theme_toggles_and_validates() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        let app = Application::new("app");
        assert_eq!(app.validate("theme", &json!("neon")), json!("light"));
    }

    #[test]
    fn main_view_is_hooked() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::default());
        let app = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(page())).unwrap();
        let login = dir.lookup("login").unwrap();
        assert_eq!(dir.children(app), &[login]);
        assert_eq!(dir.hook_parent(login), Some(app));
        assert_eq!(dir.len(), 7);
    }

    #[test]
    fn theme_event_bubbles_to_page() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::default());
        let app = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(page())).unwrap();

        let result = dispatch(&mut dir, &mut ctx, &TriggerEvent::new("login_theme"));
        assert_eq!(result.hooks_invoked, 2);
        assert_eq!(result.response.trigger.node(), Some(app));
        assert_eq!(result.response.directives.retarget.as_deref(), Some("#app"));
        assert_eq!(dir.downcast_ref::<Application>(app).unwrap().theme, Theme::Dark);

        // The rebuilt login replays its own theme from the ledger.
        let login = dir.lookup("login").unwrap();
        assert_eq!(dir.downcast_ref::<Login>(login).unwrap().theme, Theme::Dark);
        assert_eq!(ctx.ledger().get("app", "theme"), Some(&json!("dark")));
    }

    #[test]
    fn login_event_becomes_welcome_toast() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::default());
        mount(&mut dir, &mut ctx, None, Hook::None, Box::new(page()));
        let event = TriggerEvent::new("login_username")
            .with_name("username")
            .with_value("username", "ann");
        dispatch(&mut dir, &mut ctx, &event);

        let result = dispatch(&mut dir, &mut ctx, &TriggerEvent::new("login_login"));
        let Trigger::Detached(toast) = &result.response.trigger else {
            panic!("expected a detached toast, got {:?}", result.response.trigger);
        };
        assert_eq!(toast.get_property("message"), Some(json!("Welcome, ann!")));
        assert_eq!(toast.get_property("toast_type"), Some(json!("success")));
        assert_eq!(result.response.directives.retarget.as_deref(), Some("#toast-msg"));
        assert_eq!(result.response.directives.reswap, Some(Swap::InnerHtml));
    }

    #[test]
    fn toast_container_follows_configured_target() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::new().with_toast_target("#flash"));
        let app = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(page())).unwrap();
        let html = dir.get(app).unwrap().render(&[]).unwrap();
        assert!(html.contains(r#"<div id="flash"></div>"#));

        let result = dispatch(&mut dir, &mut ctx, &TriggerEvent::new("missing"));
        assert_eq!(result.response.directives.retarget.as_deref(), Some("#flash"));
    }

    #[test]
    fn explicit_toast_container_wins() {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::new().with_toast_target("#flash"));
        let page = Application::new("app").with_toast_container("notices");
        let app = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(page)).unwrap();
        let html = dir.get(app).unwrap().render(&[]).unwrap();
        assert!(html.contains(r#"<div id="notices"></div>"#));
    }

    #[test]
    fn render_page_shell() {
        let app = Application::new("app").with_title("Demo");
        insta::assert_snapshot!(
            app.render(&["<form></form>".to_owned()]).unwrap(),
            @r#"<main id="app" class="application" data-theme="light"><h1>Demo</h1><form></form><div id="toast-msg"></div></main>"#
        );
    }
}
