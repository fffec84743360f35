//! Rendering: turn mounted components and resolved responses into markup.
//!
//! Components render themselves through [`Component::render`], given their
//! children's markup. A [`Renderer`] sits in front of that so a host can wrap
//! or replace the markup of any component without touching the widgets.

pub mod markup;

pub use markup::{escape, Element};

use crate::component::traits::Component;
use crate::event::response::{ResponseEvent, Trigger};
use crate::state::directory::{ComponentKey, Directory};

/// Errors raised while producing markup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("component {0:?} is not mounted")]
    NotMounted(ComponentKey),
    #[error("cannot render {component}: {message}")]
    Template { component: String, message: String },
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Collaborator turning one component into markup.
pub trait Renderer {
    /// Render `component`, whose children are already rendered.
    fn render_component(
        &self,
        component: &dyn Component,
        children: &[String],
    ) -> Result<String, RenderError>;

    /// Render a mounted component and its subtree.
    fn render_node(&self, directory: &Directory, key: ComponentKey) -> Result<String, RenderError> {
        let component = directory.get(key).ok_or(RenderError::NotMounted(key))?;
        let children = directory
            .children(key)
            .iter()
            .map(|&child| self.render_node(directory, child))
            .collect::<Result<Vec<_>, _>>()?;
        self.render_component(component, &children)
    }

    /// Render whatever a resolved response points at. `Trigger::None` renders nothing.
    fn render_response(
        &self,
        directory: &Directory,
        response: &ResponseEvent,
    ) -> Result<String, RenderError> {
        match &response.trigger {
            Trigger::Node(key) => self.render_node(directory, *key),
            Trigger::Detached(component) => self.render_component(component.as_ref(), &[]),
            Trigger::None => Ok(String::new()),
        }
    }
}

/// Renders every component with its own [`Component::render`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_component(
        &self,
        component: &dyn Component,
        children: &[String],
    ) -> Result<String, RenderError> {
        tracing::trace!(id = %component.id(), component = component.component_type(), "render");
        component.render(children)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::mount::mount;
    use crate::component::RenderContext;
    use crate::config::EngineConfig;
    use crate::state::directory::Hook;
    use crate::widgets::{Toast, Toggle};
    use pretty_assertions::assert_eq;

    /// Wraps every component in a comment naming its type.
    struct Annotated;

    impl Renderer for Annotated {
        fn render_component(
            &self,
            component: &dyn Component,
            children: &[String],
        ) -> Result<String, RenderError> {
            Ok(format!(
                "<!--{}-->{}",
                component.component_type(),
                component.render(children)?
            ))
        }
    }

    fn tree() -> (Directory, ComponentKey) {
        let mut dir = Directory::new();
        let mut ctx = RenderContext::new(EngineConfig::default());
        let root = mount(&mut dir, &mut ctx, None, Hook::None, Box::new(Toggle::new("a"))).unwrap();
        mount(&mut dir, &mut ctx, Some(root), Hook::None, Box::new(Toggle::new("b")));
        (dir, root)
    }

    #[test]
    fn renders_subtree_depth_first() {
        let (dir, root) = tree();
        let html = HtmlRenderer.render_node(&dir, root).unwrap();
        assert!(html.starts_with(r#"<div id="a""#));
        assert!(html.contains(r#"id="b""#));
        assert!(html.find(r#"id="b""#) > html.find(r#"id="a""#));
    }

    #[test]
    fn custom_renderer_wraps_components() {
        let (dir, root) = tree();
        let html = Annotated.render_node(&dir, root).unwrap();
        assert_eq!(html.matches("<!--Toggle-->").count(), 2);
    }

    #[test]
    fn missing_node_is_an_error() {
        let (mut dir, root) = tree();
        dir.remove(root);
        let err = HtmlRenderer.render_node(&dir, root).unwrap_err();
        assert!(matches!(err, RenderError::NotMounted(key) if key == root));
    }

    #[test]
    fn response_rendering() {
        let (dir, root) = tree();
        let node = ResponseEvent::default().with_node(root, "a");
        assert!(HtmlRenderer.render_response(&dir, &node).unwrap().contains(r#"id="a""#));

        let detached = ResponseEvent::default().with_detached(Toast::new("n1").with_message("hi"));
        let html = HtmlRenderer.render_response(&dir, &detached).unwrap();
        assert!(html.contains("hi"));

        assert_eq!(HtmlRenderer.render_response(&dir, &ResponseEvent::default()).unwrap(), "");
    }
}
