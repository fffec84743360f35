//! Minimal HTML element builder with attribute and text escaping.

use crate::component::base::{BaseComponent, Indicator, Swap};
use crate::property::Named;

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One HTML element, built up attribute by attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(String, Option<String>)>,
    body: String,
    void: bool,
}

impl Element {
    /// Start an element with the given tag.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            body: String::new(),
            void: false,
        }
    }

    /// Start an element carrying the base attributes of a component.
    ///
    /// Emits `id`, a `class` list led by the lowercased type name, inline
    /// `style`, and the transport attributes when an event URL is set.
    pub fn for_component(tag: &'static str, base: &BaseComponent, component_type: &str) -> Self {
        let mut classes = vec![component_type.to_lowercase()];
        classes.extend(base.class.iter().cloned());
        let style = base
            .style
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect::<Vec<_>>()
            .join(";");

        let mut element = Self::new(tag)
            .attr_if(!base.id.is_empty(), "id", &base.id)
            .attr("class", classes.join(" "))
            .attr_if(!style.is_empty(), "style", style);
        if !base.event_url.is_empty() {
            element = element
                .attr("hx-post", &base.event_url)
                .attr("hx-target", &base.target);
            if base.swap != Swap::default() {
                element = element.attr("hx-swap", base.swap.as_str());
            }
        }
        if base.indicator != Indicator::None {
            element = element.attr("data-indicator", base.indicator.as_str());
        }
        element
    }

    /// Add an attribute. The value is escaped.
    pub fn attr(mut self, name: &str, value: impl AsRef<str>) -> Self {
        self.attrs
            .push((name.to_owned(), Some(escape(value.as_ref()))));
        self
    }

    /// Add an attribute only when `condition` holds.
    pub fn attr_if(self, condition: bool, name: &str, value: impl AsRef<str>) -> Self {
        if condition {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// Add a valueless boolean attribute when `on` holds.
    pub fn flag(mut self, name: &str, on: bool) -> Self {
        if on {
            self.attrs.push((name.to_owned(), None));
        }
        self
    }

    /// Append escaped text content.
    pub fn text(mut self, text: &str) -> Self {
        self.body.push_str(&escape(text));
        self
    }

    /// Append already rendered markup.
    pub fn children(mut self, children: &[String]) -> Self {
        for child in children {
            self.body.push_str(child);
        }
        self
    }

    /// Append one already rendered child.
    pub fn child(mut self, markup: impl AsRef<str>) -> Self {
        self.body.push_str(markup.as_ref());
        self
    }

    /// Render without a closing tag (e.g. `input`).
    pub fn void(mut self) -> Self {
        self.void = true;
        self
    }

    /// Produce the markup.
    pub fn finish(self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            match value {
                Some(value) => out.push_str(&format!(" {name}=\"{value}\"")),
                None => out.push_str(&format!(" {name}")),
            }
        }
        out.push('>');
        if self.void {
            return out;
        }
        out.push_str(&self.body);
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn element_with_attrs_and_text() {
        let html = Element::new("span")
            .attr("title", "a\"b")
            .flag("disabled", true)
            .flag("hidden", false)
            .text("1 < 2")
            .finish();
        assert_eq!(html, r#"<span title="a&quot;b" disabled>1 &lt; 2</span>"#);
    }

    #[test]
    fn void_element() {
        let html = Element::new("input").attr("value", "x").void().finish();
        assert_eq!(html, r#"<input value="x">"#);
    }

    #[test]
    fn component_base_attributes() {
        let mut base = BaseComponent::new("t1")
            .with_event_url("/event")
            .with_target("this")
            .with_class("wide");
        base.style.insert("color".into(), "red".into());
        base.data.insert("ignored".into(), json!(1));
        let html = Element::for_component("div", &base, "Toggle").finish();
        insta::assert_snapshot!(html, @r#"<div id="t1" class="toggle wide" style="color:red" hx-post="/event" hx-target="this"></div>"#);
    }

    #[test]
    fn component_without_transport() {
        let base = BaseComponent::new("b1");
        let html = Element::for_component("div", &base, "Button")
            .children(&["<i></i>".to_owned()])
            .finish();
        assert_eq!(html, r#"<div id="b1" class="button"><i></i></div>"#);
    }
}
