//! Live DOM implementation of [`Page`] (hydrate builds only).

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::Page;

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// The current window's document, or `None` outside a browser.
    #[must_use]
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }
}

impl Page for DomPage {
    fn set_text(&self, id: &str, text: &str) -> bool {
        let Some(el) = self.document.get_element_by_id(id) else {
            return false;
        };
        el.set_text_content(Some(text));
        true
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool {
        self.document
            .get_element_by_id(id)
            .is_some_and(|el| el.set_attribute(name, value).is_ok())
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        self.html_element(id)
            .is_some_and(|el| el.style().set_property(property, value).is_ok())
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        let value = self.html_element(id)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_body_style(&self, property: &str, value: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property(property, value);
        }
    }

    fn set_root_property(&self, name: &str, value: &str) {
        let root = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(root) = root {
            let _ = root.style().set_property(name, value);
        }
    }
}
