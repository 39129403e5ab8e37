//! In-memory page used by tests and server-side rendering.

#[cfg(test)]
#[path = "virtual_page_test.rs"]
mod virtual_page_test;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Page;

/// Snapshot of one element's mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualElement {
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct PageState {
    elements: HashMap<String, VirtualElement>,
    body_style: BTreeMap<String, String>,
    root_properties: BTreeMap<String, String>,
}

/// A page containing only the elements it was built with.
#[derive(Debug, Default)]
pub struct VirtualPage {
    state: Mutex<PageState>,
}

impl VirtualPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page with empty elements for each id.
    #[must_use]
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = ids.into_iter().map(|id| (id.to_owned(), VirtualElement::default())).collect();
        Self { state: Mutex::new(PageState { elements, ..PageState::default() }) }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<VirtualElement> {
        self.lock().elements.get(id).cloned()
    }

    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|el| el.text.clone())
    }

    #[must_use]
    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.lock().elements.get(id)?.attributes.get(name).cloned()
    }

    #[must_use]
    pub fn body_style(&self, property: &str) -> Option<String> {
        self.lock().body_style.get(property).cloned()
    }

    #[must_use]
    pub fn root_property(&self, name: &str) -> Option<String> {
        self.lock().root_properties.get(name).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut VirtualElement)) -> bool {
        match self.lock().elements.get_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }
}

impl Page for VirtualPage {
    fn set_text(&self, id: &str, text: &str) -> bool {
        self.with_element(id, |el| text.clone_into(&mut el.text))
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool {
        self.with_element(id, |el| {
            el.attributes.insert(name.to_owned(), value.to_owned());
        })
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        self.with_element(id, |el| {
            el.style.insert(property.to_owned(), value.to_owned());
        })
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.lock().elements.get(id)?.style.get(property).cloned()
    }

    fn set_body_style(&self, property: &str, value: &str) {
        self.lock().body_style.insert(property.to_owned(), value.to_owned());
    }

    fn set_root_property(&self, name: &str, value: &str) {
        self.lock().root_properties.insert(name.to_owned(), value.to_owned());
    }
}
