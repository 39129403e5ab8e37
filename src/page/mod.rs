//! Page rendering surface addressed by element id.
//!
//! SYSTEM CONTEXT
//! ==============
//! Theme and feedback code only ever touch a handful of elements by id plus
//! the `<body>` and `<html>` styles. [`Page`] captures exactly that, so the
//! same logic drives the live DOM ([`DomPage`], hydrate builds) and an
//! in-memory [`VirtualPage`] used by tests and server rendering.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod virtual_page;

#[cfg(feature = "hydrate")]
pub use dom::DomPage;
pub use virtual_page::VirtualPage;

/// Element-id based touchpoints. Methods addressing an element return
/// `false` when it is absent, which callers treat as a no-op.
pub trait Page {
    fn set_text(&self, id: &str, text: &str) -> bool;

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool;

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool;

    /// Current inline style value, `None` when the element or property is absent.
    fn style(&self, id: &str, property: &str) -> Option<String>;

    fn set_body_style(&self, property: &str, value: &str);

    /// Set a property (usually a CSS custom property) on the root element.
    fn set_root_property(&self, name: &str, value: &str);
}

impl<P: Page + ?Sized> Page for &P {
    fn set_text(&self, id: &str, text: &str) -> bool {
        (**self).set_text(id, text)
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> bool {
        (**self).set_attribute(id, name, value)
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        (**self).set_style(id, property, value)
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        (**self).style(id, property)
    }

    fn set_body_style(&self, property: &str, value: &str) {
        (**self).set_body_style(property, value);
    }

    fn set_root_property(&self, name: &str, value: &str) {
        (**self).set_root_property(name, value);
    }
}
