//! Styled-document model consumed by the layout synchronizer.
//!
//! The synchronizer never touches a concrete page type: it reads and writes
//! through [`StyleDom`], addressing elements by their markup identifier and
//! re-resolving them on every call, so measurements always reflect the
//! document as it stands at invocation time.

#![forbid(unsafe_code)]

pub mod fixture;

pub use fixture::PageFixture;

/// Boundary between the layout synchronizer and the host page.
pub trait StyleDom {
    /// Whether an element with this identifier is currently in the document.
    fn contains(&self, id: &str) -> bool;

    /// Fully resolved, post-cascade value of a style property, with the
    /// inline override layer applied. `None` when the element is absent.
    fn computed_style(&self, id: &str, property: &str) -> Option<String>;

    /// Write an inline style override. Returns `false` when the element is
    /// absent (the write is dropped).
    fn set_inline_style(&mut self, id: &str, property: &str, value: &str) -> bool;

    /// Remove an inline style override. Returns `false` when the element is
    /// absent. Removing a property that was never set is not an error.
    fn remove_inline_style(&mut self, id: &str, property: &str) -> bool;
}
