//! The layout synchronizer: keeps the main content region's minimum width
//! consistent with the sidebar's rendered geometry.
//!
//! Every run is a pure function of current document geometry: clear the
//! previous override, measure fresh, compose, apply. Repeated runs with
//! unchanged geometry apply an identical expression, so overlapping
//! triggers need no queueing — last write wins.

use crate::config::SyncConfig;
use crate::events::{EventHub, GeometryEvent, Subscription};
use gutter_calc::{CalcExpr, CalcTerm};
use gutter_dom::StyleDom;
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// The one style property this component owns on the main content element.
const MIN_WIDTH: &str = "min-width";

/// Why a recompute run did not apply an override.
///
/// Both conditions degrade silently at the public boundary: this is
/// decorative layout behavior, and a transient glitch beats breaking the
/// page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecomputeSkip {
    /// The main content element is not in the document.
    MainMissing,
    /// The sidebar element is not in the document.
    SidebarMissing,
}

/// Recomputes the main content element's `min-width` from the sidebar's
/// current geometry.
#[derive(Clone)]
pub struct MinWidthSynchronizer {
    dom: Rc<RefCell<dyn StyleDom>>,
    config: SyncConfig,
}

impl MinWidthSynchronizer {
    pub fn new(dom: Rc<RefCell<dyn StyleDom>>, config: SyncConfig) -> Self {
        Self { dom, config }
    }

    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run one recomputation. Never raises; a missing collaborator is a
    /// logged no-op.
    pub fn recompute(&self) {
        match self.try_recompute() {
            Ok(expr) => trace!("applied {MIN_WIDTH} override: {expr}"),
            Err(skip) => debug!("skipping {MIN_WIDTH} recompute: {skip:?}"),
        }
    }

    /// Run one recomputation, reporting the applied expression or the skip
    /// condition. Same semantics as [`recompute`](Self::recompute).
    ///
    /// # Errors
    /// Returns the skip condition when either page element is absent; the
    /// main element's style is left untouched in that case.
    pub fn try_recompute(&self) -> Result<CalcExpr, RecomputeSkip> {
        let mut dom = self.dom.borrow_mut();
        if !dom.contains(&self.config.main_id) {
            return Err(RecomputeSkip::MainMissing);
        }
        if !dom.contains(&self.config.sidebar_id) {
            return Err(RecomputeSkip::SidebarMissing);
        }

        // Restore the stylesheet-intrinsic minimum before measuring, so the
        // computation never feeds on its own previous output.
        dom.remove_inline_style(&self.config.main_id, MIN_WIDTH);

        let intrinsic = measure(&*dom, &self.config.main_id, MIN_WIDTH);
        let sidebar_width = measure(&*dom, &self.config.sidebar_id, "width");
        let sidebar_left = measure(&*dom, &self.config.sidebar_id, "left");

        let expr = CalcExpr::difference(intrinsic, sidebar_width, sidebar_left);
        dom.set_inline_style(&self.config.main_id, MIN_WIDTH, &expr.to_string());
        Ok(expr)
    }

    /// Subscribe this synchronizer to a hub: qualifying events run a
    /// recompute. The synchronizer stays attached until the returned
    /// [`Subscription`] is dropped.
    pub fn attach(&self, hub: &EventHub) -> Subscription {
        let synchronizer = self.clone();
        hub.subscribe(move |event| {
            if synchronizer.qualifies(event) {
                synchronizer.recompute();
            }
        })
    }

    /// Trigger policy. Load and viewport resize always qualify; a completed
    /// transition qualifies only when it changed the sidebar's watched
    /// geometry — completion-only binding keeps intermediate animation
    /// frames from thrashing layout.
    fn qualifies(&self, event: &GeometryEvent) -> bool {
        match event {
            GeometryEvent::Loaded | GeometryEvent::ViewportResized { .. } => true,
            GeometryEvent::TransitionEnded {
                element_id,
                property,
            } => *element_id == self.config.sidebar_id && self.config.watches_transition(property),
        }
    }
}

/// Read one computed measurement as a calc operand. Unparsable values travel
/// verbatim; a property the backend cannot report at all reads as `auto`,
/// which is what a computed-style query reports for unset geometry.
fn measure(dom: &dyn StyleDom, id: &str, property: &str) -> CalcTerm {
    match dom.computed_style(id, property) {
        Some(value) => CalcTerm::parse_or_raw(&value),
        None => CalcTerm::Raw(String::from("auto")),
    }
}
