//! Demo driver for the min-width synchronizer.
//!
//! Builds the two-pane fixture page, attaches the synchronizer to an event
//! hub, and steps through the canonical scenario: page load, sidebar
//! collapse transition, responsive viewport resize. After each step the
//! applied `min-width` override and its resolved pixel value are logged.
//!
//! Geometry can be overridden with a JSON object in `GUTTER_SCENARIO`, and
//! element ids with the `GUTTER_*` configuration variables; run with
//! `RUST_LOG=info` (or `trace` for per-recompute detail) to see output.

use anyhow::{Context, Error, bail};
use gutter_calc::parse_calc;
use gutter_dom::{PageFixture, StyleDom};
use gutter_sync::{EventHub, GeometryEvent, MinWidthSynchronizer, SyncConfig};
use gutter_values::ResolutionContext;
use log::info;
use serde::Deserialize;
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

/// Page geometry walked by the driver.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Scenario {
    viewport: (u32, u32),
    sidebar_width: String,
    sidebar_left: String,
    main_min_width: String,
    /// Sidebar offset after the collapse transition completes.
    collapsed_left: String,
    /// Viewport and sidebar width after crossing the responsive breakpoint.
    narrow_viewport: (u32, u32),
    narrow_sidebar_width: String,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            viewport: (1280, 720),
            sidebar_width: String::from("240px"),
            sidebar_left: String::from("0px"),
            main_min_width: String::from("600px"),
            collapsed_left: String::from("-240px"),
            narrow_viewport: (700, 500),
            narrow_sidebar_width: String::from("64px"),
        }
    }
}

fn load_scenario() -> Result<Scenario, Error> {
    match env::var("GUTTER_SCENARIO") {
        Ok(json) => serde_json::from_str(&json).context("parsing GUTTER_SCENARIO"),
        Err(_) => Ok(Scenario::default()),
    }
}

/// Log the override currently applied to the main content element.
fn report(step: &str, dom: &Rc<RefCell<PageFixture>>, main_id: &str) {
    let page = dom.borrow();
    let Some(css_text) = page.inline_style(main_id, "min-width") else {
        info!("{step}: no min-width override applied");
        return;
    };
    let env = ResolutionContext {
        viewport: Some(page.viewport()),
        percent_basis_px: Some(page.viewport().width_px as f32),
        ..ResolutionContext::default()
    };
    match parse_calc(&css_text).ok().and_then(|expr| expr.resolve_px(&env)) {
        Some(px) => info!("{step}: min-width {css_text} -> {px}px"),
        None => info!("{step}: min-width {css_text} (deferred, unresolved here)"),
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let scenario = load_scenario()?;
    let config = SyncConfig::from_env();

    let mut page = PageFixture::new();
    page.set_viewport(scenario.viewport.0, scenario.viewport.1);
    if !page.insert_element(None, "nav", &config.sidebar_id)
        || !page.insert_element(None, "div", &config.main_id)
    {
        bail!("sidebar and main element ids must be distinct");
    }
    page.set_declared_style(&config.sidebar_id, "width", &scenario.sidebar_width);
    page.set_declared_style(&config.sidebar_id, "left", &scenario.sidebar_left);
    page.set_declared_style(&config.main_id, "min-width", &scenario.main_min_width);

    let dom = Rc::new(RefCell::new(page));
    let dom_dyn: Rc<RefCell<dyn StyleDom>> = dom.clone();
    let synchronizer = MinWidthSynchronizer::new(dom_dyn, config.clone());
    let hub = EventHub::new();
    let subscription = synchronizer.attach(&hub);

    hub.dispatch(&GeometryEvent::Loaded);
    report("page load", &dom, &config.main_id);

    dom.borrow_mut()
        .set_declared_style(&config.sidebar_id, "left", &scenario.collapsed_left);
    hub.dispatch(&GeometryEvent::TransitionEnded {
        element_id: config.sidebar_id.clone(),
        property: String::from("left"),
    });
    report("sidebar collapsed", &dom, &config.main_id);

    {
        let mut page = dom.borrow_mut();
        page.set_viewport(scenario.narrow_viewport.0, scenario.narrow_viewport.1);
        page.set_declared_style(&config.sidebar_id, "width", &scenario.narrow_sidebar_width);
        page.set_declared_style(&config.sidebar_id, "left", &scenario.sidebar_left);
    }
    hub.dispatch(&GeometryEvent::ViewportResized {
        width_px: scenario.narrow_viewport.0,
        height_px: scenario.narrow_viewport.1,
    });
    report("viewport narrowed", &dom, &config.main_id);

    subscription.detach();
    Ok(())
}
