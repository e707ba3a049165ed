use gutter_calc::parse_calc;
use gutter_dom::{PageFixture, StyleDom};
use gutter_sync::{EventHub, GeometryEvent, MinWidthSynchronizer, RecomputeSkip, SyncConfig};
use gutter_values::{ResolutionContext, Viewport};
use std::cell::RefCell;
use std::rc::Rc;

fn build_page(sidebar_width: &str, sidebar_left: &str, main_min_width: &str) -> PageFixture {
    let mut page = PageFixture::new();
    assert!(page.insert_element(None, "nav", "sidebar"));
    assert!(page.insert_element(None, "div", "main"));
    page.set_declared_style("sidebar", "width", sidebar_width);
    page.set_declared_style("sidebar", "left", sidebar_left);
    page.set_declared_style("main", "min-width", main_min_width);
    page
}

fn attach(page: PageFixture) -> (MinWidthSynchronizer, Rc<RefCell<PageFixture>>) {
    let dom = Rc::new(RefCell::new(page));
    let dom_dyn: Rc<RefCell<dyn StyleDom>> = dom.clone();
    let synchronizer = MinWidthSynchronizer::new(dom_dyn, SyncConfig::default());
    (synchronizer, dom)
}

/// Resolve the applied override to pixels in a single common unit.
fn applied_px(dom: &Rc<RefCell<PageFixture>>, env: &ResolutionContext) -> Option<f32> {
    let css_text = dom.borrow().inline_style("main", "min-width")?;
    parse_calc(&css_text).ok()?.resolve_px(env)
}

#[test]
fn expanded_sidebar_reserves_its_width() {
    // 600px intrinsic minimum, 240px sidebar flush with the edge: the main
    // region may shrink to 360px before scrolling kicks in.
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    synchronizer.recompute();
    assert_eq!(
        dom.borrow().inline_style("main", "min-width"),
        Some(String::from("calc(600px - 240px - 0px)"))
    );
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(360.0));
}

#[test]
fn collapsed_sidebar_contributes_no_occlusion() {
    // Slid fully off-screen: -240px offset cancels the 240px width and the
    // intrinsic minimum is back in force.
    let (synchronizer, dom) = attach(build_page("240px", "-240px", "600px"));
    synchronizer.recompute();
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(600.0));
}

#[test]
fn repeated_runs_apply_identical_expressions() {
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    let first = synchronizer.try_recompute().unwrap();
    let first_css = dom.borrow().inline_style("main", "min-width");
    let second = synchronizer.try_recompute().unwrap();
    let second_css = dom.borrow().inline_style("main", "min-width");
    assert_eq!(first, second);
    assert_eq!(first_css, second_css);
}

#[test]
fn override_is_cleared_before_remeasuring() {
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    synchronizer.recompute();
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(360.0));

    // Narrow the sidebar and run again: the result must reflect the new
    // width against the *intrinsic* 600px, not compound onto the previous
    // 360px output.
    dom.borrow_mut().set_declared_style("sidebar", "width", "100px");
    synchronizer.recompute();
    assert_eq!(
        dom.borrow().inline_style("main", "min-width"),
        Some(String::from("calc(600px - 100px - 0px)"))
    );
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(500.0));
}

#[test]
fn removing_the_sidebar_degrades_silently() {
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    dom.borrow_mut().remove_element("sidebar");

    assert_eq!(
        synchronizer.try_recompute(),
        Err(RecomputeSkip::SidebarMissing)
    );
    assert_eq!(dom.borrow().inline_style("main", "min-width"), None);
    // And the fire-and-forget entry point raises nothing.
    synchronizer.recompute();
    assert_eq!(dom.borrow().inline_style("main", "min-width"), None);
}

#[test]
fn mixed_units_resolve_like_manual_arithmetic() {
    // Intrinsic minimum declared as a percentage, sidebar geometry in
    // pixels. The composed expression resolves, against a containing block
    // basis, to the same number as converting by hand.
    let (synchronizer, dom) = attach(build_page("240px", "0px", "75%"));
    synchronizer.recompute();
    assert_eq!(
        dom.borrow().inline_style("main", "min-width"),
        Some(String::from("calc(75% - 240px - 0px)"))
    );

    let env = ResolutionContext {
        viewport: Some(Viewport {
            width_px: 1280,
            height_px: 720,
        }),
        percent_basis_px: Some(800.0),
        ..ResolutionContext::default()
    };
    // 75% of 800px = 600px; 600 - 240 - 0 = 360.
    assert_eq!(applied_px(&dom, &env), Some(360.0));

    // Without a basis the expression stays deferred and unresolved, the
    // same silent outcome a rendering engine gives an unresolvable value.
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), None);
}

#[test]
fn responsive_breakpoint_grows_the_minimum_on_resize() {
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    let hub = EventHub::new();
    let _subscription = synchronizer.attach(&hub);

    hub.dispatch(&GeometryEvent::Loaded);
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(360.0));

    // A narrower viewport crosses the breakpoint that shrinks the sidebar
    // from 240px to 64px; the next resize dispatch frees the difference.
    {
        let mut page = dom.borrow_mut();
        page.set_viewport(700, 500);
        page.set_declared_style("sidebar", "width", "64px");
    }
    hub.dispatch(&GeometryEvent::ViewportResized {
        width_px: 700,
        height_px: 500,
    });
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(536.0));
}

#[test]
fn collapse_transition_completion_updates_the_override() {
    let (synchronizer, dom) = attach(build_page("240px", "0px", "600px"));
    let hub = EventHub::new();
    let _subscription = synchronizer.attach(&hub);

    hub.dispatch(&GeometryEvent::Loaded);
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(360.0));

    // The collapse animation runs; only its completion recomputes.
    dom.borrow_mut().set_declared_style("sidebar", "left", "-240px");
    hub.dispatch(&GeometryEvent::TransitionEnded {
        element_id: String::from("sidebar"),
        property: String::from("left"),
    });
    assert_eq!(applied_px(&dom, &ResolutionContext::default()), Some(600.0));
}
