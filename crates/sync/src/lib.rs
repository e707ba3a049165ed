//! Sidebar/main-content minimum-width synchronization.
//!
//! A collapsible sidebar occupies a varying slice of horizontal space next
//! to the page's main content region. This crate keeps the main region's
//! `min-width` consistent with the sidebar's current rendered geometry:
//! on page load, viewport resize, and sidebar transition completion it
//! clears the previous override, measures the intrinsic minimum plus the
//! sidebar's width and horizontal offset from computed styles, and applies
//! their difference as a deferred `calc()` expression.

#![forbid(unsafe_code)]

pub mod config;
pub mod events;
pub mod synchronizer;

pub use config::SyncConfig;
pub use events::{EventHub, GeometryEvent, Subscription};
pub use synchronizer::{MinWidthSynchronizer, RecomputeSkip};
