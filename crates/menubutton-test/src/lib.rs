#![allow(clippy::unwrap_used)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::manual_assert)]
//! Test support for menu buttons.
//!
//! - [`MenuFixture`]: builds a document holding a trigger and its menu
//! - [`Harness`]: drives clicks and key presses and asserts on the result
//! - [`MenuButtonAudit`]: checks the ARIA wiring of a trigger/menu pair
//! - [`init_tracing`]: routes `tracing` output to the test writer

pub mod a11y;
pub mod fixture;
pub mod harness;

pub use a11y::{A11yReport, A11yViolation, Impact, MenuButtonAudit};
pub use fixture::{Fixture, FixtureError, MenuFixture};
pub use harness::Harness;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber. Safe to call from every test.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
