//! Lane dashboard front end.
//!
//! On `wasm32` the crate boots itself from `#[wasm_bindgen(start)]`, writes
//! into the host page's elements and logs to the browser console. Native
//! builds expose the same poller over an in-memory surface for the
//! `dashboard-headless` binary and for tests.

pub mod fetch;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
mod web;

pub use fetch::HttpFetcher;
