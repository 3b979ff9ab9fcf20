//! # Configuration
//!
//! Settings for native clients. The browser build reads its few settings at
//! compile time instead and does not use this module.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;
