#![cfg_attr(not(test), forbid(unsafe_code))]

//! Browser layer of the Gaun Roots site.
//!
//! The navigation synchronizer and the account and alert flows are written
//! against small traits so they run (and are tested) natively; the `browser`
//! module binds them to the real DOM, local storage and console when built
//! for wasm32.

pub mod account;
pub mod alerts;
pub mod config;
pub mod navigation;
pub mod notifications;

#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(test)]
mod alerts_test;

pub use account::{AuthError, AuthFlow, AuthForm, AuthMode};
pub use alerts::{AlertFlow, ReportForm, SubmitError, SubmitOutcome, SubscriptionForm};
pub use config::WebConfig;
pub use navigation::{Destination, NavRole, NavigationSynchronizer, Navigator};
pub use notifications::{Notification, NotificationLevel, Notifier};
