//! HTTP client for the external notification service.

pub mod http_notifier;

pub use http_notifier::HttpNotifier;

pub use vf_shared::config::notifier::NotifierConfig;
