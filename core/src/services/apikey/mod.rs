//! API key management: generation, hashing, lookup, and toggling.

mod service;

#[cfg(test)]
mod tests;

pub use service::{ApiKeyService, GeneratedApiKey};
