//! Keycloak-backed identity provider.

pub mod keycloak;

pub use keycloak::KeycloakClient;

pub use vf_shared::config::iam::IamConfig;
