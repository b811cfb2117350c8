//! Value objects for the verification protocol.

pub mod code;

pub use code::{CodeKind, OtpConfirmation};
