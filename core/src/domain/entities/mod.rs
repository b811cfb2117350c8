//! Domain entities.

pub mod account;

#[cfg(test)]
mod tests;

pub use account::{Account, AccountStatus, AccountView};
