//! # VeriFlow Shared
//!
//! Types, configuration, and utilities shared across the VeriFlow crates.
//! This crate has no knowledge of the domain; it only carries the plumbing
//! the core and infrastructure layers have in common.

pub mod config;
pub mod types;
pub mod utils;
