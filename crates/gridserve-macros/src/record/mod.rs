//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module generates the `Record` accessor, field constants and the
//! field registry from struct annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
