//! Delve DNS Infrastructure Layer
pub mod dns;
