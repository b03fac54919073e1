//! # yurei-channels
//!
//! Messaging platform integrations for Yurei.

pub mod line;
pub mod utils;
