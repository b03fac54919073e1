//! # yurei-core
//!
//! Core types, traits, configuration, and error handling for the Yurei bot.

pub mod completion;
pub mod config;
pub mod error;
pub mod message;
pub mod persona;
pub mod traits;
pub mod transcript;
