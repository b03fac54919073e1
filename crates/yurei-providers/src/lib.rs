//! # yurei-providers
//!
//! Completion API providers for Yurei.

pub mod azure_openai;
