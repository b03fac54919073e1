//! Yurei: a LINE chat bot that tells ghost stories in one of two voices.

pub mod conversation;
pub mod gateway;
