//! Priority-ordered keyword triggers for persona switches.
//!
//! Matching is exact and case-sensitive. The first trigger whose keyword set
//! contains the text wins; text matching nothing goes to the model.

use yurei_core::persona::{Persona, HOSTILE_TAUNT, RESET_ACK};

/// Reinstall the protective persona.
pub(super) const RESET_KW: &[&str] = &["リセット", "初期化", "クリア", "reset", "clear"];

/// Provoke the hostile persona.
pub(super) const HOSTILE_KW: &[&str] = &["もっと", "教えて", "怖くない", "全く", "つまらない", "いまいち"];

/// A keyword set mapped to the persona it installs and the fixed reply.
pub(super) struct Trigger {
    pub keywords: &'static [&'static str],
    pub persona: Persona,
    pub reply: &'static str,
}

/// Checked top to bottom.
pub(super) const TRIGGERS: &[Trigger] = &[
    Trigger {
        keywords: RESET_KW,
        persona: Persona::Protective,
        reply: RESET_ACK,
    },
    Trigger {
        keywords: HOSTILE_KW,
        persona: Persona::Hostile,
        reply: HOSTILE_TAUNT,
    },
];

/// First trigger matching `text`, if any.
pub(super) fn match_trigger(text: &str) -> Option<&'static Trigger> {
    TRIGGERS
        .iter()
        .find(|t| t.keywords.iter().any(|kw| *kw == text))
}
