use std::fmt;

use serde::{Deserialize, Serialize};

/// Holland interest category used to balance an assessment set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum RiasecCode {
    R,
    I,
    A,
    S,
    E,
    C,
}

impl RiasecCode {
    /// Fixed iteration order used by the allocator's top-up pass.
    pub const ALL: [RiasecCode; 6] = [
        RiasecCode::R,
        RiasecCode::I,
        RiasecCode::A,
        RiasecCode::S,
        RiasecCode::E,
        RiasecCode::C,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            RiasecCode::R => "R",
            RiasecCode::I => "I",
            RiasecCode::A => "A",
            RiasecCode::S => "S",
            RiasecCode::E => "E",
            RiasecCode::C => "C",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            RiasecCode::R => "Realistic",
            RiasecCode::I => "Investigative",
            RiasecCode::A => "Artistic",
            RiasecCode::S => "Social",
            RiasecCode::E => "Enterprising",
            RiasecCode::C => "Conventional",
        }
    }

    /// Matches a bare letter or a full category name, case-sensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        RiasecCode::ALL
            .into_iter()
            .find(|code| code.letter() == tag || code.full_name() == tag)
    }
}

impl fmt::Display for RiasecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

impl QuestionOption {
    pub fn new(id: &str, text: &str) -> Self {
        QuestionOption {
            id: id.to_string(),
            text: text.to_string(),
        }
    }
}

/// A multiple-choice assessment item as served to the client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Question {
    pub fn primary_code(&self) -> Option<RiasecCode> {
        crate::services::assessment::classifier::primary_code(self.tags.as_deref())
    }
}
