use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Interpretation of a student's step-1 answers.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Step1Insight {
    pub summary: String,
    #[serde(default)]
    pub riasec_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub mi_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub top_themes: Vec<String>,
}

impl Step1Insight {
    pub fn fallback() -> Self {
        let riasec_scores = [("R", 0.2), ("I", 0.7), ("A", 0.4), ("S", 0.5), ("E", 0.3), ("C", 0.6)]
            .into_iter()
            .map(|(code, score)| (code.to_string(), score))
            .collect();
        let mi_scores = [("Logical", 0.7), ("Linguistic", 0.5), ("Bodily", 0.4)]
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect();

        Step1Insight {
            summary: "Shows curiosity and emerging strengths in problem solving.".to_string(),
            riasec_scores,
            mi_scores,
            top_themes: vec![
                "Curiosity".to_string(),
                "Analytical".to_string(),
                "Collaborative".to_string(),
            ],
        }
    }
}
