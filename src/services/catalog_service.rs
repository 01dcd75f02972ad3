use validator::Validate;

use crate::{
    errors::AppResult,
    models::dto::{
        request::CatalogRequest,
        response::{
            AssessmentCategory, AssessmentInfo, CatalogLinks, CatalogMeta, CatalogOption,
            CatalogQuestion, CatalogResponse, LabelTranslations,
        },
    },
};

const CATALOG_PATH: &str = "/cvp_lite/questions";
const CATALOG_TIMESTAMP: &str = "2025-08-21T07:15:00Z";

struct OptionEntry {
    id: &'static str,
    en: &'static str,
    hi: &'static str,
}

struct QuestionEntry {
    id: &'static str,
    text: &'static str,
    category_id: &'static str,
    weight: f64,
    order: u32,
    options: [OptionEntry; 4],
}

const CATALOG: &[QuestionEntry] = &[
    QuestionEntry {
        id: "5d2f6f6a-3a3b-4c2b-9f0f-8e9b4f2f5b77",
        text: "Which activity do you enjoy the most?",
        category_id: "riasec",
        weight: 1.5,
        order: 1,
        options: [
            OptionEntry {
                id: "opt1",
                en: "Building a model airplane",
                hi: "एक मॉडल हवाई जहाज बनाना",
            },
            OptionEntry {
                id: "opt2",
                en: "Solving a complex math problem",
                hi: "एक जटिल गणितीय समस्या हल करना",
            },
            OptionEntry {
                id: "opt3",
                en: "Organizing a charity event",
                hi: "एक चैरिटी कार्यक्रम का आयोजन करना",
            },
            OptionEntry {
                id: "opt4",
                en: "Creating a piece of art",
                hi: "एक कला का टुकड़ा बनाना",
            },
        ],
    },
    QuestionEntry {
        id: "9b0c1a27-9036-4a7a-ae78-0b4d2b6e2a11",
        text: "Which role would you feel most comfortable in?",
        category_id: "riasec",
        weight: 1.5,
        order: 2,
        options: [
            OptionEntry {
                id: "k8JrQ2sM1fZb",
                en: "A researcher studying a new phenomenon",
                hi: "एक नई घटना का अध्ययन करने वाला शोधकर्ता",
            },
            OptionEntry {
                id: "Wc3hL7r9QyP2",
                en: "A manager overseeing a team project",
                hi: "एक टीम परियोजना की देखरेख करने वाला प्रबंधक",
            },
            OptionEntry {
                id: "r2b7mK0Xn5Ta",
                en: "A counselor helping people overcome their problems",
                hi: "लोगों को उनकी समस्याओं से उबरने में मदद करने वाला सलाहकार",
            },
            OptionEntry {
                id: "t5Vn8Lq3Hd6W",
                en: "A time traveler exploring unknown eras",
                hi: "एक समय यात्री जो अज्ञात युगों की खोज कर रहा है",
            },
        ],
    },
];

impl QuestionEntry {
    fn to_question(&self) -> CatalogQuestion {
        CatalogQuestion {
            id: self.id.to_string(),
            text: self.text.to_string(),
            question_type: "single_choice".to_string(),
            options: self
                .options
                .iter()
                .map(|option| CatalogOption {
                    id: option.id.to_string(),
                    label: option.en.to_string(),
                    label_translations: LabelTranslations {
                        hi: option.hi.to_string(),
                        en: option.en.to_string(),
                    },
                })
                .collect(),
            required: true,
            category_id: self.category_id.to_string(),
            weight: self.weight,
            lang: "en-IN".to_string(),
            created_at: CATALOG_TIMESTAMP.to_string(),
            order: self.order,
        }
    }
}

fn assessment_info() -> AssessmentInfo {
    AssessmentInfo {
        id: "a9f2d7f0-1e6a-4d9a-8b9e-8e6a1c8b9f22".to_string(),
        step_type: "interests_strengths".to_string(),
        title: "Interest & Strengths Discovery".to_string(),
        scientific_basis: "riasec".to_string(),
        generated_at: CATALOG_TIMESTAMP.to_string(),
        categories: vec![
            AssessmentCategory {
                id: "riasec".to_string(),
                name: "RIASEC Assessment".to_string(),
                description: "Holland's RIASEC model assessment".to_string(),
                theory: "Holland's RIASEC Model".to_string(),
                weight: 1.5,
            },
            AssessmentCategory {
                id: "mi".to_string(),
                name: "Multiple Intelligences".to_string(),
                description: "Gardner's MI assessment".to_string(),
                theory: "Multiple Intelligences".to_string(),
                weight: 1.0,
            },
        ],
    }
}

fn page_link(page: u32, page_size: u32) -> String {
    format!("{}?page={}&page_size={}", CATALOG_PATH, page, page_size)
}

/// Serves the bundled bilingual question catalog.
#[derive(Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        CatalogService
    }

    pub fn questions(&self, request: &CatalogRequest) -> AppResult<CatalogResponse> {
        request.validate()?;

        let matching: Vec<&QuestionEntry> = CATALOG
            .iter()
            .filter(|entry| {
                request
                    .category_id
                    .as_deref()
                    .map_or(true, |category| entry.category_id == category)
            })
            .collect();

        let total = matching.len();
        let page_size = request.page_size as usize;
        let start = (request.page as usize - 1).saturating_mul(page_size);
        let data: Vec<CatalogQuestion> = matching
            .into_iter()
            .skip(start)
            .take(page_size)
            .map(QuestionEntry::to_question)
            .collect();

        let next = (start + page_size < total).then(|| page_link(request.page + 1, request.page_size));
        let prev = (request.page > 1).then(|| page_link(request.page - 1, request.page_size));

        Ok(CatalogResponse {
            data,
            meta: CatalogMeta {
                page: request.page,
                page_size: request.page_size,
                total,
                assessment: assessment_info(),
            },
            links: CatalogLinks {
                self_link: page_link(request.page, request.page_size),
                next,
                prev,
            },
        })
    }
}
