use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::domain::{Question, QuestionOption, RiasecCode, StudentContext};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([a-z_]+)\}").expect("PLACEHOLDER is a valid regex pattern")
});

struct FallbackTemplate {
    code: RiasecCode,
    id: &'static str,
    prompt: &'static str,
    scenario: Option<&'static str>,
    options: [(&'static str, &'static str); 4],
}

// Placeholders: {name}, {dream_job}, {hobby}.
const FALLBACK_TEMPLATES: &[FallbackTemplate] = &[
    FallbackTemplate {
        code: RiasecCode::R,
        id: "R1",
        prompt: "You have access to a maker lab for an hour. What would you most like to do?",
        scenario: Some("School makerspace hour"),
        options: [
            ("a", "Build or fix a simple device using tools"),
            ("b", "Sketch ideas for a future project"),
            ("c", "Plan tasks and assign roles"),
            ("d", "Research best practices before starting"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::R,
        id: "R2",
        prompt: "Which weekend plan sounds most fun to you?",
        scenario: None,
        options: [
            ("a", "Do a hands-on activity like biking, hiking, or fixing something"),
            ("b", "Write or create digital art"),
            ("c", "Lead a community game or event"),
            ("d", "Study an interesting topic online"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::I,
        id: "I1",
        prompt: "You notice a pattern in how your classmates learn. What do you do next?",
        scenario: None,
        options: [
            ("a", "Design an experiment to test your idea"),
            ("b", "Share a motivational story with the class"),
            ("c", "Create a poster to explain it visually"),
            ("d", "Coordinate a study group"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::I,
        id: "I2",
        prompt: "A device at an event stops working. What is your first step?",
        scenario: Some("Live school event"),
        options: [
            ("a", "Diagnose the root cause step by step"),
            ("b", "Announce a quick plan and delegate"),
            ("c", "Document the incident and adjust the schedule"),
            ("d", "Improvise a creative workaround"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::A,
        id: "A1",
        prompt: "You are creating something related to {hobby}. Which approach excites you most?",
        scenario: None,
        options: [
            ("a", "Try a bold, original style"),
            ("b", "Follow a proven template"),
            ("c", "Gather data to inform the design"),
            ("d", "Organize a team to produce it"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::A,
        id: "A2",
        prompt: "In a group project, which role do you pick?",
        scenario: None,
        options: [
            ("a", "Designer who makes it creative"),
            ("b", "Leader who coordinates tasks"),
            ("c", "Researcher who digs into facts"),
            ("d", "Organizer who tracks progress"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::S,
        id: "S1",
        prompt: "A friend struggles to understand a topic you like. What do you do?",
        scenario: None,
        options: [
            ("a", "Explain it with simple examples"),
            ("b", "Create a visual guide"),
            ("c", "Assign practice tasks"),
            ("d", "Research more before responding"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::S,
        id: "S2",
        prompt: "At a community event, which activity draws you in?",
        scenario: None,
        options: [
            ("a", "Helping visitors and answering questions"),
            ("b", "Designing posters or visuals"),
            ("c", "Analyzing feedback data"),
            ("d", "Operating equipment"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::E,
        id: "E1",
        prompt: "You want to start a small initiative at school around {hobby}. What is your first move?",
        scenario: None,
        options: [
            ("a", "Pitch the idea and inspire a team"),
            ("b", "Design a logo and theme"),
            ("c", "Draft a detailed timeline"),
            ("d", "Research similar initiatives"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::E,
        id: "E2",
        prompt: "If you were leading a club related to {dream_job}, what would you focus on first?",
        scenario: None,
        options: [
            ("a", "Build excitement and recruit members"),
            ("b", "Create visuals and publicity"),
            ("c", "Set up processes and roles"),
            ("d", "Collect data on member interests"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::C,
        id: "C1",
        prompt: "When planning a class event, which task do you enjoy most?",
        scenario: None,
        options: [
            ("a", "Organizing schedules and checklists"),
            ("b", "Creating posters and themes"),
            ("c", "Testing and reviewing equipment"),
            ("d", "Giving a motivating speech"),
        ],
    },
    FallbackTemplate {
        code: RiasecCode::C,
        id: "C2",
        prompt: "You are assigned to document a project. What do you do first?",
        scenario: None,
        options: [
            ("a", "Create a clear template and file structure"),
            ("b", "Design a cover page"),
            ("c", "Interview team members"),
            ("d", "Run a test of the final product"),
        ],
    },
];

/// Values substituted into fallback templates, with neutral wording when the profile is silent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateValues {
    pub name: String,
    pub dream_job: String,
    pub hobby: String,
}

impl TemplateValues {
    pub fn from_context(context: &StudentContext) -> Self {
        let hobby = context
            .hobbies_and_passions
            .first()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .unwrap_or("your favorite activity");

        TemplateValues {
            name: context.name.clone().unwrap_or_else(|| "you".to_string()),
            dream_job: context
                .dream_job
                .clone()
                .unwrap_or_else(|| "a role you aspire to".to_string()),
            hobby: hobby.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "dream_job" => Some(&self.dream_job),
            "hobby" => Some(&self.hobby),
            _ => None,
        }
    }
}

/// Replaces known `{placeholder}`s; unknown ones are left as written.
pub fn render_template(template: &str, values: &TemplateValues) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .lookup(&caps[1])
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Per-category pools of ready-to-serve questions, in authored order.
#[derive(Clone, Debug, Default)]
pub struct FallbackBank {
    pools: BTreeMap<RiasecCode, Vec<Question>>,
}

impl FallbackBank {
    pub fn for_student(context: &StudentContext) -> Self {
        let values = TemplateValues::from_context(context);
        let mut pools: BTreeMap<RiasecCode, Vec<Question>> = BTreeMap::new();

        for template in FALLBACK_TEMPLATES {
            let question = Question {
                id: template.id.to_string(),
                prompt: render_template(template.prompt, &values),
                options: template
                    .options
                    .iter()
                    .map(|(id, text)| QuestionOption::new(id, text))
                    .collect(),
                scenario: template.scenario.map(str::to_string),
                tags: Some(vec![template.code.letter().to_string()]),
            };
            pools.entry(template.code).or_default().push(question);
        }

        FallbackBank { pools }
    }

    pub fn from_pools(pools: BTreeMap<RiasecCode, Vec<Question>>) -> Self {
        FallbackBank { pools }
    }

    pub fn pool(&self, code: RiasecCode) -> &[Question] {
        self.pools.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }
}
