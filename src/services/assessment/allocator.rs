use std::collections::{BTreeMap, HashSet};

use crate::models::domain::{Question, RiasecCode};
use crate::services::assessment::fallback_bank::FallbackBank;
use crate::services::assessment::options::sanitize_options;

/// Ordered category → count mapping. Iteration follows insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuotaTable {
    entries: Vec<(RiasecCode, usize)>,
}

impl Default for QuotaTable {
    /// R:2, I:2, A:2, S:2, E:1, C:1.
    fn default() -> Self {
        QuotaTable::new(vec![
            (RiasecCode::R, 2),
            (RiasecCode::I, 2),
            (RiasecCode::A, 2),
            (RiasecCode::S, 2),
            (RiasecCode::E, 1),
            (RiasecCode::C, 1),
        ])
    }
}

impl QuotaTable {
    /// Later entries for a repeated code replace the earlier count in place.
    pub fn new(entries: Vec<(RiasecCode, usize)>) -> Self {
        let mut table: Vec<(RiasecCode, usize)> = Vec::with_capacity(entries.len());
        for (code, count) in entries {
            match table.iter_mut().find(|(existing, _)| *existing == code) {
                Some(slot) => slot.1 = count,
                None => table.push((code, count)),
            }
        }
        QuotaTable { entries: table }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn quota(&self, code: RiasecCode) -> Option<usize> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == code)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiasecCode, usize)> + '_ {
        self.entries.iter().copied()
    }
}

struct Selection {
    items: Vec<Question>,
    used_ids: HashSet<String>,
}

impl Selection {
    fn new() -> Self {
        Selection {
            items: Vec::new(),
            used_ids: HashSet::new(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn count_of(&self, code: RiasecCode) -> usize {
        self.items
            .iter()
            .filter(|q| q.primary_code() == Some(code))
            .count()
    }

    /// Adds a model candidate unless its id is already taken.
    fn push_candidate(&mut self, question: &Question) -> bool {
        if !self.used_ids.insert(question.id.clone()) {
            return false;
        }
        self.items.push(question.clone());
        true
    }

    /// Adds a fallback record, suffixing `_1`, `_2`, ... onto its id until unique.
    fn push_fallback(&mut self, template: &Question) {
        let mut id = template.id.clone();
        let mut suffix = 1;
        while self.used_ids.contains(&id) {
            id = format!("{}_{}", template.id, suffix);
            suffix += 1;
        }
        self.used_ids.insert(id.clone());
        self.items.push(Question {
            id,
            ..template.clone()
        });
    }
}

/// Picks `quotas.total()` questions, model candidates first, fallback records for the gaps.
///
/// Candidates without a recognized primary category never enter the selection. When the bank
/// cannot cover a deficit the result is shorter or unevenly spread; that is not an error.
pub fn allocate(candidates: &[Question], quotas: &QuotaTable, bank: &FallbackBank) -> Vec<Question> {
    let total = quotas.total();

    let mut buckets: BTreeMap<RiasecCode, Vec<&Question>> = BTreeMap::new();
    for candidate in candidates {
        if let Some(code) = candidate.primary_code() {
            if quotas.quota(code).is_some() {
                buckets.entry(code).or_default().push(candidate);
            }
        }
    }

    let mut selection = Selection::new();

    for (code, need) in quotas.iter() {
        let bucket = buckets.get(&code).map(Vec::as_slice).unwrap_or(&[]);
        for candidate in bucket.iter().take(need) {
            selection.push_candidate(candidate);
        }
    }
    let from_model = selection.len();

    for (code, need) in quotas.iter() {
        let mut deficit = need.saturating_sub(selection.count_of(code));
        for template in bank.pool(code) {
            if deficit == 0 {
                break;
            }
            selection.push_fallback(template);
            deficit -= 1;
        }
    }

    'top_up: while selection.len() < total {
        let before = selection.len();
        for code in RiasecCode::ALL {
            for template in bank.pool(code) {
                if selection.len() >= total {
                    break 'top_up;
                }
                selection.push_fallback(template);
            }
        }
        if selection.len() == before {
            break;
        }
    }

    log::debug!(
        "Assessment allocation: {} from model, {} from fallback bank, target {}",
        from_model,
        selection.len() - from_model,
        total
    );

    let mut selected = trim_surplus(selection.items, quotas, total);
    for question in &mut selected {
        question.prompt = question.prompt.trim().to_string();
        question.options = sanitize_options(&question.options);
    }
    selected.truncate(total);
    selected
}

/// Keeps the first `quota[c]` items of each over-full category, preserving relative order.
fn trim_surplus(items: Vec<Question>, quotas: &QuotaTable, total: usize) -> Vec<Question> {
    if items.len() <= total {
        return items;
    }

    let mut seen: BTreeMap<RiasecCode, usize> = BTreeMap::new();
    items
        .into_iter()
        .filter(|question| {
            let Some(code) = question.primary_code() else {
                return true;
            };
            let Some(need) = quotas.quota(code) else {
                return true;
            };
            let count = seen.entry(code).or_insert(0);
            *count += 1;
            *count <= need
        })
        .collect()
}
