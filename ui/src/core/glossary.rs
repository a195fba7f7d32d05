//! Plain-language metric definitions.
//!
//! Built-in IPEDS definitions are matched by lowercase prefix of the metric's
//! base name. A supplementary glossary (CSV or JSON) can be fetched at start-up;
//! its entries take precedence over the built-ins.

use serde::Deserialize;
use tracing::{info, warn};

use super::config::{GlossaryFormat, GlossarySource};
use super::error::{LoadError, LoadResult};
use super::source;
use super::table;

pub const NOT_FOUND_TEXT: &str = "Definition not found in the current lookup set.";
pub const NOT_FOUND_SOURCE: &str = "IPEDS";
const DEFAULT_SOURCE: &str = "IPEDS definition";

const BUILT_IN: &[(&str, &str, &str)] = &[
    (
        "percent admitted",
        "IPEDS Admissions collects counts of applicants and admitted students (and admitted who enrolled) for first-time degree/certificate-seeking undergraduates. Percent admitted is derived from the applicant and admitted counts.",
        "IPEDS Admissions (ADM)",
    ),
    (
        "admissions yield",
        "IPEDS Admissions reports the number of admitted students who enrolled. Admissions yield is derived as the share of admitted students who enrolled.",
        "IPEDS Admissions (ADM)",
    ),
    (
        "full-time retention rate",
        "Full-time retention rate is the number of first-time, full-time degree/certificate-seeking undergraduates who enter in the fall and return to the same institution the following fall (full- or part-time), divided by the total entering cohort.",
        "IPEDS Data Feedback Report (Retention)",
    ),
    (
        "graduation rate - bachelor degree within",
        "Graduation Rates track first-time, full-time degree/certificate-seeking undergraduates and report completions within 150% of normal time; for bachelor's programs this is typically 6 years. The 4- and 5-year rates reflect shorter completion windows.",
        "IPEDS Graduation Rates (GR)",
    ),
    (
        "total price for",
        "Total price (cost of attendance) is the sum of published tuition and required fees, books and supplies, and the weighted average of room, board, and other expenses. IPEDS reports totals by living arrangement (on campus, off campus with family, off campus not with family) and residency status.",
        "IPEDS Institutional Characteristics (IC)",
    ),
    (
        "average amount of pell grant aid",
        "Average Pell grant aid is calculated by dividing total Pell grant dollars awarded by the number of Pell recipients in the cohort.",
        "IPEDS Student Financial Aid (SFA)",
    ),
    (
        "average amount of student loans",
        "Average loan aid is calculated by dividing total loan dollars awarded by the number of loan recipients in the cohort.",
        "IPEDS Student Financial Aid (SFA)",
    ),
];

const KEY_COLUMNS: &[&str] = &["metric", "name", "variable", "key", "code"];
const DEFINITION_COLUMNS: &[&str] = &["definition", "description", "text"];
const SOURCE_COLUMNS: &[&str] = &["source", "provenance"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlossaryEntry {
    #[serde(alias = "metric", alias = "name", alias = "variable", alias = "code")]
    pub key: String,
    #[serde(alias = "description", alias = "text")]
    pub definition: String,
    #[serde(default, alias = "provenance")]
    pub source: Option<String>,
}

/// What the definition card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub title: String,
    pub body: String,
    pub source: String,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new(entries: Vec<GlossaryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_csv(text: &str) -> LoadResult<Self> {
        let parsed = table::parse(text);
        let find = |aliases: &[&str]| {
            parsed
                .header
                .iter()
                .find(|column| aliases.contains(&column.trim().to_lowercase().as_str()))
                .cloned()
        };
        let key_column = find(KEY_COLUMNS).ok_or_else(|| LoadError::Glossary("no key column".into()))?;
        let definition_column =
            find(DEFINITION_COLUMNS).ok_or_else(|| LoadError::Glossary("no definition column".into()))?;
        let source_column = find(SOURCE_COLUMNS);

        let entries = parsed
            .rows
            .iter()
            .filter_map(|row| {
                let key = row.get(&key_column)?.trim();
                let definition = row.get(&definition_column)?.trim();
                if key.is_empty() || definition.is_empty() {
                    return None;
                }
                let source = source_column
                    .as_ref()
                    .and_then(|column| row.get(column))
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty());
                Some(GlossaryEntry {
                    key: key.to_string(),
                    definition: definition.to_string(),
                    source,
                })
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn from_json(text: &str) -> LoadResult<Self> {
        let entries: Vec<GlossaryEntry> =
            serde_json::from_str(text).map_err(|err| LoadError::Glossary(err.to_string()))?;
        Ok(Self { entries })
    }

    /// Supplementary entry: exact key first, then the longest key the name starts with.
    fn supplementary(&self, base: &str) -> Option<&GlossaryEntry> {
        let lower = base.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.key.to_lowercase() == lower)
            .or_else(|| {
                self.entries
                    .iter()
                    .filter(|entry| lower.starts_with(&entry.key.to_lowercase()))
                    .max_by_key(|entry| entry.key.len())
            })
    }

    pub fn describe(&self, base: &str) -> Definition {
        if let Some(entry) = self.supplementary(base) {
            return Definition {
                title: base.to_string(),
                body: entry.definition.clone(),
                source: entry.source.clone().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
                found: true,
            };
        }

        let lower = base.to_lowercase();
        match BUILT_IN.iter().find(|(prefix, _, _)| lower.starts_with(prefix)) {
            Some(&(_, body, source)) => Definition {
                title: base.to_string(),
                body: body.to_string(),
                source: source.to_string(),
                found: true,
            },
            None => Definition {
                title: base.to_string(),
                body: NOT_FOUND_TEXT.to_string(),
                source: NOT_FOUND_SOURCE.to_string(),
                found: false,
            },
        }
    }
}

/// Try each source in order; the first one that fetches and decodes wins.
pub async fn load_first(sources: &[GlossarySource]) -> Option<Glossary> {
    for glossary_source in sources {
        let outcome = match source::fetch_text(&glossary_source.url).await {
            Ok(text) => match glossary_source.format {
                GlossaryFormat::Csv => Glossary::from_csv(&text),
                GlossaryFormat::Json => Glossary::from_json(&text),
            },
            Err(err) => Err(err),
        };
        match outcome {
            Ok(glossary) => {
                info!(url = %glossary_source.url, entries = glossary.len(), "glossary loaded");
                return Some(glossary);
            }
            Err(err) => warn!(url = %glossary_source.url, %err, "glossary source skipped"),
        }
    }
    None
}
