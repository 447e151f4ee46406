//! Resolution of raw ads criterion identifiers to country and language codes.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

/// One row of the geo-target reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoTarget {
    pub criterion_id: i64,
    pub parent_id: Option<i64>,
    pub country_code: Option<String>,
}

/// One row of the language reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCode {
    pub criterion_id: i64,
    pub language_code: String,
}

/// Extracts the numeric id from strings such as `geoTargetConstants/2840`.
///
/// The id is the last `/`-separated segment; a bare number is accepted too.
pub fn parse_criterion_id(raw: &str) -> Option<i64> {
    raw.trim().rsplit('/').next()?.trim().parse().ok()
}

/// Parent geo id to country code, deduplicated.
#[derive(Debug, Clone, Default)]
pub struct GeoTargetLookup {
    by_parent: HashMap<i64, String>,
}

impl GeoTargetLookup {
    /// Builds the distinct `(parent_id, country_code)` mapping.
    ///
    /// A parent id seen with several country codes keeps the lexicographically
    /// smallest one, so the mapping stays many-to-one and deterministic.
    pub fn new(targets: &[GeoTarget]) -> Self {
        let mut distinct: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
        for target in targets {
            let (Some(parent_id), Some(country_code)) =
                (target.parent_id, target.country_code.as_deref())
            else {
                continue;
            };
            let country_code = country_code.trim();
            if country_code.is_empty() {
                continue;
            }
            let codes = distinct.entry(parent_id).or_default();
            if !codes.contains(&country_code) {
                codes.push(country_code);
            }
        }

        let mut by_parent = HashMap::with_capacity(distinct.len());
        for (parent_id, mut codes) in distinct {
            codes.sort_unstable();
            if codes.len() > 1 {
                warn!(
                    parent_id,
                    country_codes = ?codes,
                    "geo target parent maps to several country codes; keeping the smallest"
                );
            }
            by_parent.insert(parent_id, codes[0].to_string());
        }

        Self { by_parent }
    }

    pub fn resolve(&self, raw_criterion: &str) -> Option<&str> {
        let id = parse_criterion_id(raw_criterion)?;
        self.by_parent.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }
}

/// Language criterion id to language code.
#[derive(Debug, Clone, Default)]
pub struct LanguageLookup {
    by_criterion: HashMap<i64, String>,
}

impl LanguageLookup {
    pub fn new(languages: &[LanguageCode]) -> Self {
        let mut by_criterion = HashMap::with_capacity(languages.len());
        for language in languages {
            by_criterion
                .entry(language.criterion_id)
                .or_insert_with(|| language.language_code.trim().to_string());
        }
        Self { by_criterion }
    }

    pub fn resolve(&self, raw_criterion: &str) -> Option<&str> {
        let id = parse_criterion_id(raw_criterion)?;
        self.by_criterion.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_criterion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_criterion.is_empty()
    }
}
