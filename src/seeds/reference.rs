//! Reference table seeding from the public ads CSV exports
//!
//! Reads the geo-target and language-code exports and replaces the
//! reference tables with their content.

use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::error::PipelineError;
use crate::models::{geo_target, language_code};
use crate::repositories::ReferenceRepository;

#[derive(Debug, Deserialize)]
struct GeoTargetRecord {
    #[serde(rename = "Criteria ID")]
    criteria_id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Canonical Name")]
    canonical_name: String,
    #[serde(rename = "Parent ID", default)]
    parent_id: Option<i64>,
    #[serde(rename = "Country Code", default)]
    country_code: Option<String>,
    #[serde(rename = "Target Type", default)]
    target_type: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguageCodeRecord {
    #[serde(rename = "Language name")]
    language_name: String,
    #[serde(rename = "Language code")]
    language_code: String,
    #[serde(rename = "Criterion ID")]
    criterion_id: i64,
}

/// Row counts written by [`seed_reference_tables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSeedSummary {
    pub geo_targets: usize,
    pub language_codes: usize,
}

/// Parses the geo-target export.
pub fn read_geo_targets(path: &Path) -> Result<Vec<geo_target::Model>, PipelineError> {
    read_records::<GeoTargetRecord>(path)?
        .into_iter()
        .map(|(line, record)| {
            let name = record.name.trim().to_string();
            if name.is_empty() {
                return Err(PipelineError::ReferenceRecord {
                    path: path.to_path_buf(),
                    line,
                    message: "Name is empty".to_string(),
                });
            }
            Ok(geo_target::Model {
                criterion_id: record.criteria_id,
                name,
                canonical_name: record.canonical_name,
                parent_id: record.parent_id,
                country_code: non_empty(record.country_code),
                target_type: non_empty(record.target_type),
                status: non_empty(record.status),
            })
        })
        .collect()
}

/// Parses the language-code export.
pub fn read_language_codes(path: &Path) -> Result<Vec<language_code::Model>, PipelineError> {
    read_records::<LanguageCodeRecord>(path)?
        .into_iter()
        .map(|(line, record)| {
            let code = record.language_code.trim().to_string();
            if code.is_empty() {
                return Err(PipelineError::ReferenceRecord {
                    path: path.to_path_buf(),
                    line,
                    message: "Language code is empty".to_string(),
                });
            }
            Ok(language_code::Model {
                criterion_id: record.criterion_id,
                language_name: record.language_name,
                language_code: code,
            })
        })
        .collect()
}

/// Loads both exports and replaces the reference tables in one transaction.
///
/// Both files are parsed before anything is written, so a malformed file
/// leaves the stored tables untouched.
pub async fn seed_reference_tables(
    db: &DatabaseConnection,
    geo_targets_csv: &Path,
    language_codes_csv: &Path,
) -> Result<ReferenceSeedSummary, PipelineError> {
    let geo_targets = read_geo_targets(geo_targets_csv)?;
    let languages = read_language_codes(language_codes_csv)?;
    let summary = ReferenceSeedSummary {
        geo_targets: geo_targets.len(),
        language_codes: languages.len(),
    };

    ReferenceRepository::new(Arc::new(db.clone()))
        .replace_all(geo_targets, languages)
        .await?;

    log::info!(
        "Loaded {} geo targets from {} and {} language codes from {}",
        summary.geo_targets,
        geo_targets_csv.display(),
        summary.language_codes,
        language_codes_csv.display()
    );

    Ok(summary)
}

fn read_records<T>(path: &Path) -> Result<Vec<(u64, T)>, PipelineError>
where
    T: for<'de> Deserialize<'de>,
{
    let file_error = |source: csv::Error| PipelineError::ReferenceFile {
        path: path.to_path_buf(),
        source,
    };
    let record_error = |line: u64, err: csv::Error| PipelineError::ReferenceRecord {
        path: path.to_path_buf(),
        line,
        message: err.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(file_error)?;
    let headers = reader.headers().map_err(file_error)?.clone();

    let mut records = Vec::new();
    let mut raw = StringRecord::new();
    loop {
        match reader.read_record(&mut raw) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                let line = err
                    .position()
                    .map(|position| position.line())
                    .unwrap_or_else(|| reader.position().line());
                return Err(record_error(line, err));
            }
        }

        // Start line of the record; quoted fields may span several lines.
        let line = raw
            .position()
            .map(|position| position.line())
            .unwrap_or_else(|| reader.position().line());
        let record = raw
            .deserialize::<T>(Some(&headers))
            .map_err(|err| record_error(line, err))?;
        records.push((line, record));
    }
    Ok(records)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn geo_export_parses_optional_columns() {
        let file = write_csv(
            "Criteria ID,Name,Canonical Name,Parent ID,Country Code,Target Type,Status\n\
             2840,United States,United States,,US,Country,Active\n\
             21137,California,\"California,United States\",2840,US,State,Active\n",
        );
        let rows = read_geo_targets(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parent_id, None);
        assert_eq!(rows[1].parent_id, Some(2840));
        assert_eq!(rows[1].canonical_name, "California,United States");
        assert_eq!(rows[1].country_code.as_deref(), Some("US"));
    }

    #[test]
    fn language_export_parses() {
        let file = write_csv("Language name,Language code,Criterion ID\nEnglish,en,1000\nGerman,de,1001\n");
        let rows = read_language_codes(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].language_code, "de");
        assert_eq!(rows[1].criterion_id, 1001);
    }

    #[test]
    fn malformed_row_reports_its_line() {
        let file = write_csv("Language name,Language code,Criterion ID\nEnglish,en,1000\nGerman,de,not-a-number\n");
        let err = read_language_codes(file.path()).unwrap_err();
        match err {
            PipelineError::ReferenceRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn multiline_quoted_field_keeps_line_numbers_exact() {
        let file = write_csv(
            "Criteria ID,Name,Canonical Name,Parent ID,Country Code,Target Type,Status\n\
             1006886,Lyon,\"Lyon,\nFrance\",2250,FR,City,Active\n\
             1006887,,\"Unnamed,France\",2250,FR,City,Active\n",
        );
        let err = read_geo_targets(file.path()).unwrap_err();
        match err {
            PipelineError::ReferenceRecord { line, message, .. } => {
                assert_eq!(line, 4);
                assert_eq!(message, "Name is empty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let err = read_geo_targets(Path::new("/nonexistent/geo_targets.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::ReferenceFile { .. }));
    }
}
