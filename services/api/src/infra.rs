use atelier_admissions::admissions::AdmissionsService;
use atelier_admissions::config::{NarrativeConfig, NarrativeModel};
use atelier_admissions::error::AppError;
use atelier_admissions::narrative::{NarrativeService, TemplateNarrator};
use atelier_admissions::roster::{InMemoryRoster, RosterImporter};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type RosterService = AdmissionsService<InMemoryRoster, InMemoryRoster>;

/// Seeded roster, extended with students from a roster export when one is given.
pub(crate) fn load_roster(csv: Option<&Path>) -> Result<InMemoryRoster, AppError> {
    let roster = InMemoryRoster::seeded();
    if let Some(path) = csv {
        let students = RosterImporter::from_path(path)?;
        let added = roster
            .insert_students(students)
            .map_err(|err| AppError::Service(err.into()))?;
        info!(path = %path.display(), added, "roster export imported");
    }
    Ok(roster)
}

pub(crate) fn build_narrator(config: &NarrativeConfig) -> Arc<dyn NarrativeService> {
    match config.model {
        NarrativeModel::Template => Arc::new(TemplateNarrator::new(config.max_chunk_chars)),
    }
}

pub(crate) fn build_service(
    roster: InMemoryRoster,
    narrative: &NarrativeConfig,
) -> Arc<RosterService> {
    let roster = Arc::new(roster);
    Arc::new(AdmissionsService::new(
        roster.clone(),
        roster,
        build_narrator(narrative),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_admissions::config::DEFAULT_MAX_CHUNK_CHARS;

    #[test]
    fn parse_date_accepts_padded_iso_dates() {
        let date = parse_date(" 2025-11-03 ").expect("date parses");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"));
        assert!(parse_date("03/11/2025").is_err());
    }

    #[test]
    fn missing_roster_export_is_reported() {
        let err = load_roster(Some(Path::new("does-not-exist.csv"))).unwrap_err();
        assert!(matches!(err, AppError::Import(_)));
    }

    #[test]
    fn service_boots_from_seed() {
        let service = build_service(
            load_roster(None).expect("seeded roster"),
            &NarrativeConfig {
                model: NarrativeModel::Template,
                max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            },
        );
        assert_eq!(service.students().expect("students").len(), 12);
    }
}
