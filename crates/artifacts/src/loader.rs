use crate::documents::{EventStudy, EventStudyDocument, RankMatrixDocument, ReturnSeriesDocument};
use crate::error::ArtifactError;
use core_types::{RankMatrix, ReturnSeries};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads and deserializes one JSON artifact from disk.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), "Loaded artifact.");
    Ok(document)
}

/// The caller-side identifier for an artifact: its file stem.
fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Loads a return series, labelled by its file stem if the document carries no label.
pub fn load_return_series(path: impl AsRef<Path>) -> Result<ReturnSeries, ArtifactError> {
    let path = path.as_ref();
    let document: ReturnSeriesDocument = read_document(path)?;
    Ok(document.into_series(&file_label(path)))
}

pub fn load_event_study(path: impl AsRef<Path>) -> Result<EventStudy, ArtifactError> {
    let path = path.as_ref();
    let document: EventStudyDocument = read_document(path)?;
    Ok(document.into_study(&file_label(path)))
}

pub fn load_rank_matrix(path: impl AsRef<Path>) -> Result<RankMatrix, ArtifactError> {
    let document: RankMatrixDocument = read_document(path.as_ref())?;
    Ok(document.into_matrix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_series_with_file_stem_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "momentum.json",
            r#"{"dates": ["2020-01-02", "2020-01-03"], "returns": [0.01, -0.01]}"#,
        );
        let series = load_return_series(&path).unwrap();
        assert_eq!(series.label, "momentum");
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn loads_event_study_and_rank_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let events = write_temp(
            &dir,
            "global_wave.json",
            r#"{"label": "Wave", "summary": {
                "trough": {"eventCount": 1, "avg6m": 0.1, "avg12m": 0.2},
                "peak": {"eventCount": 0, "avg6m": null, "avg12m": null}},
                "events": [{"kind": "trough", "date": "2020-03-23", "r6m": 0.1, "r12m": 0.2}]}"#,
        );
        let ranks = write_temp(
            &dir,
            "ranking.json",
            r#"{"months": ["2020-01"], "rankedLabelsByMonth": [["A"]],
                "rankedValuesByMonth": [[0.1]]}"#,
        );

        let study = load_event_study(&events).unwrap();
        assert_eq!(study.label, "Wave");
        assert_eq!(study.events.len(), 1);

        let matrix = load_rank_matrix(&ranks).unwrap();
        assert_eq!(matrix.categories, vec!["A"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_return_series(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "broken.json", "{ not json");
        let err = load_rank_matrix(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::JsonError(_)));
    }
}
