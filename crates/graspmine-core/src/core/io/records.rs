use crate::core::grasp::GraspRecord;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordIoError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Writes one object's record collection as a JSON array.
pub fn save_records(path: &Path, records: &[GraspRecord]) -> Result<(), RecordIoError> {
    let content = serde_json::to_string(records).map_err(|e| RecordIoError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    std::fs::write(path, content).map_err(|e| RecordIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Reads a record collection written by [`save_records`].
pub fn load_records(path: &Path) -> Result<Vec<GraspRecord>, RecordIoError> {
    let content = std::fs::read_to_string(path).map_err(|e| RecordIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| RecordIoError::Json {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saved_collections_load_back_intact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glass.json");
        let records = vec![GraspRecord {
            pose: [0.0, 0.2, 0.0, 0.0, 0.0, 0.0, 1.0],
            dofs: vec![0.1; 20],
            contacts: vec![],
            epsilon: 0.4,
            volume: 0.2,
            links_in_contact: vec!["palm".to_string()],
            quality: 1.2,
            target_trans: Some([0.0, 0.1, 0.0]),
            target_pose: Some(vec![0.0; 48]),
        }];

        save_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].dofs, records[0].dofs);
        assert_eq!(loaded[0].links_in_contact, records[0].links_in_contact);
        assert_eq!(loaded[0].target_trans, Some([0.0, 0.1, 0.0]));
    }

    #[test]
    fn loading_a_missing_file_reports_the_path() {
        let dir = TempDir::new().unwrap();
        let err = load_records(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RecordIoError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
