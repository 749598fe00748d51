use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::anim::DeformationRecord;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read rig file: {0}")]
    IoFailure(#[from] std::io::Error),
    #[error("rig file is not valid JSON: {0}")]
    ParseFailure(serde_json::Error),
    #[error("malformed rig document: {0}")]
    MalformedDocument(String),
}

impl LoadError {
    /// serde_json folds transport, grammar and shape problems into one error
    /// type; split them back out so callers see the load taxonomy directly.
    fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Io => LoadError::IoFailure(err.into()),
            Category::Data => LoadError::MalformedDocument(err.to_string()),
            Category::Syntax | Category::Eof => LoadError::ParseFailure(err),
        }
    }
}

/// One exported rig, keyed the way the producing tool writes it: flat
/// attribute arrays plus the per-(frame, bone) deformation records.
///
/// The arrays are raw and unchecked here. Shape validation happens when the
/// document is assembled into a [`RigMesh`](crate::mesh::RigMesh) and an
/// [`AnimationClip`](crate::anim::AnimationClip).
#[derive(Debug, Clone, Deserialize)]
pub struct RigDocument {
    /// Vertex positions, 3 floats per vertex.
    pub pos: Vec<f32>,
    /// Bone ids, 4 per vertex, -1 marks an unused slot.
    pub indices: Vec<i32>,
    /// Bone weights, 4 per vertex.
    pub weight: Vec<f32>,
    /// Triangle vertex indices, 3 per triangle.
    pub f: Vec<u32>,
    /// One 12-float record per (frame, bone) pair, frame-major.
    pub deformation: Vec<DeformationRecord>,
}

impl RigDocument {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(LoadError::from_json)
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(LoadError::from_json)
    }

    /// Vertex count implied by `pos`; only meaningful once the document has
    /// passed mesh assembly.
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_failure() {
        let err = RigDocument::open(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::IoFailure(_)), "{err:?}");
    }

    #[test]
    fn invalid_json_is_a_parse_failure() {
        let err = RigDocument::from_json("pos: [0, 1").unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure(_)), "{err:?}");
    }

    #[test]
    fn truncated_json_is_a_parse_failure() {
        let err = RigDocument::from_json(r#"{"pos": [0.0, 1.0"#).unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure(_)), "{err:?}");
    }

    #[test]
    fn missing_keys_are_a_malformed_document() {
        let err = RigDocument::from_json(r#"{"pos": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn mistyped_fields_are_a_malformed_document() {
        let err = RigDocument::from_json(
            r#"{"pos": "zero", "indices": [], "weight": [], "f": [], "deformation": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn arrays_survive_in_input_order() {
        let doc = RigDocument::from_json(
            r#"{
                "pos": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
                "indices": [0, -1, -1, -1, 1, 0, -1, -1],
                "weight": [1.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0],
                "f": [0, 1, 0],
                "deformation": [[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.vertex_count(), 2);
        assert_eq!(doc.pos[3], 3.0);
        assert_eq!(doc.indices, vec![0, -1, -1, -1, 1, 0, -1, -1]);
        assert_eq!(doc.weight[4], 0.5);
        assert_eq!(doc.f, vec![0, 1, 0]);
        assert_eq!(doc.deformation.len(), 1);
    }
}
