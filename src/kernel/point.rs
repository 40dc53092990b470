//! A labeled latent vector pinned to a 2-D canvas position.

use serde::{Deserialize, Serialize};

/// 2-D canvas coordinate `[x, y]`.
pub type Position = [f64; 2];

/// A single (label, vector, position) triple.
///
/// The vector may be absent: a point can be placed on the canvas before an
/// encoding for it exists. Such points still take part in sampling weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatentPoint {
    /// Free-form text identifier (prompt, name, ...). Not unique.
    pub label: String,
    /// Owned latent encoding, if one has been supplied.
    pub vector: Option<Vec<f64>>,
    /// Canvas position, `[0.0, 0.0]` unless given.
    #[serde(default)]
    pub position: Position,
}

impl LatentPoint {
    pub fn new(label: impl Into<String>, vector: Option<Vec<f64>>, position: Option<Position>) -> Self {
        Self {
            label: label.into(),
            vector,
            position: position.unwrap_or([0.0, 0.0]),
        }
    }

    /// Relocate the point on the canvas.
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    /// Dimensionality of the encoding, if any.
    pub fn dimensions(&self) -> Option<usize> {
        self.vector.as_ref().map(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let p = LatentPoint::new("face", Some(vec![1.0, 2.0]), None);
        assert_eq!(p.position, [0.0, 0.0]);
        assert_eq!(p.dimensions(), Some(2));
    }

    #[test]
    fn test_move_to() {
        let mut p = LatentPoint::new("face", None, Some([0.5, 0.5]));
        p.move_to([1.0, -2.0]);
        assert_eq!(p.position, [1.0, -2.0]);
        assert!(!p.has_vector());
    }

    #[test]
    fn test_json_shape() {
        let p: LatentPoint =
            serde_json::from_str(r#"{"label": "a", "vector": null}"#).unwrap();
        assert_eq!(p.position, [0.0, 0.0]);
        assert!(p.vector.is_none());

        let json = serde_json::to_value(LatentPoint::new("b", Some(vec![0.25]), Some([1.0, 2.0]))).unwrap();
        assert_eq!(json["vector"][0], 0.25);
        assert_eq!(json["position"][1], 2.0);
    }
}
