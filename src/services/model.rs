use crate::models::{FeatureVector, FEATURE_COUNT};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while decoding or evaluating a fare model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("artifact is not valid model JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model expects {found} features, encoder produces {expected}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A trained regressor predicting `ln(1 + fare)` from an encoded itinerary
pub trait FareRegressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Model family, for logs and health output
    fn name(&self) -> &str;
}

/// On-disk model artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(ForestModel),
    Linear(LinearModel),
}

/// Mean of independently grown regression trees
#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

/// One regression tree in flattened node-array form
///
/// Node `i` is a leaf when `children_left[i] == -1`. Otherwise samples with
/// `x[feature[i]] <= threshold[i]` descend left.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub n_features: usize,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

const LEAF: i64 = -1;

/// Decode and structurally check an artifact, returning a shareable handle
pub fn load_artifact(bytes: &[u8]) -> Result<Arc<dyn FareRegressor>, ModelError> {
    let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
    match artifact {
        ModelArtifact::RandomForest(forest) => {
            forest.check()?;
            Ok(Arc::new(forest))
        }
        ModelArtifact::Linear(linear) => {
            linear.check()?;
            Ok(Arc::new(linear))
        }
    }
}

fn check_schema(n_features: usize) -> Result<(), ModelError> {
    if n_features != FEATURE_COUNT {
        return Err(ModelError::SchemaMismatch {
            expected: FEATURE_COUNT,
            found: n_features,
        });
    }
    Ok(())
}

impl ForestModel {
    fn check(&self) -> Result<(), ModelError> {
        check_schema(self.n_features)?;
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features)
                .map_err(|reason| ModelError::Malformed(format!("tree {}: {}", i, reason)))?;
        }
        Ok(())
    }
}

impl RegressionTree {
    fn check(&self, n_features: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("no nodes".into());
        }
        if [self.children_right.len(), self.feature.len(), self.threshold.len(), self.value.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err("node arrays differ in length".into());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {} has only a right child", node));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {} has non-finite value", node));
                }
                continue;
            }

            // Children always come after their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!("node {} splits on feature {}", node, feature));
            }
        }
        Ok(())
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

impl FareRegressor for ForestModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(ModelError::Inference(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

impl LinearModel {
    fn check(&self) -> Result<(), ModelError> {
        check_schema(self.n_features)?;
        if self.coefficients.len() != self.n_features {
            return Err(ModelError::Malformed(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.n_features
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Malformed("non-finite weights".into()));
        }
        Ok(())
    }
}

impl FareRegressor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.as_slice();
        if x.len() != self.coefficients.len() {
            return Err(ModelError::Inference(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                x.len()
            )));
        }
        let dot: f64 = self.coefficients.iter().zip(x).map(|(w, v)| w * v).sum();
        Ok(self.intercept + dot)
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vector_with(index: usize, value: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[index] = value;
        FeatureVector::new(values)
    }

    // Splits on travel class (feature 3): economy -> 8.0, business -> 10.0
    fn class_stump() -> serde_json::Value {
        json!({
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [3, -2, -2],
            "threshold": [0.5, -2.0, -2.0],
            "value": [9.0, 8.0, 10.0]
        })
    }

    #[test]
    fn test_forest_averages_trees() {
        let artifact = json!({
            "kind": "random_forest",
            "n_features": FEATURE_COUNT,
            "trees": [
                class_stump(),
                {
                    "children_left": [-1],
                    "children_right": [-1],
                    "feature": [-2],
                    "threshold": [-2.0],
                    "value": [6.0]
                }
            ]
        });
        let model = load_artifact(artifact.to_string().as_bytes()).unwrap();
        assert_eq!(model.name(), "random_forest");
        assert_eq!(model.predict(&vector_with(3, 0.0)).unwrap(), 7.0);
        assert_eq!(model.predict(&vector_with(3, 1.0)).unwrap(), 8.0);
    }

    #[test]
    fn test_linear_model() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[4] = 0.5;
        let artifact = json!({
            "kind": "linear",
            "n_features": FEATURE_COUNT,
            "intercept": 1.0,
            "coefficients": coefficients
        });
        let model = load_artifact(artifact.to_string().as_bytes()).unwrap();
        assert_eq!(model.predict(&vector_with(4, 4.0)).unwrap(), 3.0);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let artifact = json!({
            "kind": "linear",
            "n_features": 20,
            "intercept": 0.0,
            "coefficients": vec![0.0; 20]
        });
        assert!(matches!(
            load_artifact(artifact.to_string().as_bytes()),
            Err(ModelError::SchemaMismatch { expected: 21, found: 20 })
        ));
    }

    #[test]
    fn test_cyclic_tree_rejected() {
        let artifact = json!({
            "kind": "random_forest",
            "n_features": FEATURE_COUNT,
            "trees": [{
                "children_left": [1, 0],
                "children_right": [1, -1],
                "feature": [0, 0],
                "threshold": [0.0, 0.0],
                "value": [0.0, 0.0]
            }]
        });
        assert!(matches!(
            load_artifact(artifact.to_string().as_bytes()),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(load_artifact(b"\x80\x04pickle"), Err(ModelError::Decode(_))));
    }
}
