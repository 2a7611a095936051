//! Serialized regressors exported by the training pipeline.
//!
//! Two shapes are understood: an ordinary linear model and a random forest of
//! regression trees stored as parallel node arrays (left/right child index,
//! split feature, threshold, leaf value). Both are validated once at load so
//! inference only has to check the input width.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrainedModel {
    Linear(LinearModel),
    RandomForest(Forest),
}

impl TrainedModel {
    /// Number of input features the model consumes.
    pub fn n_features(&self) -> usize {
        match self {
            TrainedModel::Linear(m) => m.coefficients.len(),
            TrainedModel::RandomForest(f) => f.n_features,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            TrainedModel::Linear(m) => m.validate(),
            TrainedModel::RandomForest(f) => f.validate(),
        }
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, ApiError> {
        if features.len() != self.n_features() {
            return Err(ApiError::Prediction(format!(
                "model expects {} features, got {}",
                self.n_features(),
                features.len()
            )));
        }

        let value = match self {
            TrainedModel::Linear(m) => m.predict(features),
            TrainedModel::RandomForest(f) => f.predict(features),
        };

        if !value.is_finite() {
            return Err(ApiError::Prediction(format!("non-finite output {value}")));
        }
        Ok(value)
    }
}

/// `y = intercept + sum(coefficients[i] * x[i])`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    fn validate(&self) -> Result<(), String> {
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("linear model has non-finite parameters".into());
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Averages the output of its trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl Forest {
    fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| format!("tree {i}: {reason}"))?;
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        total / self.trees.len() as f64
    }
}

/// Node `i` is a leaf when `children_left[i] == -1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

const LEAF: i64 = -1;

impl Tree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("empty tree".into());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("node arrays differ in length".into());
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }
            // Pre-order layout: children always come after their parent, which
            // also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let x = features[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: i64, threshold: f64, low: f64, high: f64) -> Tree {
        Tree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![0.0, low, high],
        }
    }

    #[test]
    fn linear_model_is_a_dot_product() {
        let model = TrainedModel::Linear(LinearModel {
            intercept: 10.0,
            coefficients: vec![2.0, -1.0, 0.5],
        });
        let y = model.predict(&[1.0, 4.0, 2.0]).unwrap();
        assert!((y - 9.0).abs() < 1e-12);
    }

    #[test]
    fn forest_averages_trees() {
        let model = TrainedModel::RandomForest(Forest {
            n_features: 2,
            trees: vec![stump(0, 0.5, 100.0, 200.0), stump(1, 0.0, 300.0, 500.0)],
        });
        model.validate().unwrap();

        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), 200.0);
        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), 350.0);
    }

    #[test]
    fn width_mismatch_is_a_prediction_error() {
        let model = TrainedModel::Linear(LinearModel {
            intercept: 0.0,
            coefficients: vec![1.0, 1.0],
        });
        assert!(matches!(model.predict(&[1.0]), Err(ApiError::Prediction(_))));
    }

    #[test]
    fn rejects_backward_child_links() {
        let mut tree = stump(0, 0.5, 1.0, 2.0);
        tree.children_right[0] = 0;
        let forest = Forest {
            n_features: 1,
            trees: vec![tree],
        };
        assert!(forest.validate().unwrap_err().contains("invalid child"));
    }

    #[test]
    fn rejects_out_of_range_split_feature() {
        let forest = Forest {
            n_features: 1,
            trees: vec![stump(3, 0.5, 1.0, 2.0)],
        };
        assert!(forest.validate().unwrap_err().contains("unknown feature"));
    }

    #[test]
    fn deserializes_tagged_json() {
        let model: TrainedModel = serde_json::from_str(
            r#"{"kind":"linear","intercept":1.5,"coefficients":[0.0,2.0]}"#,
        )
        .unwrap();
        assert_eq!(model.n_features(), 2);
    }

    #[test]
    fn deserializes_random_forest_json() {
        let model: TrainedModel = serde_json::from_str(
            r#"{
                "kind": "random_forest",
                "n_features": 2,
                "trees": [{
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [1, -2, -2],
                    "threshold": [0.5, -2.0, -2.0],
                    "value": [0.0, 120.0, 480.0]
                }]
            }"#,
        )
        .unwrap();

        model.validate().unwrap();
        assert!(matches!(model, TrainedModel::RandomForest(_)));
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.predict(&[9.0, 0.0]).unwrap(), 120.0);
        assert_eq!(model.predict(&[9.0, 1.0]).unwrap(), 480.0);
    }
}
