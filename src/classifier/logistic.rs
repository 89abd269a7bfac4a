//! Multinomial logistic regression trained at startup.

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::folds::StratifiedKFold;
use crate::error::{BanterError, Result};

/// Configuration for classifier training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Hard cap on optimizer iterations; exhausting it is a startup failure.
    pub max_iterations: usize,
    /// Convergence threshold on the gradient infinity norm.
    pub tolerance: f64,
    /// Initial gradient-descent step size.
    pub learning_rate: f64,
    /// Inverse regularization strength used when no cross-validation runs.
    pub regularization: f64,
    /// Upper bound on the number of cross-validation folds.
    pub max_folds: usize,
    /// Seed for the shuffled fold assignment.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            max_iterations: 10_000,
            tolerance: 1e-4,
            learning_rate: 1.0,
            regularization: 1.0,
            max_folds: 5,
            seed: 42,
        }
    }
}

/// Multinomial logistic regression over dense feature vectors.
///
/// Fit by batch gradient descent with an adaptive step size. The L2
/// penalty applies to the weights only; intercepts are unpenalized.
/// Immutable after fit, and prediction uses no shared scratch state, so a
/// trained model can serve concurrent reads.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Class labels, indexed by class id in first-seen order.
    labels: Vec<String>,
    /// Per-class weight vectors, `[n_classes][n_features]`.
    weights: Vec<Vec<f64>>,
    /// Per-class intercepts.
    intercepts: Vec<f64>,
}

impl LogisticRegression {
    /// Fit a model on the full training set at the configured
    /// regularization strength.
    pub fn fit(
        vectors: &[Vec<f64>],
        labels: &[String],
        config: &TrainingConfig,
    ) -> Result<LogisticRegression> {
        Self::fit_with_strength(vectors, labels, config.regularization, config)
    }

    /// Fit a model following the startup training policy.
    ///
    /// If the smallest label class is a singleton there is nothing to
    /// cross-validate, so this falls back to a plain [`fit`](Self::fit).
    /// Otherwise the regularization strength is chosen by stratified
    /// cross-validation over a log-spaced grid of 10 candidates, with
    /// `folds = min(max_folds, smallest class size)`, maximizing mean
    /// validation accuracy. Grid candidates are evaluated in parallel; ties
    /// break to the first candidate in grid order, so the selection is
    /// deterministic. The winner is refit on the full training set.
    pub fn fit_auto(
        vectors: &[Vec<f64>],
        labels: &[String],
        config: &TrainingConfig,
    ) -> Result<LogisticRegression> {
        let mut class_counts: AHashMap<&str, usize> = AHashMap::new();
        for label in labels {
            *class_counts.entry(label.as_str()).or_insert(0) += 1;
        }
        let min_class_size = class_counts
            .values()
            .copied()
            .min()
            .ok_or_else(|| BanterError::training("no training samples"))?;

        if min_class_size < 2 {
            log::debug!("singleton label class, fitting without cross-validation");
            return Self::fit(vectors, labels, config);
        }

        let n_folds = config.max_folds.min(min_class_size);
        let folds = StratifiedKFold::new(n_folds, config.seed)?.split(labels)?;
        let grid = regularization_grid();

        let scores = grid
            .par_iter()
            .map(|&strength| cross_val_accuracy(vectors, labels, &folds, strength, config))
            .collect::<Result<Vec<f64>>>()?;

        let mut best_idx = 0;
        for (idx, &score) in scores.iter().enumerate() {
            if score > scores[best_idx] {
                best_idx = idx;
            }
        }
        let best_strength = grid[best_idx];
        log::debug!(
            "cross-validation over {n_folds} folds selected regularization strength \
             {best_strength} (accuracy {:.3})",
            scores[best_idx]
        );

        Self::fit_with_strength(vectors, labels, best_strength, config)
    }

    /// Predict the label for a feature vector.
    ///
    /// Deterministic argmax over the per-class scores; the first maximum
    /// wins. No probability threshold is applied.
    pub fn predict(&self, features: &[f64]) -> &str {
        let mut best_class = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, (weights, intercept)) in
            self.weights.iter().zip(&self.intercepts).enumerate()
        {
            let score = dot(weights, features) + intercept;
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }
        &self.labels[best_class]
    }

    /// Class labels known to the model, in class-id order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn fit_with_strength(
        vectors: &[Vec<f64>],
        labels: &[String],
        strength: f64,
        config: &TrainingConfig,
    ) -> Result<LogisticRegression> {
        if vectors.is_empty() {
            return Err(BanterError::training("no training samples"));
        }
        if vectors.len() != labels.len() {
            return Err(BanterError::training(format!(
                "{} vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        let n_features = vectors[0].len();
        if n_features == 0 {
            return Err(BanterError::training("feature vectors are empty"));
        }
        if vectors.iter().any(|v| v.len() != n_features) {
            return Err(BanterError::training("inconsistent feature dimensions"));
        }

        // Map labels to dense class ids in first-seen order.
        let mut class_ids: AHashMap<&str, usize> = AHashMap::new();
        let mut class_labels: Vec<String> = Vec::new();
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| {
                *class_ids.entry(label.as_str()).or_insert_with(|| {
                    class_labels.push(label.clone());
                    class_labels.len() - 1
                })
            })
            .collect();
        let n_classes = class_labels.len();
        let n_samples = vectors.len();

        let mut weights = vec![vec![0.0; n_features]; n_classes];
        let mut intercepts = vec![0.0; n_classes];
        let mut step = config.learning_rate;

        let (mut loss, mut grad_w, mut grad_b) = evaluate(
            vectors, &targets, &weights, &intercepts, n_classes, strength,
        );

        for _ in 0..config.max_iterations {
            let grad_norm = gradient_inf_norm(&grad_w, &grad_b);
            if grad_norm < config.tolerance {
                return Ok(LogisticRegression {
                    labels: class_labels,
                    weights,
                    intercepts,
                });
            }

            let candidate_w: Vec<Vec<f64>> = weights
                .iter()
                .zip(&grad_w)
                .map(|(row, grad)| {
                    row.iter()
                        .zip(grad)
                        .map(|(w, g)| w - step * g)
                        .collect()
                })
                .collect();
            let candidate_b: Vec<f64> = intercepts
                .iter()
                .zip(&grad_b)
                .map(|(b, g)| b - step * g)
                .collect();

            let (candidate_loss, candidate_gw, candidate_gb) = evaluate(
                vectors, &targets, &candidate_w, &candidate_b, n_classes, strength,
            );

            if candidate_loss <= loss {
                weights = candidate_w;
                intercepts = candidate_b;
                loss = candidate_loss;
                grad_w = candidate_gw;
                grad_b = candidate_gb;
                step = (step * 1.1).min(100.0);
            } else {
                step *= 0.5;
                if step < 1e-12 {
                    return Err(BanterError::training(format!(
                        "optimizer stalled at gradient norm {grad_norm:.3e} \
                         for {n_samples} samples"
                    )));
                }
            }
        }

        Err(BanterError::training(format!(
            "failed to converge within {} iterations (gradient norm {:.3e})",
            config.max_iterations,
            gradient_inf_norm(&grad_w, &grad_b)
        )))
    }
}

/// The log-spaced grid of candidate regularization strengths, 1e-4 to 1e4.
fn regularization_grid() -> Vec<f64> {
    (0..10)
        .map(|i| 10f64.powf(-4.0 + 8.0 * i as f64 / 9.0))
        .collect()
}

/// Mean validation accuracy of a model at the given strength across folds.
fn cross_val_accuracy(
    vectors: &[Vec<f64>],
    labels: &[String],
    folds: &[Vec<usize>],
    strength: f64,
    config: &TrainingConfig,
) -> Result<f64> {
    let mut total_accuracy = 0.0;

    for test_fold in folds {
        let in_test: Vec<bool> = {
            let mut mask = vec![false; vectors.len()];
            for &idx in test_fold {
                mask[idx] = true;
            }
            mask
        };

        let mut train_vectors = Vec::with_capacity(vectors.len() - test_fold.len());
        let mut train_labels = Vec::with_capacity(vectors.len() - test_fold.len());
        for (idx, vector) in vectors.iter().enumerate() {
            if !in_test[idx] {
                train_vectors.push(vector.clone());
                train_labels.push(labels[idx].clone());
            }
        }

        let model =
            LogisticRegression::fit_with_strength(&train_vectors, &train_labels, strength, config)?;

        let correct = test_fold
            .iter()
            .filter(|&&idx| model.predict(&vectors[idx]) == labels[idx])
            .count();
        total_accuracy += correct as f64 / test_fold.len() as f64;
    }

    Ok(total_accuracy / folds.len() as f64)
}

/// Compute the regularized cross-entropy loss and its gradients.
fn evaluate(
    vectors: &[Vec<f64>],
    targets: &[usize],
    weights: &[Vec<f64>],
    intercepts: &[f64],
    n_classes: usize,
    strength: f64,
) -> (f64, Vec<Vec<f64>>, Vec<f64>) {
    let n_samples = vectors.len() as f64;
    let n_features = vectors[0].len();
    let penalty = 1.0 / (strength * n_samples);

    let mut loss = 0.0;
    let mut grad_w = vec![vec![0.0; n_features]; n_classes];
    let mut grad_b = vec![0.0; n_classes];

    for (vector, &target) in vectors.iter().zip(targets) {
        let probabilities = softmax(
            &(0..n_classes)
                .map(|class| dot(&weights[class], vector) + intercepts[class])
                .collect::<Vec<f64>>(),
        );

        loss -= probabilities[target].max(f64::MIN_POSITIVE).ln();

        for (class, &probability) in probabilities.iter().enumerate() {
            let residual = probability - if class == target { 1.0 } else { 0.0 };
            for (j, &x) in vector.iter().enumerate() {
                grad_w[class][j] += residual * x;
            }
            grad_b[class] += residual;
        }
    }

    loss /= n_samples;
    for (class, row) in grad_w.iter_mut().enumerate() {
        for (j, grad) in row.iter_mut().enumerate() {
            *grad = *grad / n_samples + penalty * weights[class][j];
            loss += 0.5 * penalty * weights[class][j] * weights[class][j];
        }
    }
    for grad in &mut grad_b {
        *grad /= n_samples;
    }

    (loss, grad_w, grad_b)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn gradient_inf_norm(grad_w: &[Vec<f64>], grad_b: &[f64]) -> f64 {
    let weight_max = grad_w
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, &g| acc.max(g.abs()));
    grad_b.iter().fold(weight_max, |acc, &g| acc.max(g.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Two cleanly separable classes on disjoint features.
    fn separable_data() -> (Vec<Vec<f64>>, Vec<String>) {
        let vectors = vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![2.0, 1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 2.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ];
        let labels = strings(&["greet", "greet", "greet", "bye", "bye", "bye"]);
        (vectors, labels)
    }

    #[test]
    fn test_fit_separates_classes() {
        let (vectors, labels) = separable_data();
        let model =
            LogisticRegression::fit(&vectors, &labels, &TrainingConfig::default()).unwrap();

        for (vector, label) in vectors.iter().zip(&labels) {
            assert_eq!(model.predict(vector), label);
        }
    }

    #[test]
    fn test_single_class_predicts_it() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = strings(&["only", "only"]);
        let model =
            LogisticRegression::fit(&vectors, &labels, &TrainingConfig::default()).unwrap();

        assert_eq!(model.predict(&[5.0, 5.0]), "only");
        assert_eq!(model.labels(), &["only".to_string()]);
    }

    #[test]
    fn test_fit_auto_with_singleton_class_skips_cv() {
        let vectors = vec![vec![1.0, 0.0], vec![1.5, 0.0], vec![0.0, 1.0]];
        let labels = strings(&["greet", "greet", "bye"]);
        let model =
            LogisticRegression::fit_auto(&vectors, &labels, &TrainingConfig::default()).unwrap();

        assert_eq!(model.predict(&[1.0, 0.0]), "greet");
        assert_eq!(model.predict(&[0.0, 1.0]), "bye");
    }

    #[test]
    fn test_fit_auto_cross_validated() {
        let (vectors, labels) = separable_data();
        let model =
            LogisticRegression::fit_auto(&vectors, &labels, &TrainingConfig::default()).unwrap();

        for (vector, label) in vectors.iter().zip(&labels) {
            assert_eq!(model.predict(vector), label);
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let (vectors, labels) = separable_data();
        let config = TrainingConfig::default();
        let first = LogisticRegression::fit_auto(&vectors, &labels, &config).unwrap();
        let second = LogisticRegression::fit_auto(&vectors, &labels, &config).unwrap();

        for vector in &vectors {
            assert_eq!(first.predict(vector), second.predict(vector));
        }
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let vectors = vec![vec![1.0]];
        let labels = strings(&["a", "b"]);
        assert!(LogisticRegression::fit(&vectors, &labels, &TrainingConfig::default()).is_err());
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let result = LogisticRegression::fit(&[], &[], &TrainingConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_regularization_grid_shape() {
        let grid = regularization_grid();
        assert_eq!(grid.len(), 10);
        assert!((grid[0] - 1e-4).abs() < 1e-12);
        assert!((grid[9] - 1e4).abs() < 1e-6);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }
}
