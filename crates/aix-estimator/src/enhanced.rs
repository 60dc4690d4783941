// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier estimation: the local heuristic refined by the remote analysis oracle.
//!
//! The oracle's answer is blended with the heuristic when it is usable. An
//! oracle error, an empty answer, or non-finite numbers all resolve to the
//! heuristic estimate unchanged; nothing is propagated to the caller.

use std::sync::Arc;

use aix_core::{AnalysisReport, AnalysisService, EstimateSource, Estimator, ResourceEstimate};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::basic::ResourceEstimator;

/// Weight of the local heuristic in a blended estimate.
pub const LOCAL_WEIGHT: f64 = 0.3;
/// Weight of the remote analysis in a blended estimate.
pub const REMOTE_WEIGHT: f64 = 0.7;

/// Estimator that consults an [`AnalysisService`] and falls back to the heuristic.
#[derive(Clone)]
pub struct EnhancedResourceEstimator {
    basic: ResourceEstimator,
    oracle: Arc<dyn AnalysisService>,
}

impl EnhancedResourceEstimator {
    pub fn new(oracle: Arc<dyn AnalysisService>) -> Self {
        Self {
            basic: ResourceEstimator::new(),
            oracle,
        }
    }

    /// Estimates `text`, blending in the oracle's answer when one is usable.
    pub async fn estimate_enhanced(&self, text: &str) -> ResourceEstimate {
        let basic = self.basic.estimate(text);

        match self.oracle.analyze(text).await {
            Ok(Some(report)) if is_usable(&report) => {
                debug!(
                    remote_cpu = report.cpu_usage,
                    remote_gpu = report.gpu_usage,
                    "blending analysis result"
                );
                blend(&basic, report)
            }
            Ok(Some(_)) => {
                warn!("analysis result has non-finite usage, falling back to basic estimation");
                basic
            }
            Ok(None) => {
                warn!("analysis service returned no data, falling back to basic estimation");
                basic
            }
            Err(e) => {
                warn!(error = %e, "analysis failed, falling back to basic estimation");
                basic
            }
        }
    }
}

#[async_trait]
impl Estimator for EnhancedResourceEstimator {
    async fn estimate(&self, text: &str) -> ResourceEstimate {
        self.estimate_enhanced(text).await
    }
}

fn is_usable(report: &AnalysisReport) -> bool {
    report.cpu_usage.is_finite() && report.gpu_usage.is_finite()
}

/// Weighted blend of a basic estimate and an analysis report.
///
/// The oracle's auxiliary fields pass through unmodified.
pub fn blend(basic: &ResourceEstimate, report: AnalysisReport) -> ResourceEstimate {
    ResourceEstimate {
        cpu_usage: basic.cpu_usage * LOCAL_WEIGHT + report.cpu_usage * REMOTE_WEIGHT,
        gpu_usage: basic.gpu_usage * LOCAL_WEIGHT + report.gpu_usage * REMOTE_WEIGHT,
        memory_usage: report.memory_usage,
        token_count: report.token_count,
        complexity_score: report.complexity_score,
        estimated_cost: report.estimated_cost,
        source: EstimateSource::Enhanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aix_test_utils::MockAnalysisService;
    use tracing_test::traced_test;

    const TEXT: &str = "1. **Parse** the request\n2. **Answer** it";

    fn report(cpu: f64, gpu: f64) -> AnalysisReport {
        AnalysisReport {
            cpu_usage: cpu,
            gpu_usage: gpu,
            memory_usage: Some(1024.0),
            token_count: Some(320),
            complexity_score: Some(0.4),
            estimated_cost: Some(0.02),
        }
    }

    #[tokio::test]
    async fn blends_remote_result() {
        let oracle = Arc::new(MockAnalysisService::with_report(report(50.0, 80.0)));
        let estimator = EnhancedResourceEstimator::new(oracle.clone());

        let basic = ResourceEstimator::new().estimate(TEXT);
        let est = estimator.estimate_enhanced(TEXT).await;

        assert_eq!(est.source, EstimateSource::Enhanced);
        assert!((est.cpu_usage - (basic.cpu_usage * 0.3 + 50.0 * 0.7)).abs() < 1e-9);
        assert!((est.gpu_usage - (basic.gpu_usage * 0.3 + 80.0 * 0.7)).abs() < 1e-9);
        assert_eq!(est.memory_usage, Some(1024.0));
        assert_eq!(est.token_count, Some(320));
        assert_eq!(est.complexity_score, Some(0.4));
        assert_eq!(est.estimated_cost, Some(0.02));
        assert_eq!(oracle.calls().await, vec![TEXT.to_string()]);
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_returns_basic_estimate() {
        let oracle = Arc::new(MockAnalysisService::failing("connection refused"));
        let estimator = EnhancedResourceEstimator::new(oracle);

        let est = estimator.estimate_enhanced(TEXT).await;

        assert_eq!(est, ResourceEstimator::new().estimate(TEXT));
        assert_eq!(est.source, EstimateSource::Basic);
        assert!(logs_contain("falling back to basic estimation"));
    }

    #[tokio::test]
    async fn no_data_returns_basic_estimate() {
        let oracle = Arc::new(MockAnalysisService::empty());
        let estimator = EnhancedResourceEstimator::new(oracle);

        let est = estimator.estimate_enhanced(TEXT).await;
        assert_eq!(est, ResourceEstimator::new().estimate(TEXT));
    }

    #[tokio::test]
    async fn non_finite_result_returns_basic_estimate() {
        let oracle = Arc::new(MockAnalysisService::with_report(report(f64::NAN, 10.0)));
        let estimator = EnhancedResourceEstimator::new(oracle);

        let est = estimator.estimate_enhanced(TEXT).await;
        assert_eq!(est.source, EstimateSource::Basic);
    }

    #[tokio::test]
    async fn works_through_estimator_trait() {
        let oracle = Arc::new(MockAnalysisService::with_report(report(10.0, 10.0)));
        let estimator: Arc<dyn Estimator> = Arc::new(EnhancedResourceEstimator::new(oracle));
        let est = estimator.estimate("").await;
        // Empty text: basic is zero, so only the remote share remains.
        assert!((est.cpu_usage - 7.0).abs() < 1e-9);
        assert!((est.gpu_usage - 7.0).abs() < 1e-9);
    }
}
