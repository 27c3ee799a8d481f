use buildhub_timeline::config::EstimatorConfig;
use buildhub_timeline::workflows::batch::TimelineBatchImporter;
use buildhub_timeline::workflows::timeline::{PlotUnit, TimelineEstimator};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) estimator: Arc<TimelineEstimator>,
    pub(crate) default_plot_unit: PlotUnit,
}

impl AppState {
    pub(crate) fn new(
        readiness: Arc<AtomicBool>,
        metrics: PrometheusHandle,
        estimator: &EstimatorConfig,
    ) -> Self {
        Self {
            readiness,
            metrics: Arc::new(metrics),
            estimator: Arc::new(TimelineEstimator::standard()),
            default_plot_unit: estimator.default_plot_unit,
        }
    }

    pub(crate) fn batch_importer(&self) -> TimelineBatchImporter {
        TimelineBatchImporter::new(self.estimator.as_ref().clone(), self.default_plot_unit)
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(
        Arc::new(AtomicBool::new(true)),
        handle,
        &EstimatorConfig::default(),
    )
}
