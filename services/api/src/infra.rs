use green_lending::workflows::loan::WasteManagementTier;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_waste_tier(raw: &str) -> Result<WasteManagementTier, String> {
    WasteManagementTier::from_label(raw).ok_or_else(|| {
        let known = WasteManagementTier::ALL
            .iter()
            .map(|tier| tier.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown waste management tier '{raw}' (expected one of {known})")
    })
}
