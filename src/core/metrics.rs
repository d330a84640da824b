use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) const ITEMS_REGISTERED: &str = "inventory_items_registered_total";
pub(crate) const ITEMS_DELETED: &str = "inventory_items_deleted_total";
pub(crate) const PHOTOS_STORED: &str = "inventory_photos_stored_total";
pub(crate) const PHOTO_BYTES_STORED: &str = "inventory_photo_bytes_stored_total";

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_photo_stored(size: u64) {
    metrics::counter!(PHOTOS_STORED).increment(1);
    metrics::counter!(PHOTO_BYTES_STORED).increment(size);
}
