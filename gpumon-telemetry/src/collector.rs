use tracing::{debug, info};

use crate::convert::to_metrics;
use crate::counters::{device_fields, Counter};
use crate::dcgm::{DcgmClient, Entity, FieldId, FieldValue, FieldWatchCleanup, SystemInfo};
use crate::error::{CollectorError, Result};
use crate::metric::Metric;

/// Drives collection passes against one daemon session.
///
/// Owns the topology snapshot and the field-watch registrations for its
/// lifetime. Watches are released by [`cleanup`](Self::cleanup), which also
/// runs on drop; calling it more than once is a no-op.
pub struct DcgmCollector<C: DcgmClient> {
    client: C,
    counters: Vec<Counter>,
    device_fields: Vec<FieldId>,
    use_old_namespace: bool,
    sys_info: SystemInfo,
    cleanups: Vec<FieldWatchCleanup>,
}

impl<C: DcgmClient> DcgmCollector<C> {
    /// Discover topology and register field watches for `counters`.
    ///
    /// On any failure no collector is returned and no cleanup is owed: the
    /// watch registration either succeeds as a whole or leaves nothing
    /// behind.
    pub fn new(client: C, counters: Vec<Counter>, use_old_namespace: bool) -> Result<Self> {
        let sys_info = client.system_info().map_err(CollectorError::Topology)?;
        info!(
            "discovered {} GPU(s), MIG {}",
            sys_info.gpu_count(),
            if sys_info.mig_enabled { "enabled" } else { "disabled" }
        );

        let device_fields = device_fields(&counters);
        let cleanups = client
            .watch_fields(&device_fields, &sys_info)
            .map_err(CollectorError::WatchSetup)?;
        info!(
            "watching {} field(s) on {} entity(ies)",
            device_fields.len(),
            sys_info.monitored_entity_count()
        );

        Ok(Self {
            client,
            counters,
            device_fields,
            use_old_namespace,
            sys_info,
            cleanups,
        })
    }

    pub fn system_info(&self) -> &SystemInfo {
        &self.sys_info
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Run one collection pass.
    ///
    /// Returns one metric group per monitored entity: GPUs in ascending
    /// index order, or each GPU's instances in declared order (flattened)
    /// when MIG is enabled. The first fetch failure aborts the whole pass;
    /// a partial snapshot is never returned.
    pub fn get_metrics(&self) -> Result<Vec<Vec<Metric>>> {
        let count = self.sys_info.monitored_entity_count();
        let mut metrics = Vec::with_capacity(count);

        if self.sys_info.mig_enabled {
            for gpu in &self.sys_info.gpus {
                for instance in &gpu.instances {
                    let entity = Entity::GpuInstance(instance.entity_id);
                    let values = self.latest_values(entity)?;
                    metrics.push(to_metrics(
                        &values,
                        &self.counters,
                        &gpu.device,
                        Some(instance),
                        self.use_old_namespace,
                    ));
                }
            }
        } else {
            for gpu in &self.sys_info.gpus {
                let entity = Entity::Gpu(gpu.device.gpu);
                let values = self.latest_values(entity)?;
                metrics.push(to_metrics(
                    &values,
                    &self.counters,
                    &gpu.device,
                    None,
                    self.use_old_namespace,
                ));
            }
        }

        debug!("collected {} metric group(s)", metrics.len());
        Ok(metrics)
    }

    fn latest_values(&self, entity: Entity) -> Result<Vec<FieldValue>> {
        self.client
            .latest_values(entity, &self.device_fields)
            .map_err(|source| CollectorError::ValueFetch { entity, source })
    }

    /// Release every field-watch registration, in registration order.
    ///
    /// Handles are drained as they run, so each one is invoked exactly once
    /// no matter how many times this is called.
    pub fn cleanup(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

impl<C: DcgmClient> Drop for DcgmCollector<C> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
