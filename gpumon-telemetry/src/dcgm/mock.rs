use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::client::{DcgmClient, FieldWatchCleanup};
use super::error::{DcgmError, Result};
use super::fields::FieldId;
use super::topology::{DeviceInfo, Entity, GpuInfo, GpuInstanceInfo, SystemInfo};
use super::values::{FieldValue, DCGM_INT64_NOT_FOUND};

/// In-memory daemon stand-in for tests and benches.
///
/// Serves a fixed topology and a per-(entity, field) value store. Entities
/// missing from the store answer queries with an error; fields missing for a
/// known entity answer with the int64 not-found sentinel, the way the real
/// daemon reports unwatched or unpopulated fields.
pub struct MockDcgm {
    system: SystemInfo,
    values: Mutex<HashMap<Entity, HashMap<FieldId, FieldValue>>>,
    failing_entities: Mutex<HashSet<Entity>>,
    fail_topology: bool,
    fail_watch: bool,
    watched: Mutex<Vec<FieldId>>,
    cleanup_calls: Arc<AtomicUsize>,
}

impl MockDcgm {
    pub fn new(system: SystemInfo) -> Self {
        Self {
            system,
            values: Mutex::new(HashMap::new()),
            failing_entities: Mutex::new(HashSet::new()),
            fail_topology: false,
            fail_watch: false,
            watched: Mutex::new(Vec::new()),
            cleanup_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A daemon that cannot enumerate devices
    pub fn failing_topology() -> Self {
        let mut mock = Self::new(SystemInfo::default());
        mock.fail_topology = true;
        mock
    }

    /// Reject all watch registrations
    pub fn with_watch_failure(mut self) -> Self {
        self.fail_watch = true;
        self
    }

    /// Store the value served for one (entity, field) pair
    pub fn set_value(&self, entity: Entity, value: FieldValue) {
        let mut values = self.values.lock().unwrap();
        values
            .entry(entity)
            .or_default()
            .insert(value.field_id, value);
    }

    /// Store a full set of values for one entity
    pub fn set_values(&self, entity: Entity, entity_values: Vec<FieldValue>) {
        for value in entity_values {
            self.set_value(entity, value);
        }
    }

    /// Make every subsequent fetch for `entity` fail
    pub fn fail_fetch(&self, entity: Entity) {
        self.failing_entities.lock().unwrap().insert(entity);
    }

    /// Let all entities answer fetches again
    pub fn clear_fetch_failures(&self) {
        self.failing_entities.lock().unwrap().clear();
    }

    /// Fields registered through `watch_fields`, in registration order
    pub fn watched_fields(&self) -> Vec<FieldId> {
        self.watched.lock().unwrap().clone()
    }

    /// How many cleanup handles have been invoked so far
    pub fn cleanup_count(&self) -> usize {
        self.cleanup_calls.load(Ordering::SeqCst)
    }
}

impl DcgmClient for MockDcgm {
    fn system_info(&self) -> Result<SystemInfo> {
        if self.fail_topology {
            return Err(DcgmError::NoDevicesFound);
        }
        Ok(self.system.clone())
    }

    fn watch_fields(
        &self,
        fields: &[FieldId],
        system: &SystemInfo,
    ) -> Result<Vec<FieldWatchCleanup>> {
        if self.fail_watch {
            return Err(DcgmError::Rejected("field watch refused".to_string()));
        }

        debug!(
            "mock daemon watching {} field(s) across {} entity(ies)",
            fields.len(),
            system.monitored_entity_count()
        );

        self.watched.lock().unwrap().extend_from_slice(fields);

        let mut cleanups: Vec<FieldWatchCleanup> = Vec::with_capacity(fields.len());
        for _ in fields {
            let calls = Arc::clone(&self.cleanup_calls);
            cleanups.push(Box::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            }));
        }
        Ok(cleanups)
    }

    fn latest_values(&self, entity: Entity, fields: &[FieldId]) -> Result<Vec<FieldValue>> {
        if self.failing_entities.lock().unwrap().contains(&entity) {
            return Err(DcgmError::Rejected(format!("injected failure for {}", entity)));
        }

        let values = self.values.lock().unwrap();
        let entity_values = values.get(&entity).ok_or(DcgmError::UnknownEntity(entity))?;

        Ok(fields
            .iter()
            .map(|&field| {
                entity_values
                    .get(&field)
                    .cloned()
                    .unwrap_or_else(|| FieldValue::int64(field, DCGM_INT64_NOT_FOUND))
            })
            .collect())
    }
}

/// Device identity for GPU `index` with a deterministic UUID
pub fn mock_device(index: u32) -> DeviceInfo {
    DeviceInfo {
        gpu: index,
        uuid: format!("GPU-{:08x}-1234-5678-9abc-{:012x}", 0xdeadbeefu32, index),
    }
}

/// Topology of `gpu_count` plain GPUs, MIG disabled
pub fn mock_system(gpu_count: u32) -> SystemInfo {
    SystemInfo {
        gpus: (0..gpu_count)
            .map(|i| GpuInfo {
                device: mock_device(i),
                instances: Vec::new(),
            })
            .collect(),
        mig_enabled: false,
    }
}

/// MIG-enabled topology with the given instance count per GPU.
///
/// Entity ids are assigned sequentially across the system; instance ids
/// restart at zero per GPU, matching driver numbering.
pub fn mock_mig_system(instances_per_gpu: &[usize]) -> SystemInfo {
    const PROFILES: [&str; 3] = ["1g.10gb", "2g.20gb", "3g.40gb"];

    let mut next_entity_id = 0;
    let gpus = instances_per_gpu
        .iter()
        .enumerate()
        .map(|(gpu_index, &instance_count)| {
            let instances = (0..instance_count)
                .map(|slot| {
                    let info = GpuInstanceInfo {
                        profile_name: PROFILES[slot % PROFILES.len()].to_string(),
                        entity_id: next_entity_id,
                        instance_id: slot as u32,
                    };
                    next_entity_id += 1;
                    info
                })
                .collect();
            GpuInfo {
                device: mock_device(gpu_index as u32),
                instances,
            }
        })
        .collect();

    SystemInfo {
        gpus,
        mig_enabled: true,
    }
}
