use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one physical GPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// GPU index assigned by the driver
    pub gpu: u32,
    /// Device UUID, e.g. `GPU-4cb2...`
    pub uuid: String,
}

/// Identity of one MIG partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInstanceInfo {
    /// Human-readable profile label, e.g. `1g.10gb`
    pub profile_name: String,
    /// Daemon entity handle, used for value queries
    pub entity_id: u32,
    /// Driver-visible instance id, used for labels
    pub instance_id: u32,
}

/// One physical GPU plus its MIG partitions, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub device: DeviceInfo,
    pub instances: Vec<GpuInstanceInfo>,
}

/// Topology snapshot taken at collector construction.
///
/// Read-only for the collector's lifetime; GPUs are listed in ascending
/// index order and instances in the order the daemon declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub gpus: Vec<GpuInfo>,
    pub mig_enabled: bool,
}

impl SystemInfo {
    pub fn gpu_count(&self) -> usize {
        self.gpus.len()
    }

    /// Number of monitored entities: GPU instances when MIG is enabled,
    /// physical GPUs otherwise
    pub fn monitored_entity_count(&self) -> usize {
        if self.mig_enabled {
            self.gpus.iter().map(|g| g.instances.len()).sum()
        } else {
            self.gpus.len()
        }
    }
}

/// Reference to one monitored entity in daemon queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A physical GPU, by index
    Gpu(u32),
    /// A MIG partition, by daemon entity handle
    GpuInstance(u32),
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Gpu(index) => write!(f, "GPU {}", index),
            Entity::GpuInstance(entity_id) => write!(f, "GPU instance {}", entity_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_gpu_system(mig_enabled: bool) -> SystemInfo {
        SystemInfo {
            gpus: vec![
                GpuInfo {
                    device: DeviceInfo {
                        gpu: 0,
                        uuid: "GPU-0000".to_string(),
                    },
                    instances: vec![
                        GpuInstanceInfo {
                            profile_name: "1g.10gb".to_string(),
                            entity_id: 10,
                            instance_id: 0,
                        },
                        GpuInstanceInfo {
                            profile_name: "2g.20gb".to_string(),
                            entity_id: 11,
                            instance_id: 1,
                        },
                    ],
                },
                GpuInfo {
                    device: DeviceInfo {
                        gpu: 1,
                        uuid: "GPU-0001".to_string(),
                    },
                    instances: vec![GpuInstanceInfo {
                        profile_name: "7g.80gb".to_string(),
                        entity_id: 12,
                        instance_id: 0,
                    }],
                },
            ],
            mig_enabled,
        }
    }

    #[test]
    fn test_entity_count_without_mig() {
        let info = two_gpu_system(false);
        assert_eq!(info.gpu_count(), 2);
        assert_eq!(info.monitored_entity_count(), 2);
    }

    #[test]
    fn test_entity_count_with_mig() {
        let info = two_gpu_system(true);
        assert_eq!(info.monitored_entity_count(), 3);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::Gpu(0).to_string(), "GPU 0");
        assert_eq!(Entity::GpuInstance(11).to_string(), "GPU instance 11");
    }
}
