use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::dcgm::fields::{self, FieldId};

/// One configured counter: which field to collect and how to report it.
///
/// The counter list is immutable once loaded; its order defines both the
/// field-watch order and the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub field_id: FieldId,
    pub field_name: String,
    pub help: String,
}

impl Counter {
    pub fn new(field_id: FieldId, field_name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            field_id,
            field_name: field_name.into(),
            help: help.into(),
        }
    }
}

/// Field identifiers to request from the daemon, in counter order
pub fn device_fields(counters: &[Counter]) -> Vec<FieldId> {
    counters.iter().map(|c| c.field_id).collect()
}

/// Counters collected when the caller does not supply a list
pub static DEFAULT_COUNTERS: Lazy<Vec<Counter>> = Lazy::new(|| {
    vec![
        Counter::new(
            fields::DCGM_FI_DEV_SM_CLOCK,
            "DCGM_FI_DEV_SM_CLOCK",
            "SM clock frequency (in MHz).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_MEM_CLOCK,
            "DCGM_FI_DEV_MEM_CLOCK",
            "Memory clock frequency (in MHz).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_MEMORY_TEMP,
            "DCGM_FI_DEV_MEMORY_TEMP",
            "Memory temperature (in C).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_GPU_TEMP,
            "DCGM_FI_DEV_GPU_TEMP",
            "GPU temperature (in C).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_POWER_USAGE,
            "DCGM_FI_DEV_POWER_USAGE",
            "Power draw (in W).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_TOTAL_ENERGY_CONSUMPTION,
            "DCGM_FI_DEV_TOTAL_ENERGY_CONSUMPTION",
            "Total energy consumption since boot (in mJ).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_PCIE_TX_THROUGHPUT,
            "DCGM_FI_DEV_PCIE_TX_THROUGHPUT",
            "Total number of bytes transmitted through PCIe TX (in KB).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_PCIE_RX_THROUGHPUT,
            "DCGM_FI_DEV_PCIE_RX_THROUGHPUT",
            "Total number of bytes received through PCIe RX (in KB).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_PCIE_REPLAY_COUNTER,
            "DCGM_FI_DEV_PCIE_REPLAY_COUNTER",
            "Total number of PCIe retries.",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_GPU_UTIL,
            "DCGM_FI_DEV_GPU_UTIL",
            "GPU utilization (in %).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_MEM_COPY_UTIL,
            "DCGM_FI_DEV_MEM_COPY_UTIL",
            "Memory utilization (in %).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_ENC_UTIL,
            "DCGM_FI_DEV_ENC_UTIL",
            "Encoder utilization (in %).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_DEC_UTIL,
            "DCGM_FI_DEV_DEC_UTIL",
            "Decoder utilization (in %).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_XID_ERRORS,
            "DCGM_FI_DEV_XID_ERRORS",
            "Value of the last XID error encountered.",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_FB_FREE,
            "DCGM_FI_DEV_FB_FREE",
            "Framebuffer memory free (in MiB).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_FB_USED,
            "DCGM_FI_DEV_FB_USED",
            "Framebuffer memory used (in MiB).",
        ),
        Counter::new(
            fields::DCGM_FI_DEV_NVLINK_BANDWIDTH_TOTAL,
            "DCGM_FI_DEV_NVLINK_BANDWIDTH_TOTAL",
            "Total number of NVLink bandwidth counters for all lanes.",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_fields_preserve_counter_order() {
        let counters = vec![
            Counter::new(150, "DCGM_FI_DEV_GPU_TEMP", "GPU temperature (in C)."),
            Counter::new(155, "DCGM_FI_DEV_POWER_USAGE", "Power draw (in W)."),
            Counter::new(100, "DCGM_FI_DEV_SM_CLOCK", "SM clock frequency (in MHz)."),
        ];
        assert_eq!(device_fields(&counters), vec![150, 155, 100]);
    }

    #[test]
    fn test_default_counters_are_well_formed() {
        assert!(!DEFAULT_COUNTERS.is_empty());
        for counter in DEFAULT_COUNTERS.iter() {
            assert!(counter.field_id > 0);
            assert!(counter.field_name.starts_with("DCGM_FI_"));
            assert!(!counter.help.is_empty());
        }
    }
}
