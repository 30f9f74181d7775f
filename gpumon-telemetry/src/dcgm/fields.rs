/// Identifier of a daemon-defined telemetry field
pub type FieldId = u16;

// Canonical DCGM field identifiers for the counters we ship by default.
// The full catalog lives in the daemon; only the ones referenced here are
// mirrored as constants.
pub const DCGM_FI_DEV_NAME: FieldId = 50;
pub const DCGM_FI_DEV_SM_CLOCK: FieldId = 100;
pub const DCGM_FI_DEV_MEM_CLOCK: FieldId = 101;
pub const DCGM_FI_DEV_MEMORY_TEMP: FieldId = 140;
pub const DCGM_FI_DEV_GPU_TEMP: FieldId = 150;
pub const DCGM_FI_DEV_POWER_USAGE: FieldId = 155;
pub const DCGM_FI_DEV_TOTAL_ENERGY_CONSUMPTION: FieldId = 156;
pub const DCGM_FI_DEV_PCIE_TX_THROUGHPUT: FieldId = 200;
pub const DCGM_FI_DEV_PCIE_RX_THROUGHPUT: FieldId = 201;
pub const DCGM_FI_DEV_PCIE_REPLAY_COUNTER: FieldId = 202;
pub const DCGM_FI_DEV_GPU_UTIL: FieldId = 203;
pub const DCGM_FI_DEV_MEM_COPY_UTIL: FieldId = 204;
pub const DCGM_FI_DEV_ENC_UTIL: FieldId = 206;
pub const DCGM_FI_DEV_DEC_UTIL: FieldId = 207;
pub const DCGM_FI_DEV_XID_ERRORS: FieldId = 230;
pub const DCGM_FI_DEV_FB_FREE: FieldId = 251;
pub const DCGM_FI_DEV_FB_USED: FieldId = 252;
pub const DCGM_FI_DEV_NVLINK_BANDWIDTH_TOTAL: FieldId = 449;
