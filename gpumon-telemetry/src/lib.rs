// Re-export main components for easy access
pub use collector::DcgmCollector;
pub use convert::{stringify, to_metrics, FAILED_TO_CONVERT, SKIP_VALUE};
pub use counters::{device_fields, Counter, DEFAULT_COUNTERS};
pub use dcgm::{
    DcgmClient, DcgmError, DeviceInfo, Entity, FieldId, FieldType, FieldValue, FieldWatchCleanup,
    GpuInfo, GpuInstanceInfo, MockDcgm, SystemInfo,
};
pub use error::{CollectorError, Result};
pub use metric::{uuid_label_key, Metric};
pub use sampler::CollectorTask;

pub mod collector;
pub mod convert;
pub mod counters;
pub mod dcgm;
pub mod error;
pub mod metric;
pub mod sampler;

/// Version of the gpumon-telemetry library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version
pub fn version() -> &'static str {
    VERSION
}
