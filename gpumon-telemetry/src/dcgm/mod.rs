pub mod client;
pub mod error;
pub mod fields;
pub mod mock;
pub mod topology;
pub mod values;

pub use client::{DcgmClient, FieldWatchCleanup};
pub use error::{DcgmError, Result};
pub use fields::FieldId;
pub use mock::MockDcgm;
pub use topology::{DeviceInfo, Entity, GpuInfo, GpuInstanceInfo, SystemInfo};
pub use values::{is_blank, FieldType, FieldValue};
