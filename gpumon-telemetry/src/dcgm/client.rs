use super::error::Result;
use super::fields::FieldId;
use super::topology::{Entity, SystemInfo};
use super::values::FieldValue;

/// Releases one field watch registered with the daemon.
///
/// Handles are invoked by the collector's cleanup path; dropping one without
/// invoking it leaks the registration until the daemon session ends.
pub type FieldWatchCleanup = Box<dyn FnOnce() + Send>;

/// Boundary to the telemetry daemon.
///
/// The collector talks to the daemon exclusively through this trait, so the
/// conversion core stays fully testable against
/// [`MockDcgm`](crate::dcgm::mock::MockDcgm).
pub trait DcgmClient {
    /// Take a topology snapshot: every visible GPU and, when MIG is
    /// enabled, its instances
    fn system_info(&self) -> Result<SystemInfo>;

    /// Register a value watch for `fields` on every monitored entity in
    /// `system`, returning per-field cleanup handles
    fn watch_fields(
        &self,
        fields: &[FieldId],
        system: &SystemInfo,
    ) -> Result<Vec<FieldWatchCleanup>>;

    /// Latest watched values for one entity, one per requested field, in
    /// request order
    fn latest_values(&self, entity: Entity, fields: &[FieldId]) -> Result<Vec<FieldValue>>;
}

// A shared client is still a client; lets callers keep a handle on the one
// they hand to the collector.
impl<T: DcgmClient + ?Sized> DcgmClient for std::sync::Arc<T> {
    fn system_info(&self) -> Result<SystemInfo> {
        (**self).system_info()
    }

    fn watch_fields(
        &self,
        fields: &[FieldId],
        system: &SystemInfo,
    ) -> Result<Vec<FieldWatchCleanup>> {
        (**self).watch_fields(fields, system)
    }

    fn latest_values(&self, entity: Entity, fields: &[FieldId]) -> Result<Vec<FieldValue>> {
        (**self).latest_values(entity, fields)
    }
}
