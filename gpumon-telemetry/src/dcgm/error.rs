use thiserror::Error;

use super::topology::Entity;

/// Daemon-side error types
#[derive(Error, Debug)]
pub enum DcgmError {
    #[error("DCGM daemon is not connected")]
    NotConnected,

    #[error("no GPUs visible to the daemon")]
    NoDevicesFound,

    #[error("unknown entity: {0}")]
    UnknownEntity(Entity),

    #[error("daemon rejected request: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, DcgmError>;
