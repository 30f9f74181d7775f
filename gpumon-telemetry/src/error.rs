use thiserror::Error;

use crate::dcgm::{DcgmError, Entity};

/// Collector error types
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("failed to enumerate GPU topology: {0}")]
    Topology(#[source] DcgmError),

    #[error("failed to register field watch: {0}")]
    WatchSetup(#[source] DcgmError),

    #[error("failed to fetch latest values for {entity}: {source}")]
    ValueFetch {
        entity: Entity,
        #[source]
        source: DcgmError,
    },
}

pub type Result<T> = std::result::Result<T, CollectorError>;
