use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::warn;

use crate::collector::DcgmCollector;
use crate::dcgm::DcgmClient;
use crate::metric::Metric;

/// Periodic collection task.
///
/// Drives one collection pass per interval and hands each snapshot to a
/// caller-supplied callback. Passes are serialized behind the collector
/// mutex; a failed pass is logged and sampling continues, since the field
/// watches stay registered across passes.
pub struct CollectorTask<C: DcgmClient> {
    collector: Arc<Mutex<DcgmCollector<C>>>,
    interval: Duration,
    running: Arc<Mutex<bool>>,
}

impl<C: DcgmClient + Send + 'static> CollectorTask<C> {
    pub fn new(collector: DcgmCollector<C>, interval: Duration) -> Self {
        Self {
            collector: Arc::new(Mutex::new(collector)),
            interval,
            running: Arc::new(Mutex::new(false)),
        }
    }

    /// Start sampling in the background
    pub async fn start<F>(&self, callback: F)
    where
        F: Fn(Vec<Vec<Metric>>) + Send + 'static,
    {
        *self.running.lock().unwrap() = true;
        let collector = self.collector.clone();
        let running = self.running.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            while *running.lock().unwrap() {
                let snapshot = {
                    let collector = collector.lock().unwrap();
                    collector.get_metrics()
                };

                match snapshot {
                    Ok(metrics) => callback(metrics),
                    Err(e) => warn!("collection pass failed: {}", e),
                }

                tokio::time::sleep(interval).await;
            }
        });
    }

    /// Stop sampling after the current pass
    pub fn stop(&self) {
        *self.running.lock().unwrap() = false;
    }

    /// Shared handle to the collector, e.g. to run cleanup once stopped
    pub fn collector(&self) -> Arc<Mutex<DcgmCollector<C>>> {
        self.collector.clone()
    }
}
