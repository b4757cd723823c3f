//! The shared result channel between collectors and the consumer.

use std::fmt;

use awsinv_common::inventory::Row;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::CollectError;
use crate::service::Service;

/// What a collector puts on the channel.
#[derive(Debug)]
pub enum Outcome {
    Row(Row),
    Failure(Failure),
}

/// A unit of collection work that stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub service: Service,
    /// `None` for global services.
    pub region: Option<String>,
    /// The item a describe step was working on, when the failure is narrower
    /// than the whole collector.
    pub subject: Option<String>,
    pub error: CollectError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = self.region.as_deref().unwrap_or("global");
        write!(f, "{} ({region})", self.service)?;
        if let Some(subject) = &self.subject {
            write!(f, " {subject}")?;
        }
        write!(f, ": {}", self.error)
    }
}

/// A collector's handle on the result channel, tagged with its scope.
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: mpsc::Sender<Outcome>,
    service: Service,
    region: Option<String>,
}

impl Emitter {
    pub(crate) fn new(tx: mpsc::Sender<Outcome>, service: Service, region: Option<String>) -> Self {
        Self {
            tx,
            service,
            region,
        }
    }

    pub async fn row(&self, row: Row) {
        if self.tx.send(Outcome::Row(row)).await.is_err() {
            warn!("consumer is gone, dropping row");
        }
    }

    pub async fn failure(&self, subject: Option<String>, error: CollectError) {
        let failure = Failure {
            service: self.service,
            region: self.region.clone(),
            subject,
            error,
        };
        if self.tx.send(Outcome::Failure(failure)).await.is_err() {
            warn!("consumer is gone, dropping failure report");
        }
    }
}
