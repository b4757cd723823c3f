//! The collection orchestrator.
//!
//! [`Loader::load`] validates a region/service selection, prefetches the
//! reverse-DNS index when instances are collected, then fans out one task per
//! global service and one per (region, regional service) pair. Every task
//! reports on one shared channel, drained by exactly one consumer task that
//! owns the [`RowSink`]. The run ends once every collector has finished and
//! the consumer has drained the closed channel.

use std::sync::Arc;
use std::time::Duration;

use awsinv_common::config::Config;
use awsinv_common::regions::{DEFAULT_REGION, KNOWN_REGIONS};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span};

use crate::channel::{Emitter, Outcome};
use crate::collectors::{self, Collector, Scope};
use crate::dns_index::{self, ReverseDnsIndex};
use crate::error::{CollectError, LoadError};
use crate::provider::ClientFactory;
use crate::service::Service;
use crate::sink::{DiscardSink, RowSink};
use crate::tasks::{TaskGroup, UnitResult};

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Collector tasks spawned.
    pub collectors: usize,
    /// Rows that reached the consumer.
    pub rows: usize,
    /// Failures reported by collectors and their describe steps.
    pub failures: usize,
    /// Rows, or the final flush, the sink rejected.
    pub sink_failures: usize,
}

pub struct Loader {
    clients: Arc<dyn ClientFactory>,
    config: Config,
    valid_regions: Vec<String>,
    cancel: CancellationToken,
}

impl Loader {
    pub fn new(clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            clients,
            config: Config::default(),
            valid_regions: KNOWN_REGIONS.iter().map(|r| r.to_string()).collect(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Cancelling `token` stops every running collector. Each reports one
    /// failure; rows already emitted are still delivered.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Collects `services` across `regions` and hands every row to `sink`.
    ///
    /// An empty service list selects every known service. Only validation
    /// fails the call; collector and sink errors are logged and counted in
    /// the returned summary.
    pub async fn load(
        &self,
        regions: &[String],
        services: &[String],
        sink: Option<Box<dyn RowSink>>,
    ) -> Result<LoadSummary, LoadError> {
        let (regions, services) = match self.validate(regions, services) {
            Ok(selection) => selection,
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        };

        let dns = if services.iter().any(|s| s.needs_dns_index()) {
            self.load_dns_index().await
        } else {
            ReverseDnsIndex::default()
        };
        let dns = Arc::new(dns);

        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let sink = sink.unwrap_or_else(|| Box::new(DiscardSink));
        let consumer = tokio::spawn(consume(rx, sink));

        let mut group = TaskGroup::unbounded();
        for service in &services {
            info!("including {service} service");

            let targets: Vec<Option<String>> = if service.is_global() {
                vec![None]
            } else {
                regions.iter().cloned().map(Some).collect()
            };

            for region in targets {
                let emitter = Emitter::new(tx.clone(), *service, region.clone());
                let scope = Scope {
                    service: *service,
                    region: region.clone(),
                    clients: Arc::clone(&self.clients),
                    dns: Arc::clone(&dns),
                    emitter: emitter.clone(),
                    describe_concurrency: self.config.describe_concurrency,
                };
                let span = info_span!(
                    "collector",
                    service = service.key(),
                    region = region.as_deref().unwrap_or("global")
                );
                let work = run_collector(
                    collectors::for_service(*service),
                    scope,
                    self.cancel.clone(),
                    self.config.collector_timeout,
                )
                .instrument(span);

                group.spawn(emitter, None, work);
            }
        }

        let spawned = group.len();
        group.join().await;
        drop(tx);

        let drained = match consumer.await {
            Ok(drained) => drained,
            Err(e) => {
                error!("consumer task did not complete: {e}");
                Drained::default()
            }
        };

        let summary = LoadSummary {
            collectors: spawned,
            rows: drained.rows,
            failures: drained.failures,
            sink_failures: drained.sink_failures,
        };
        info!(
            "collected {} rows from {} collectors ({} failures)",
            summary.rows, summary.collectors, summary.failures
        );
        Ok(summary)
    }

    /// Checks the selection in order: missing regions, unknown regions,
    /// unknown services. Duplicates are dropped, first occurrence wins.
    fn validate(
        &self,
        regions: &[String],
        services: &[String],
    ) -> Result<(Vec<String>, Vec<Service>), LoadError> {
        // An unrecognized key counts as regional here so that a bad service
        // with no regions still reports the missing regions first.
        let has_regional = services.is_empty()
            || services
                .iter()
                .any(|key| key.parse::<Service>().map_or(true, |s| !s.is_global()));
        if has_regional && regions.is_empty() {
            return Err(LoadError::NoRegions);
        }

        let mut selected_regions: Vec<String> = Vec::with_capacity(regions.len());
        for region in regions {
            if !self.valid_regions.iter().any(|known| known == region) {
                return Err(LoadError::InvalidRegion(region.clone()));
            }
            if !selected_regions.contains(region) {
                selected_regions.push(region.clone());
            }
        }

        let selected_services = if services.is_empty() {
            Service::ALL.to_vec()
        } else {
            let mut selected = Vec::with_capacity(services.len());
            for key in services {
                let service: Service = key.parse()?;
                if !selected.contains(&service) {
                    selected.push(service);
                }
            }
            selected
        };

        Ok((selected_regions, selected_services))
    }

    /// Builds the reverse-DNS index. Cancellation, the collector timeout and
    /// a failed zone listing all leave the index empty.
    async fn load_dns_index(&self) -> ReverseDnsIndex {
        let route53 = self.clients.route53(DEFAULT_REGION);
        let span = info_span!("dns_index");

        let build = async {
            let build = dns_index::build(route53.as_ref()).instrument(span);
            match self.config.collector_timeout {
                Some(limit) => tokio::time::timeout(limit, build)
                    .await
                    .map_err(|_| CollectError::TimedOut(limit)),
                None => Ok(build.await),
            }
        };

        let built = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return ReverseDnsIndex::default(),
            built = build => built,
        };

        match built {
            Ok(Ok(index)) => {
                info!("loaded {} dns records", index.len());
                index
            }
            Ok(Err(e)) => {
                error!("failed to load hosted zones, dns names will be missing: {e}");
                ReverseDnsIndex::default()
            }
            Err(e) => {
                error!("hosted zones {e}, dns names will be missing");
                ReverseDnsIndex::default()
            }
        }
    }
}

async fn run_collector(
    collector: Arc<dyn Collector>,
    scope: Scope,
    cancel: CancellationToken,
    timeout: Option<Duration>,
) -> UnitResult {
    let collect = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, collector.collect(scope)).await {
                Ok(collected) => collected,
                Err(_) => Err(CollectError::TimedOut(limit)),
            },
            None => collector.collect(scope).await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CollectError::Cancelled),
        collected = collect => collected.map(|()| Vec::new()),
    }
}

#[derive(Debug, Default)]
struct Drained {
    rows: usize,
    failures: usize,
    sink_failures: usize,
}

async fn consume(mut rx: mpsc::Receiver<Outcome>, mut sink: Box<dyn RowSink>) -> Drained {
    let mut drained = Drained::default();

    while let Some(outcome) = rx.recv().await {
        match outcome {
            Outcome::Row(row) => {
                drained.rows += 1;
                if let Err(e) = sink.process(row) {
                    drained.sink_failures += 1;
                    error!("failed to process row: {e:#}");
                }
            }
            Outcome::Failure(failure) => {
                drained.failures += 1;
                error!("{failure}");
            }
        }
    }

    if let Err(e) = sink.finish() {
        drained.sink_failures += 1;
        error!("failed to finish output: {e:#}");
    }
    drained
}
