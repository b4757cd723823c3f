//! # Reverse-DNS Index
//!
//! Finds the externally registered DNS names that point at a compute instance.
//!
//! The index is a flat list of every record set from every hosted zone, built
//! once per run by [`build`] before any collector starts, and read-only from
//! then on. Lookups are a linear scan over all records in load order:
//!
//! * `CNAME` records match when a value contains the instance's private or
//!   public DNS name.
//! * Every other record type is treated as an address record and matches when
//!   a value contains the instance's private or public IP address.
//!
//! Matching is textual containment, so an IP such as `10.0.0.1` also matches
//! a record holding `10.0.0.10`. Each lookup costs O(records); a run costs
//! O(instances × records).

use futures::future::join_all;
use tracing::{error, info};

use crate::error::ProviderError;
use crate::paginate::paginate;
use crate::provider::Route53Api;
use crate::provider::models::{HostedZone, Instance, RecordSet};

const CNAME: &str = "CNAME";

/// The addresses of one instance that a lookup matches against.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceAddresses<'a> {
    pub public_dns_name: Option<&'a str>,
    pub private_dns_name: Option<&'a str>,
    pub public_ip: Option<&'a str>,
    pub private_ip: Option<&'a str>,
}

impl<'a> From<&'a Instance> for InstanceAddresses<'a> {
    fn from(instance: &'a Instance) -> Self {
        Self {
            public_dns_name: instance.public_dns_name.as_deref(),
            private_dns_name: instance.private_dns_name.as_deref(),
            public_ip: instance.public_ip_address.as_deref(),
            private_ip: instance.private_ip_address.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReverseDnsIndex {
    records: Vec<RecordSet>,
}

impl ReverseDnsIndex {
    pub fn new(records: Vec<RecordSet>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of the records pointing at `instance`, without duplicates, in
    /// the order they were first matched.
    pub fn lookup(&self, instance: &InstanceAddresses<'_>) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for record in &self.records {
            let needles: [Option<&str>; 2] = if record.record_type == CNAME {
                [instance.private_dns_name, instance.public_dns_name]
            } else {
                [instance.private_ip, instance.public_ip]
            };

            if matches_any(&record.values, &needles) && !names.contains(&record.name) {
                names.push(record.name.clone());
            }
        }

        names
    }
}

fn matches_any(values: &[String], needles: &[Option<&str>]) -> bool {
    values.iter().any(|value| {
        needles
            .iter()
            .flatten()
            .any(|needle| !needle.is_empty() && value.contains(needle))
    })
}

/// Loads every record set of every hosted zone.
///
/// Zones are fetched concurrently and merged in zone order. A zone whose
/// records cannot be listed is logged and left out; only a failure to list the
/// zones themselves is returned.
pub async fn build(route53: &dyn Route53Api) -> Result<ReverseDnsIndex, ProviderError> {
    info!("loading hosted zones");
    let zones: Vec<HostedZone> = paginate(|marker| route53.list_hosted_zones(marker)).await?;
    info!("found {} hosted zones", zones.len());

    let loads = zones.iter().map(|zone| async move {
        info!(zone = %zone.name, "loading records for hosted zone");
        let records = paginate(|cursor| route53.list_resource_record_sets(&zone.id, cursor)).await;
        (zone, records)
    });

    let mut records: Vec<RecordSet> = Vec::new();
    for (zone, loaded) in join_all(loads).await {
        match loaded {
            Ok(sets) => {
                info!(zone = %zone.name, "found {} records in hosted zone", sets.len());
                records.extend(sets);
            }
            Err(e) => error!(zone = %zone.name, "failed to load records for hosted zone: {e}"),
        }
    }

    Ok(ReverseDnsIndex::new(records))
}
