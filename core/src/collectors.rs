//! # Collectors
//!
//! One collector per service. Every collector has the same shape:
//!
//! 1. page through the service's list operation until the continuation token
//!    runs out;
//! 2. optionally describe each item, fanned out through the scope's
//!    [`TaskGroup`] and joined before the collector returns;
//! 3. map each fully described item to a [`Row`](awsinv_common::inventory::Row)
//!    and emit it.
//!
//! A list failure ends the collector with an error; rows emitted before it
//! stay. An empty listing is not a failure.

use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::regions::{DEFAULT_REGION, partition_for_region};

use crate::channel::Emitter;
use crate::dns_index::ReverseDnsIndex;
use crate::error::CollectError;
use crate::provider::ClientFactory;
use crate::service::Service;
use crate::tasks::TaskGroup;

pub mod cloudfront;
pub mod dynamodb;
pub mod ebs;
pub mod ec2;
pub mod ecs;
pub mod elasticache;
pub mod elasticsearch;
pub mod elb;
pub mod elbv2;
pub mod iam;
pub mod lambda;
pub mod rds;
pub mod s3;

#[async_trait]
pub trait Collector: Send + Sync {
    fn service(&self) -> Service;

    /// Collects everything in `scope`, emitting rows as they are ready.
    ///
    /// Returns once every row has been emitted and every describe task it
    /// started has finished.
    async fn collect(&self, scope: Scope) -> Result<(), CollectError>;
}

/// The collector for `service`.
pub fn for_service(service: Service) -> Arc<dyn Collector> {
    match service {
        Service::CloudFront => Arc::new(cloudfront::CloudFrontCollector),
        Service::DynamoDb => Arc::new(dynamodb::DynamoDbCollector),
        Service::Ebs => Arc::new(ebs::EbsCollector),
        Service::Ec2 => Arc::new(ec2::Ec2Collector),
        Service::Ecs => Arc::new(ecs::EcsCollector),
        Service::ElastiCache => Arc::new(elasticache::ElastiCacheCollector),
        Service::Elasticsearch => Arc::new(elasticsearch::ElasticsearchCollector),
        Service::Elb => Arc::new(elb::ElbCollector),
        Service::ElbV2 => Arc::new(elbv2::ElbV2Collector),
        Service::Iam => Arc::new(iam::IamCollector),
        Service::Lambda => Arc::new(lambda::LambdaCollector),
        Service::Rds => Arc::new(rds::RdsCollector),
        Service::S3 => Arc::new(s3::S3Collector),
    }
}

/// Everything one collector run can reach.
#[derive(Clone)]
pub struct Scope {
    pub service: Service,
    /// `None` for global services.
    pub region: Option<String>,
    pub clients: Arc<dyn ClientFactory>,
    pub dns: Arc<ReverseDnsIndex>,
    pub emitter: Emitter,
    pub(crate) describe_concurrency: usize,
}

impl Scope {
    /// Region to build API clients for.
    pub fn client_region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Value of the `Location` column: the region, or empty for global services.
    pub fn location(&self) -> &str {
        self.region.as_deref().unwrap_or_default()
    }

    pub fn partition(&self) -> &'static str {
        partition_for_region(self.client_region())
    }

    /// A task group for this collector's describe fan-out.
    pub fn describe_group(&self) -> TaskGroup {
        TaskGroup::bounded(self.describe_concurrency)
    }
}

pub(crate) fn append_if_missing(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

pub(crate) fn human_readable_bytes(bytes: i64) -> String {
    const UNIT: i64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div: i64 = UNIT;
    let mut exp: usize = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let prefix = "kMGTPE".as_bytes()[exp] as char;
    format!("{:.1} {prefix}B", bytes as f64 / div as f64)
}
