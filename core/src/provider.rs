//! # Provider Ports
//!
//! The contracts collectors use to reach a cloud provider. Each trait mirrors
//! the handful of list/describe operations one service's collector needs, with
//! SDK types replaced by the plain structs in [`models`].
//!
//! List operations take the continuation token returned by the previous call
//! (`None` on the first call) and return a [`Page`]. Describe operations take
//! one item's identifier.
//!
//! Concrete implementations live outside this crate: `awsinv-providers` wraps
//! the AWS SDK, and the integration tests use an in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::paginate::Page;

pub mod models;

use models::{
    Bucket, CacheCluster, ClassicLoadBalancer, DbInstance, Distribution, EcsCluster, EcsTask,
    Function, HostedZone, Image, Instance, LoadBalancer, RecordCursor, RecordSet, SearchDomain,
    Table, User, Volume,
};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Supplies one API handle per (service, region).
///
/// Global services are requested with the default region.
pub trait ClientFactory: Send + Sync {
    fn cloudfront(&self, region: &str) -> Arc<dyn CloudFrontApi>;
    fn dynamodb(&self, region: &str) -> Arc<dyn DynamoDbApi>;
    fn ec2(&self, region: &str) -> Arc<dyn Ec2Api>;
    fn ecs(&self, region: &str) -> Arc<dyn EcsApi>;
    fn elasticache(&self, region: &str) -> Arc<dyn ElastiCacheApi>;
    fn elasticsearch(&self, region: &str) -> Arc<dyn ElasticsearchApi>;
    fn elb(&self, region: &str) -> Arc<dyn ElbApi>;
    fn elbv2(&self, region: &str) -> Arc<dyn ElbV2Api>;
    fn iam(&self, region: &str) -> Arc<dyn IamApi>;
    fn lambda(&self, region: &str) -> Arc<dyn LambdaApi>;
    fn rds(&self, region: &str) -> Arc<dyn RdsApi>;
    fn route53(&self, region: &str) -> Arc<dyn Route53Api>;
    fn s3(&self, region: &str) -> Arc<dyn S3Api>;
}

#[async_trait]
pub trait CloudFrontApi: Send + Sync {
    async fn list_distributions(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<Distribution>>;
}

#[async_trait]
pub trait DynamoDbApi: Send + Sync {
    /// Table names. The token is the last table name evaluated.
    async fn list_tables(&self, start: Option<String>) -> ProviderResult<Page<String>>;
    async fn describe_table(&self, name: &str) -> ProviderResult<Table>;
}

#[async_trait]
pub trait Ec2Api: Send + Sync {
    /// Owner of the first security group in the region, used as the account
    /// id in synthesized ARNs. `None` when the region has no groups.
    async fn account_id(&self) -> ProviderResult<Option<String>>;
    /// Instances that are pending, running, stopping or stopped.
    async fn describe_instances(&self, token: Option<String>) -> ProviderResult<Page<Instance>>;
    async fn describe_image(&self, image_id: &str) -> ProviderResult<Option<Image>>;
    async fn describe_volumes(&self, token: Option<String>) -> ProviderResult<Page<Volume>>;
    /// VPC of the first of the given network interfaces that still exists.
    async fn network_interface_vpc(
        &self,
        interface_ids: &[String],
    ) -> ProviderResult<Option<String>>;
}

#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Cluster ARNs.
    async fn list_clusters(&self, token: Option<String>) -> ProviderResult<Page<String>>;
    /// Callers pass at most 100 ARNs per call.
    async fn describe_clusters(&self, arns: &[String]) -> ProviderResult<Vec<EcsCluster>>;
    /// Task ARNs of one cluster.
    async fn list_tasks(
        &self,
        cluster: &str,
        token: Option<String>,
    ) -> ProviderResult<Page<String>>;
    /// Callers pass at most 100 ARNs per call.
    async fn describe_tasks(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> ProviderResult<Vec<EcsTask>>;
}

#[async_trait]
pub trait ElastiCacheApi: Send + Sync {
    /// Clusters including their cache node details.
    async fn describe_cache_clusters(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<CacheCluster>>;
    /// VPC of the named cache subnet group, if the group exists.
    async fn subnet_group_vpc(&self, group: &str) -> ProviderResult<Option<String>>;
}

#[async_trait]
pub trait ElasticsearchApi: Send + Sync {
    /// Every domain name in the region. The listing has no continuation.
    async fn list_domain_names(&self) -> ProviderResult<Vec<String>>;
    /// Callers pass at most five names per call.
    async fn describe_domains(&self, names: &[String]) -> ProviderResult<Vec<SearchDomain>>;
}

#[async_trait]
pub trait ElbApi: Send + Sync {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<ClassicLoadBalancer>>;
}

#[async_trait]
pub trait ElbV2Api: Send + Sync {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<LoadBalancer>>;
}

#[async_trait]
pub trait IamApi: Send + Sync {
    async fn list_users(&self, marker: Option<String>) -> ProviderResult<Page<User>>;
}

#[async_trait]
pub trait LambdaApi: Send + Sync {
    async fn list_functions(&self, marker: Option<String>) -> ProviderResult<Page<Function>>;
}

#[async_trait]
pub trait RdsApi: Send + Sync {
    async fn describe_db_instances(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<DbInstance>>;
}

#[async_trait]
pub trait Route53Api: Send + Sync {
    async fn list_hosted_zones(&self, marker: Option<String>) -> ProviderResult<Page<HostedZone>>;
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> ProviderResult<Page<RecordSet, RecordCursor>>;
}

#[async_trait]
pub trait S3Api: Send + Sync {
    async fn list_buckets(&self, token: Option<String>) -> ProviderResult<Page<Bucket>>;
    /// Raw location constraint of the bucket; empty for the default region.
    async fn bucket_location(&self, bucket: &str) -> ProviderResult<String>;
}
