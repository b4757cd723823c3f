//! AWS SDK adapters for the provider ports in `awsinv_core::provider`.
//!
//! [`AwsClients`] loads the shared SDK configuration once (credentials,
//! profile, retry settings) and hands out one client per service and region.
//! Every adapter maps SDK output to the plain provider models, turns the
//! service's own truncation signal into a present or absent continuation
//! token, and reports SDK errors as [`ProviderError`] with their full context.

use std::error::Error;
use std::sync::Arc;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::error::DisplayErrorContext;
use awsinv_core::ProviderError;
use awsinv_core::paginate::Page;
use awsinv_core::provider::{
    ClientFactory, CloudFrontApi, DynamoDbApi, Ec2Api, EcsApi, ElastiCacheApi, ElasticsearchApi,
    ElbApi, ElbV2Api, IamApi, LambdaApi, RdsApi, Route53Api, S3Api,
};

mod cloudfront;
mod dynamodb;
mod ec2;
mod ecs;
mod elasticache;
mod elasticsearch;
mod elb;
mod elbv2;
mod iam;
mod lambda;
mod rds;
mod route53;
mod s3;

pub use cloudfront::CloudFrontClient;
pub use dynamodb::DynamoDbClient;
pub use ec2::Ec2Client;
pub use ecs::EcsClient;
pub use elasticache::ElastiCacheClient;
pub use elasticsearch::ElasticsearchClient;
pub use elb::ElbClient;
pub use elbv2::ElbV2Client;
pub use iam::IamClient;
pub use lambda::LambdaClient;
pub use rds::RdsClient;
pub use route53::Route53Client;
pub use s3::S3Client;

/// Client factory backed by the AWS SDK for Rust.
#[derive(Debug, Clone)]
pub struct AwsClients {
    sdk: SdkConfig,
}

impl AwsClients {
    /// Resolves credentials and settings from the environment, shared config
    /// files and instance metadata, the same way the AWS CLI does.
    pub async fn from_env() -> Self {
        Self::new(aws_config::load_defaults(BehaviorVersion::latest()).await)
    }

    pub fn new(sdk: SdkConfig) -> Self {
        Self { sdk }
    }
}

impl ClientFactory for AwsClients {
    fn cloudfront(&self, region: &str) -> Arc<dyn CloudFrontApi> {
        Arc::new(CloudFrontClient::new(&self.sdk, region))
    }

    fn dynamodb(&self, region: &str) -> Arc<dyn DynamoDbApi> {
        Arc::new(DynamoDbClient::new(&self.sdk, region))
    }

    fn ec2(&self, region: &str) -> Arc<dyn Ec2Api> {
        Arc::new(Ec2Client::new(&self.sdk, region))
    }

    fn ecs(&self, region: &str) -> Arc<dyn EcsApi> {
        Arc::new(EcsClient::new(&self.sdk, region))
    }

    fn elasticache(&self, region: &str) -> Arc<dyn ElastiCacheApi> {
        Arc::new(ElastiCacheClient::new(&self.sdk, region))
    }

    fn elasticsearch(&self, region: &str) -> Arc<dyn ElasticsearchApi> {
        Arc::new(ElasticsearchClient::new(&self.sdk, region))
    }

    fn elb(&self, region: &str) -> Arc<dyn ElbApi> {
        Arc::new(ElbClient::new(&self.sdk, region))
    }

    fn elbv2(&self, region: &str) -> Arc<dyn ElbV2Api> {
        Arc::new(ElbV2Client::new(&self.sdk, region))
    }

    fn iam(&self, region: &str) -> Arc<dyn IamApi> {
        Arc::new(IamClient::new(&self.sdk, region))
    }

    fn lambda(&self, region: &str) -> Arc<dyn LambdaApi> {
        Arc::new(LambdaClient::new(&self.sdk, region))
    }

    fn rds(&self, region: &str) -> Arc<dyn RdsApi> {
        Arc::new(RdsClient::new(&self.sdk, region))
    }

    fn route53(&self, region: &str) -> Arc<dyn Route53Api> {
        Arc::new(Route53Client::new(&self.sdk, region))
    }

    fn s3(&self, region: &str) -> Arc<dyn S3Api> {
        Arc::new(S3Client::new(&self.sdk, region))
    }
}

/// Converts an SDK error into a [`ProviderError`] for `operation`, keeping the
/// whole source chain in the message.
pub(crate) fn sdk_error<E>(operation: &'static str) -> impl FnOnce(E) -> ProviderError
where
    E: Error,
{
    move |e| ProviderError::new(operation, DisplayErrorContext(&e).to_string())
}

/// Builds a page from a service's continuation token. An empty token ends the
/// listing like an absent one.
pub(crate) fn page<T>(items: Vec<T>, next: Option<&str>) -> Page<T> {
    match next.filter(|token| !token.is_empty()) {
        Some(token) => Page::more(items, token.to_string()),
        None => Page::last(items),
    }
}

/// Builds a page for services that flag truncation separately from the marker.
pub(crate) fn truncated_page<T>(items: Vec<T>, truncated: bool, marker: Option<&str>) -> Page<T> {
    if truncated {
        page(items, marker)
    } else {
        Page::last(items)
    }
}

pub(crate) fn owned(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
