use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::Bucket;
use awsinv_core::provider::{ProviderResult, S3Api};

use crate::{page, sdk_error};

pub struct S3Client {
    client: Client,
}

impl S3Client {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl S3Api for S3Client {
    async fn list_buckets(&self, token: Option<String>) -> ProviderResult<Page<Bucket>> {
        let resp = self
            .client
            .list_buckets()
            .set_continuation_token(token)
            .send()
            .await
            .map_err(sdk_error("ListBuckets"))?;

        let buckets = resp
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name())
            .map(|name| Bucket {
                name: name.to_string(),
            })
            .collect();
        Ok(page(buckets, resp.continuation_token()))
    }

    /// The raw location constraint; empty for buckets in `us-east-1`.
    async fn bucket_location(&self, bucket: &str) -> ProviderResult<String> {
        let resp = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(sdk_error("GetBucketLocation"))?;

        Ok(resp
            .location_constraint()
            .map(|constraint| constraint.as_str().to_string())
            .unwrap_or_default())
    }
}
