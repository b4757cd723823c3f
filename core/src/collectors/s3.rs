use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::service::Service;

pub const ASSET_TYPE: &str = "S3 Bucket";

/// Lists the account's buckets and keeps those located in the scope's region.
///
/// Bucket listing is account-wide, so every regional S3 collector sees every
/// bucket and the location check decides which one reports it.
pub struct S3Collector;

#[async_trait]
impl Collector for S3Collector {
    fn service(&self) -> Service {
        Service::S3
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let s3 = scope.clients.s3(&region);

        info!("loading data");

        let buckets = paginate(|token| s3.list_buckets(token)).await?;
        if buckets.is_empty() {
            return Ok(());
        }

        info!("processing data");

        let partition = scope.partition();
        let mut group = scope.describe_group();
        for bucket in buckets {
            let s3 = Arc::clone(&s3);
            let region = region.clone();
            let subject = Some(bucket.name.clone());

            group.spawn(scope.emitter.clone(), subject, async move {
                let location = s3.bucket_location(&bucket.name).await?;
                if normalize_bucket_location(&location) != region {
                    return Ok(Vec::new());
                }

                Ok(vec![Row {
                    unique_asset_identifier: bucket.name.clone(),
                    is_virtual: true,
                    location: region,
                    asset_type: ASSET_TYPE.to_string(),
                    serial_asset_tag_number: format!("arn:{partition}:s3:::{}", bucket.name),
                    ..Default::default()
                }])
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

/// Maps a raw location constraint to a region name. Buckets in the default
/// region report no constraint, and the oldest Ireland buckets report `EU`.
pub fn normalize_bucket_location(constraint: &str) -> &str {
    match constraint {
        "" => "us-east-1",
        "EU" => "eu-west-1",
        other => other,
    }
}
