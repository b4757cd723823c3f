use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudfront::config::{Builder, Region};
use aws_sdk_cloudfront::types::DistributionSummary;
use aws_sdk_cloudfront::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::Distribution;
use awsinv_core::provider::{CloudFrontApi, ProviderResult};

use crate::{sdk_error, truncated_page};

pub struct CloudFrontClient {
    client: Client,
}

impl CloudFrontClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl CloudFrontApi for CloudFrontClient {
    async fn list_distributions(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<Distribution>> {
        let resp = self
            .client
            .list_distributions()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListDistributions"))?;

        let Some(list) = resp.distribution_list() else {
            return Ok(Page::last(Vec::new()));
        };
        let distributions = list.items().iter().map(distribution).collect();
        Ok(truncated_page(distributions, list.is_truncated(), list.next_marker()))
    }
}

fn distribution(summary: &DistributionSummary) -> Distribution {
    Distribution {
        id: summary.id().to_string(),
        arn: summary.arn().to_string(),
        domain_name: summary.domain_name().to_string(),
        aliases: summary
            .aliases()
            .map(|aliases| aliases.items().to_vec())
            .unwrap_or_default(),
        origins: summary
            .origins()
            .map(|origins| {
                origins
                    .items()
                    .iter()
                    .map(|origin| origin.domain_name().to_string())
                    .collect()
            })
            .unwrap_or_default(),
        comment: summary.comment().to_string(),
    }
}
