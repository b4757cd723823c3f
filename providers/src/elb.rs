use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancing::config::{Builder, Region};
use aws_sdk_elasticloadbalancing::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::ClassicLoadBalancer;
use awsinv_core::provider::{ElbApi, ProviderResult};

use crate::{owned, page, sdk_error};

pub struct ElbClient {
    client: Client,
}

impl ElbClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ElbApi for ElbClient {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<ClassicLoadBalancer>> {
        let resp = self
            .client
            .describe_load_balancers()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("DescribeLoadBalancers"))?;

        let balancers = resp
            .load_balancer_descriptions()
            .iter()
            .map(|lb| ClassicLoadBalancer {
                name: owned(lb.load_balancer_name()),
                dns_name: owned(lb.dns_name()),
                scheme: owned(lb.scheme()),
                canonical_hosted_zone_name: owned(lb.canonical_hosted_zone_name()),
                vpc_id: owned(lb.vpc_id()),
            })
            .collect();
        Ok(page(balancers, resp.next_marker()))
    }
}
