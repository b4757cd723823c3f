use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancingv2::config::{Builder, Region};
use aws_sdk_elasticloadbalancingv2::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::LoadBalancer;
use awsinv_core::provider::{ElbV2Api, ProviderResult};

use crate::{owned, page, sdk_error};

pub struct ElbV2Client {
    client: Client,
}

impl ElbV2Client {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ElbV2Api for ElbV2Client {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<LoadBalancer>> {
        let resp = self
            .client
            .describe_load_balancers()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("DescribeLoadBalancers"))?;

        let balancers = resp
            .load_balancers()
            .iter()
            .map(|lb| LoadBalancer {
                name: owned(lb.load_balancer_name()),
                arn: owned(lb.load_balancer_arn()),
                dns_name: owned(lb.dns_name()),
                kind: lb.r#type().map(|t| t.as_str().to_string()).unwrap_or_default(),
                scheme: lb.scheme().map(|s| s.as_str().to_string()).unwrap_or_default(),
                vpc_id: owned(lb.vpc_id()),
            })
            .collect();
        Ok(page(balancers, resp.next_marker()))
    }
}
