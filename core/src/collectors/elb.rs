use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::ClassicLoadBalancer;
use crate::service::Service;

pub const ASSET_TYPE: &str = "ELB";

pub(crate) const INTERNET_FACING: &str = "internet-facing";

/// Classic load balancers. Their descriptions carry no ARN, so one is built
/// from the account id.
pub struct ElbCollector;

#[async_trait]
impl Collector for ElbCollector {
    fn service(&self) -> Service {
        Service::Elb
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let ec2 = scope.clients.ec2(&region);
        let elb = scope.clients.elb(&region);

        info!("loading data");

        let account_id = ec2.account_id().await?.unwrap_or_default();
        let balancers = paginate(|marker| elb.describe_load_balancers(marker)).await?;

        info!("processing data");

        let arn_prefix = format!(
            "arn:{}:elasticloadbalancing:{region}:{account_id}:loadbalancer/",
            scope.partition()
        );
        for balancer in &balancers {
            scope.emitter.row(balancer_row(balancer, &region, &arn_prefix)).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

fn balancer_row(balancer: &ClassicLoadBalancer, region: &str, arn_prefix: &str) -> Row {
    Row {
        unique_asset_identifier: balancer.name.clone(),
        is_virtual: true,
        is_public: balancer.scheme == INTERNET_FACING,
        dns_name_or_url: balancer.dns_name.clone(),
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        function: balancer.canonical_hosted_zone_name.clone(),
        serial_asset_tag_number: format!("{arn_prefix}{}", balancer.name),
        vlan_network_id: balancer.vpc_id.clone(),
        ..Default::default()
    }
}
