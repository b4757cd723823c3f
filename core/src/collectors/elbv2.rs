use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::elb::INTERNET_FACING;
use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::LoadBalancer;
use crate::service::Service;

pub struct ElbV2Collector;

#[async_trait]
impl Collector for ElbV2Collector {
    fn service(&self) -> Service {
        Service::ElbV2
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let elbv2 = scope.clients.elbv2(&region);

        info!("loading data");

        let balancers = paginate(|marker| elbv2.describe_load_balancers(marker)).await?;

        info!("processing data");

        for balancer in &balancers {
            scope.emitter.row(balancer_row(balancer, &region)).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

fn asset_type(kind: &str) -> &'static str {
    match kind {
        "application" => "ALB",
        "network" => "NLB",
        "gateway" => "GWLB",
        _ => "ELBv2",
    }
}

fn balancer_row(balancer: &LoadBalancer, region: &str) -> Row {
    Row {
        unique_asset_identifier: balancer.name.clone(),
        is_virtual: true,
        is_public: balancer.scheme == INTERNET_FACING,
        dns_name_or_url: balancer.dns_name.clone(),
        location: region.to_string(),
        asset_type: asset_type(&balancer.kind).to_string(),
        serial_asset_tag_number: balancer.arn.clone(),
        vlan_network_id: balancer.vpc_id.clone(),
        ..Default::default()
    }
}
