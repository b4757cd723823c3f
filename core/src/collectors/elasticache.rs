use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::{info, warn};

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::CacheCluster;
use crate::service::Service;

pub const ASSET_TYPE: &str = "ElastiCache Node";

/// One row per cache node. The cluster's VPC comes from its subnet group,
/// which is described separately for each cluster.
pub struct ElastiCacheCollector;

#[async_trait]
impl Collector for ElastiCacheCollector {
    fn service(&self) -> Service {
        Service::ElastiCache
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let elasticache = scope.clients.elasticache(&region);

        info!("loading data");

        let clusters = paginate(|marker| elasticache.describe_cache_clusters(marker)).await?;
        if clusters.is_empty() {
            return Ok(());
        }

        info!("processing data");

        let mut group = scope.describe_group();
        for cluster in clusters {
            let elasticache = Arc::clone(&elasticache);
            let region = region.clone();
            let subject = Some(cluster.cluster_id.clone());

            group.spawn(scope.emitter.clone(), subject, async move {
                let vpc_id = if cluster.subnet_group.is_empty() {
                    String::new()
                } else {
                    match elasticache.subnet_group_vpc(&cluster.subnet_group).await {
                        Ok(vpc) => vpc.unwrap_or_default(),
                        Err(e) => {
                            warn!(
                                "failed to load subnet group {} for {}: {e}",
                                cluster.subnet_group, cluster.cluster_id
                            );
                            String::new()
                        }
                    }
                };
                Ok(node_rows(&cluster, &vpc_id, &region))
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

fn node_rows(cluster: &CacheCluster, vpc_id: &str, region: &str) -> Vec<Row> {
    cluster
        .nodes
        .iter()
        .map(|node| Row {
            unique_asset_identifier: format!("{}-{}", cluster.cluster_id, node.node_id),
            is_virtual: true,
            dns_name_or_url: node.address.clone(),
            baseline_configuration_name: cluster.parameter_group.clone(),
            location: region.to_string(),
            asset_type: ASSET_TYPE.to_string(),
            hardware_make_model: cluster.node_type.clone(),
            software_database_vendor: cluster.engine.clone(),
            software_database_name_and_version: format!(
                "{} {}",
                cluster.engine, cluster.engine_version
            ),
            serial_asset_tag_number: cluster.arn.clone(),
            vlan_network_id: vpc_id.to_string(),
            ..Default::default()
        })
        .collect()
}
