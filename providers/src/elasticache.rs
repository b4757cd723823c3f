use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticache::config::{Builder, Region};
use aws_sdk_elasticache::types;
use aws_sdk_elasticache::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::{CacheCluster, CacheNode};
use awsinv_core::provider::{ElastiCacheApi, ProviderResult};

use crate::{owned, page, sdk_error};

pub struct ElastiCacheClient {
    client: Client,
}

impl ElastiCacheClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ElastiCacheApi for ElastiCacheClient {
    async fn describe_cache_clusters(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<CacheCluster>> {
        let resp = self
            .client
            .describe_cache_clusters()
            .show_cache_node_info(true)
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("DescribeCacheClusters"))?;

        let clusters = resp.cache_clusters().iter().map(cluster).collect();
        Ok(page(clusters, resp.marker()))
    }

    async fn subnet_group_vpc(&self, group: &str) -> ProviderResult<Option<String>> {
        let resp = self
            .client
            .describe_cache_subnet_groups()
            .cache_subnet_group_name(group)
            .send()
            .await
            .map_err(sdk_error("DescribeCacheSubnetGroups"))?;

        Ok(resp
            .cache_subnet_groups()
            .first()
            .and_then(|group| group.vpc_id())
            .map(str::to_string))
    }
}

fn cluster(cluster: &types::CacheCluster) -> CacheCluster {
    CacheCluster {
        cluster_id: owned(cluster.cache_cluster_id()),
        arn: owned(cluster.arn()),
        node_type: owned(cluster.cache_node_type()),
        engine: owned(cluster.engine()),
        engine_version: owned(cluster.engine_version()),
        parameter_group: owned(
            cluster
                .cache_parameter_group()
                .and_then(|group| group.cache_parameter_group_name()),
        ),
        subnet_group: owned(cluster.cache_subnet_group_name()),
        nodes: cluster
            .cache_nodes()
            .iter()
            .map(|node| CacheNode {
                node_id: owned(node.cache_node_id()),
                address: owned(node.endpoint().and_then(|endpoint| endpoint.address())),
            })
            .collect(),
    }
}
