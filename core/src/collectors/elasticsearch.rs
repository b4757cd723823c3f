use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::provider::models::SearchDomain;
use crate::service::Service;

pub const ASSET_TYPE: &str = "Elasticsearch Domain";

/// Most domains `DescribeDomains` accepts in one call.
const DESCRIBE_BATCH: usize = 5;

/// Lists domain names, then describes them in batches. A failed batch is one
/// failure naming its domains; the other batches still report.
pub struct ElasticsearchCollector;

#[async_trait]
impl Collector for ElasticsearchCollector {
    fn service(&self) -> Service {
        Service::Elasticsearch
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let search = scope.clients.elasticsearch(&region);

        info!("loading data");

        let names = search.list_domain_names().await?;
        if names.is_empty() {
            return Ok(());
        }

        info!("processing data");

        let mut group = scope.describe_group();
        for batch in names.chunks(DESCRIBE_BATCH) {
            let search = Arc::clone(&search);
            let region = region.clone();
            let batch = batch.to_vec();
            let subject = Some(batch.join(","));

            group.spawn(scope.emitter.clone(), subject, async move {
                let domains = search.describe_domains(&batch).await?;
                Ok(domains.iter().map(|d| domain_row(d, &region)).collect())
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

fn domain_row(domain: &SearchDomain, region: &str) -> Row {
    let (vendor, version) = engine_vendor_and_version(&domain.engine_version);
    let dns_name = if domain.vpc_endpoint.is_empty() {
        domain.endpoint.clone()
    } else {
        domain.vpc_endpoint.clone()
    };

    Row {
        unique_asset_identifier: domain.name.clone(),
        is_virtual: true,
        is_public: domain.vpc_id.is_empty() && !domain.endpoint.is_empty(),
        dns_name_or_url: dns_name,
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        hardware_make_model: domain.instance_type.clone(),
        software_database_vendor: vendor.to_string(),
        software_database_name_and_version: version,
        serial_asset_tag_number: domain.arn.clone(),
        vlan_network_id: domain.vpc_id.clone(),
        ..Default::default()
    }
}

/// Splits `Elasticsearch_7.10` or `OpenSearch_2.11` into the vendor and a
/// readable engine name. A bare version is an Elasticsearch one.
fn engine_vendor_and_version(engine_version: &str) -> (&'static str, String) {
    match engine_version.split_once('_') {
        Some(("OpenSearch", version)) => ("Amazon", format!("OpenSearch {version}")),
        Some((engine, version)) => ("Elastic", format!("{engine} {version}")),
        None => ("Elastic", format!("Elasticsearch {engine_version}")),
    }
}
