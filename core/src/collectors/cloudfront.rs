use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::Distribution;
use crate::service::Service;

pub const ASSET_TYPE: &str = "CloudFront Distribution";

pub struct CloudFrontCollector;

#[async_trait]
impl Collector for CloudFrontCollector {
    fn service(&self) -> Service {
        Service::CloudFront
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let cloudfront = scope.clients.cloudfront(scope.client_region());

        info!("loading data");

        let distributions = paginate(|marker| cloudfront.list_distributions(marker)).await?;

        info!("processing data");

        for distribution in &distributions {
            scope.emitter.row(distribution_row(distribution, scope.location())).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

/// Distributions are global; the domain name comes first, then every alias.
fn distribution_row(distribution: &Distribution, location: &str) -> Row {
    let mut names = Vec::with_capacity(distribution.aliases.len() + 1);
    names.push(distribution.domain_name.clone());
    names.extend(distribution.aliases.iter().cloned());

    Row {
        unique_asset_identifier: distribution.id.clone(),
        is_virtual: true,
        is_public: true,
        dns_name_or_url: names.join("\n"),
        baseline_configuration_name: distribution.origins.join("\n"),
        location: location.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        function: distribution.comment.clone(),
        serial_asset_tag_number: distribution.arn.clone(),
        ..Default::default()
    }
}
