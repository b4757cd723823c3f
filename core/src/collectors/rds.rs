use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::DbInstance;
use crate::service::Service;

pub const ASSET_TYPE: &str = "RDS Instance";

pub struct RdsCollector;

#[async_trait]
impl Collector for RdsCollector {
    fn service(&self) -> Service {
        Service::Rds
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let rds = scope.clients.rds(&region);

        info!("loading data");

        let instances = paginate(|marker| rds.describe_db_instances(marker)).await?;

        info!("processing data");

        for instance in &instances {
            scope.emitter.row(db_row(instance, &region)).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

fn db_row(instance: &DbInstance, region: &str) -> Row {
    Row {
        unique_asset_identifier: instance.identifier.clone(),
        is_virtual: true,
        is_public: instance.publicly_accessible,
        dns_name_or_url: instance.endpoint_address.clone(),
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        hardware_make_model: instance.instance_class.clone(),
        software_database_vendor: instance.engine.clone(),
        software_database_name_and_version: format!(
            "{} {}",
            instance.engine, instance.engine_version
        ),
        serial_asset_tag_number: instance.arn.clone(),
        vlan_network_id: instance.vpc_id.clone(),
        ..Default::default()
    }
}
