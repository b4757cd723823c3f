use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::{Volume, name_tag};
use crate::service::Service;

pub const ASSET_TYPE: &str = "EBS Volume";

pub struct EbsCollector;

#[async_trait]
impl Collector for EbsCollector {
    fn service(&self) -> Service {
        Service::Ebs
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let ec2 = scope.clients.ec2(&region);

        info!("loading data");

        let account_id = ec2.account_id().await?.unwrap_or_default();
        let volumes = paginate(|token| ec2.describe_volumes(token)).await?;

        info!("processing data");

        let arn_prefix = format!("arn:{}:ec2:{region}:{account_id}:volume/", scope.partition());
        for volume in &volumes {
            scope.emitter.row(volume_row(volume, &region, &arn_prefix)).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

fn volume_row(volume: &Volume, region: &str, arn_prefix: &str) -> Row {
    Row {
        unique_asset_identifier: volume.volume_id.clone(),
        is_virtual: true,
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        hardware_make_model: format!("{} ({}GB)", volume.volume_type, volume.size_gib),
        function: name_tag(&volume.tags).to_string(),
        serial_asset_tag_number: format!("{arn_prefix}{}", volume.volume_id),
        ..Default::default()
    }
}
