use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::service::Service;

pub const ASSET_TYPE: &str = "IAM User";

pub struct IamCollector;

#[async_trait]
impl Collector for IamCollector {
    fn service(&self) -> Service {
        Service::Iam
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let iam = scope.clients.iam(scope.client_region());

        info!("loading data");

        let users = paginate(|marker| iam.list_users(marker)).await?;

        info!("processing data");

        for user in users {
            let row = Row {
                unique_asset_identifier: user.name,
                is_virtual: true,
                location: scope.location().to_string(),
                asset_type: ASSET_TYPE.to_string(),
                serial_asset_tag_number: user.arn,
                ..Default::default()
            };
            scope.emitter.row(row).await;
        }

        info!("finished processing data");
        Ok(())
    }
}
