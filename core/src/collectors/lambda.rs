use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::Function;
use crate::service::Service;

pub const ASSET_TYPE: &str = "Lambda Function";
const OS_NAME: &str = "Amazon Linux";

pub struct LambdaCollector;

#[async_trait]
impl Collector for LambdaCollector {
    fn service(&self) -> Service {
        Service::Lambda
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let lambda = scope.clients.lambda(&region);

        info!("loading data");

        let functions = paginate(|marker| lambda.list_functions(marker)).await?;

        info!("processing data");

        for function in &functions {
            scope.emitter.row(function_row(function, &region)).await;
        }

        info!("finished processing data");
        Ok(())
    }
}

fn function_row(function: &Function, region: &str) -> Row {
    Row {
        unique_asset_identifier: function.name.clone(),
        is_virtual: true,
        baseline_configuration_name: function.version.clone(),
        os_name_and_version: OS_NAME.to_string(),
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        software_database_name_and_version: function.runtime.clone(),
        function: function.description.clone(),
        comments: format!("{}s, {}MB", function.timeout_secs, function.memory_mb),
        serial_asset_tag_number: function.arn.clone(),
        vlan_network_id: function.vpc_id.clone(),
        ..Default::default()
    }
}
