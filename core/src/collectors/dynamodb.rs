use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::info;

use super::{Collector, Scope, human_readable_bytes};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::Table;
use crate::service::Service;

pub const ASSET_TYPE: &str = "DynamoDB Table";

/// Lists table names, then describes each table for its ARN and size.
pub struct DynamoDbCollector;

#[async_trait]
impl Collector for DynamoDbCollector {
    fn service(&self) -> Service {
        Service::DynamoDb
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let dynamodb = scope.clients.dynamodb(&region);

        info!("loading data");

        let names = paginate(|start| dynamodb.list_tables(start)).await?;
        if names.is_empty() {
            return Ok(());
        }

        info!("processing data");

        let mut group = scope.describe_group();
        for name in names {
            let dynamodb = Arc::clone(&dynamodb);
            let region = region.clone();
            let subject = Some(name.clone());

            group.spawn(scope.emitter.clone(), subject, async move {
                let table = dynamodb.describe_table(&name).await?;
                Ok(vec![table_row(&table, &region)])
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

fn table_row(table: &Table, region: &str) -> Row {
    Row {
        unique_asset_identifier: table.name.clone(),
        is_virtual: true,
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        software_database_vendor: "Amazon".to_string(),
        software_database_name_and_version: "DynamoDB".to_string(),
        comments: human_readable_bytes(table.size_bytes),
        serial_asset_tag_number: table.arn.clone(),
        ..Default::default()
    }
}
