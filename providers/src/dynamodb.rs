use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::config::{Builder, Region};
use aws_sdk_dynamodb::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::Table;
use awsinv_core::provider::{DynamoDbApi, ProviderResult};

use crate::{owned, page, sdk_error};

pub struct DynamoDbClient {
    client: Client,
}

impl DynamoDbClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl DynamoDbApi for DynamoDbClient {
    async fn list_tables(&self, start: Option<String>) -> ProviderResult<Page<String>> {
        let resp = self
            .client
            .list_tables()
            .set_exclusive_start_table_name(start)
            .send()
            .await
            .map_err(sdk_error("ListTables"))?;

        Ok(page(resp.table_names().to_vec(), resp.last_evaluated_table_name()))
    }

    async fn describe_table(&self, name: &str) -> ProviderResult<Table> {
        let resp = self
            .client
            .describe_table()
            .table_name(name)
            .send()
            .await
            .map_err(sdk_error("DescribeTable"))?;

        let table = resp.table();
        Ok(Table {
            name: table
                .and_then(|t| t.table_name())
                .unwrap_or(name)
                .to_string(),
            arn: owned(table.and_then(|t| t.table_arn())),
            size_bytes: table.and_then(|t| t.table_size_bytes()).unwrap_or_default(),
        })
    }
}
