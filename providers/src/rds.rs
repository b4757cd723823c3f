use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rds::config::{Builder, Region};
use aws_sdk_rds::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::DbInstance;
use awsinv_core::provider::{ProviderResult, RdsApi};

use crate::{owned, page, sdk_error};

pub struct RdsClient {
    client: Client,
}

impl RdsClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl RdsApi for RdsClient {
    async fn describe_db_instances(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<DbInstance>> {
        let resp = self
            .client
            .describe_db_instances()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("DescribeDBInstances"))?;

        let instances = resp
            .db_instances()
            .iter()
            .map(|db| DbInstance {
                identifier: owned(db.db_instance_identifier()),
                arn: owned(db.db_instance_arn()),
                engine: owned(db.engine()),
                engine_version: owned(db.engine_version()),
                instance_class: owned(db.db_instance_class()),
                endpoint_address: owned(db.endpoint().and_then(|e| e.address())),
                publicly_accessible: db.publicly_accessible().unwrap_or(false),
                vpc_id: owned(db.db_subnet_group().and_then(|group| group.vpc_id())),
            })
            .collect();
        Ok(page(instances, resp.marker()))
    }
}
