use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::config::{Builder, Region};
use aws_sdk_iam::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::User;
use awsinv_core::provider::{IamApi, ProviderResult};

use crate::{sdk_error, truncated_page};

pub struct IamClient {
    client: Client,
}

impl IamClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl IamApi for IamClient {
    async fn list_users(&self, marker: Option<String>) -> ProviderResult<Page<User>> {
        let resp = self
            .client
            .list_users()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListUsers"))?;

        let users = resp
            .users()
            .iter()
            .map(|user| User {
                name: user.user_name().to_string(),
                arn: user.arn().to_string(),
            })
            .collect();
        Ok(truncated_page(users, resp.is_truncated(), resp.marker()))
    }
}
