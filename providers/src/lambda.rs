use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_lambda::config::{Builder, Region};
use aws_sdk_lambda::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::Function;
use awsinv_core::provider::{LambdaApi, ProviderResult};

use crate::{owned, page, sdk_error};

pub struct LambdaClient {
    client: Client,
}

impl LambdaClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl LambdaApi for LambdaClient {
    async fn list_functions(&self, marker: Option<String>) -> ProviderResult<Page<Function>> {
        let resp = self
            .client
            .list_functions()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListFunctions"))?;

        let functions = resp
            .functions()
            .iter()
            .map(|f| Function {
                name: owned(f.function_name()),
                arn: owned(f.function_arn()),
                version: owned(f.version()),
                runtime: f.runtime().map(|r| r.as_str().to_string()).unwrap_or_default(),
                description: owned(f.description()),
                timeout_secs: f.timeout().unwrap_or_default(),
                memory_mb: f.memory_size().unwrap_or_default(),
                vpc_id: owned(f.vpc_config().and_then(|vpc| vpc.vpc_id())),
            })
            .collect();
        Ok(page(functions, resp.next_marker()))
    }
}
