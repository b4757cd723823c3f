use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_opensearch::config::{Builder, Region};
use aws_sdk_opensearch::types::DomainStatus;
use aws_sdk_opensearch::Client;
use awsinv_core::provider::models::SearchDomain;
use awsinv_core::provider::{ElasticsearchApi, ProviderResult};

use crate::{owned, sdk_error};

/// Elasticsearch and OpenSearch domains, through the OpenSearch Service API.
pub struct ElasticsearchClient {
    client: Client,
}

impl ElasticsearchClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl ElasticsearchApi for ElasticsearchClient {
    async fn list_domain_names(&self) -> ProviderResult<Vec<String>> {
        let resp = self
            .client
            .list_domain_names()
            .send()
            .await
            .map_err(sdk_error("ListDomainNames"))?;

        Ok(resp
            .domain_names()
            .iter()
            .filter_map(|info| info.domain_name())
            .map(str::to_string)
            .collect())
    }

    async fn describe_domains(&self, names: &[String]) -> ProviderResult<Vec<SearchDomain>> {
        let resp = self
            .client
            .describe_domains()
            .set_domain_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(sdk_error("DescribeDomains"))?;

        Ok(resp.domain_status_list().iter().map(domain).collect())
    }
}

fn domain(status: &DomainStatus) -> SearchDomain {
    SearchDomain {
        name: status.domain_name().to_string(),
        arn: status.arn().to_string(),
        engine_version: owned(status.engine_version()),
        instance_type: status
            .cluster_config()
            .and_then(|config| config.instance_type())
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        endpoint: owned(status.endpoint()),
        vpc_endpoint: owned(
            status
                .endpoints()
                .and_then(|endpoints| endpoints.get("vpc"))
                .map(String::as_str),
        ),
        vpc_id: owned(status.vpc_options().and_then(|vpc| vpc.vpc_id())),
    }
}
