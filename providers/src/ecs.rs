use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ecs::config::{Builder, Region};
use aws_sdk_ecs::types;
use aws_sdk_ecs::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::{
    AttachmentDetail, Container, ContainerInterface, EcsCluster, EcsTask,
};
use awsinv_core::provider::{EcsApi, ProviderResult};
use tracing::debug;

use crate::{owned, page, sdk_error};

const INTERFACE_ATTACHMENT: &str = "ElasticNetworkInterface";

pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl EcsApi for EcsClient {
    async fn list_clusters(&self, token: Option<String>) -> ProviderResult<Page<String>> {
        let resp = self
            .client
            .list_clusters()
            .set_next_token(token)
            .send()
            .await
            .map_err(sdk_error("ListClusters"))?;

        Ok(page(resp.cluster_arns().to_vec(), resp.next_token()))
    }

    async fn describe_clusters(&self, arns: &[String]) -> ProviderResult<Vec<EcsCluster>> {
        let resp = self
            .client
            .describe_clusters()
            .set_clusters(Some(arns.to_vec()))
            .send()
            .await
            .map_err(sdk_error("DescribeClusters"))?;

        log_failures(resp.failures());
        Ok(resp
            .clusters()
            .iter()
            .map(|cluster| EcsCluster {
                arn: owned(cluster.cluster_arn()),
                name: owned(cluster.cluster_name()),
            })
            .collect())
    }

    async fn list_tasks(
        &self,
        cluster: &str,
        token: Option<String>,
    ) -> ProviderResult<Page<String>> {
        let resp = self
            .client
            .list_tasks()
            .cluster(cluster)
            .set_next_token(token)
            .send()
            .await
            .map_err(sdk_error("ListTasks"))?;

        Ok(page(resp.task_arns().to_vec(), resp.next_token()))
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> ProviderResult<Vec<EcsTask>> {
        let resp = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(arns.to_vec()))
            .send()
            .await
            .map_err(sdk_error("DescribeTasks"))?;

        log_failures(resp.failures());
        Ok(resp.tasks().iter().map(task).collect())
    }
}

/// ECS lists the items it could not describe beside the result.
fn log_failures(failures: &[types::Failure]) {
    for failure in failures {
        debug!(
            "skipping {}: {}",
            failure.arn().unwrap_or_default(),
            failure.reason().unwrap_or_default()
        );
    }
}

fn task(task: &types::Task) -> EcsTask {
    EcsTask {
        arn: owned(task.task_arn()),
        group: owned(task.group()),
        launch_type: task
            .launch_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        platform_version: owned(task.platform_version()),
        interface_details: task
            .attachments()
            .iter()
            .filter(|attachment| attachment.r#type() == Some(INTERFACE_ATTACHMENT))
            .flat_map(|attachment| attachment.details())
            .map(|detail| AttachmentDetail {
                name: owned(detail.name()),
                value: owned(detail.value()),
            })
            .collect(),
        containers: task.containers().iter().map(container).collect(),
    }
}

fn container(container: &types::Container) -> Container {
    Container {
        name: owned(container.name()),
        runtime_id: owned(container.runtime_id()),
        arn: owned(container.container_arn()),
        image: owned(container.image()),
        network_interfaces: container
            .network_interfaces()
            .iter()
            .map(|interface| ContainerInterface {
                private_ipv4_address: owned(interface.private_ipv4_address()),
                ipv6_address: owned(interface.ipv6_address()),
            })
            .collect(),
    }
}
