use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::{debug, info, warn};

use super::{Collector, Scope, append_if_missing};
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::{EcsCluster, EcsTask};
use crate::provider::{Ec2Api, EcsApi};
use crate::service::Service;

pub const ASSET_TYPE: &str = "ECS Container";

/// Most ARNs `DescribeClusters` and `DescribeTasks` accept in one call.
const DESCRIBE_BATCH: usize = 100;

/// One row per running container.
///
/// Clusters are listed and described up front. Each cluster then lists and
/// describes its tasks in its own unit, and each task resolves its VPC from
/// its network interfaces in a nested unit, so one bad cluster or task only
/// costs its own rows.
pub struct EcsCollector;

#[async_trait]
impl Collector for EcsCollector {
    fn service(&self) -> Service {
        Service::Ecs
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let ecs = scope.clients.ecs(&region);
        let ec2 = scope.clients.ec2(&region);

        info!("loading data");

        let arns = paginate(|token| ecs.list_clusters(token)).await?;
        if arns.is_empty() {
            return Ok(());
        }

        let mut clusters = Vec::with_capacity(arns.len());
        for batch in arns.chunks(DESCRIBE_BATCH) {
            clusters.extend(ecs.describe_clusters(batch).await?);
        }

        info!("processing data");

        let mut group = scope.describe_group();
        for cluster in clusters {
            let cluster_scope = scope.clone();
            let ecs = Arc::clone(&ecs);
            let ec2 = Arc::clone(&ec2);
            let subject = Some(cluster.name.clone());

            group.spawn(scope.emitter.clone(), subject, async move {
                collect_cluster(&cluster_scope, ecs, ec2, cluster).await?;
                Ok(Vec::new())
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

async fn collect_cluster(
    scope: &Scope,
    ecs: Arc<dyn EcsApi>,
    ec2: Arc<dyn Ec2Api>,
    cluster: EcsCluster,
) -> Result<(), CollectError> {
    let arns = paginate(|token| ecs.list_tasks(&cluster.arn, token)).await?;
    if arns.is_empty() {
        debug!("no tasks in {}", cluster.name);
        return Ok(());
    }

    let mut tasks = Vec::with_capacity(arns.len());
    for batch in arns.chunks(DESCRIBE_BATCH) {
        tasks.extend(ecs.describe_tasks(&cluster.arn, batch).await?);
    }

    let region = scope.client_region().to_string();
    let mut group = scope.describe_group();
    for task in tasks {
        let ec2 = Arc::clone(&ec2);
        let cluster_name = cluster.name.clone();
        let region = region.clone();
        let subject = Some(task.arn.clone());

        group.spawn(scope.emitter.clone(), subject, async move {
            let vpc_id = task_vpc(ec2.as_ref(), &task).await;
            Ok(container_rows(&cluster_name, &task, &vpc_id, &region))
        });
    }
    group.join().await;

    Ok(())
}

/// VPC of the task's first network interface. A failed lookup leaves the
/// column empty instead of dropping the task's rows.
async fn task_vpc(ec2: &dyn Ec2Api, task: &EcsTask) -> String {
    let interface_ids: Vec<String> = task
        .interface_details
        .iter()
        .filter(|detail| detail.name == "networkInterfaceId")
        .map(|detail| detail.value.clone())
        .collect();
    if interface_ids.is_empty() {
        return String::new();
    }

    match ec2.network_interface_vpc(&interface_ids).await {
        Ok(vpc) => vpc.unwrap_or_default(),
        Err(e) => {
            warn!("failed to load network interfaces for {}: {e}", task.arn);
            String::new()
        }
    }
}

fn container_rows(cluster_name: &str, task: &EcsTask, vpc_id: &str, region: &str) -> Vec<Row> {
    let mut task_ips: Vec<String> = Vec::new();
    let mut macs: Vec<String> = Vec::new();
    for detail in &task.interface_details {
        match detail.name.as_str() {
            "privateIPv4Address" | "ipv6Address" => task_ips.push(detail.value.clone()),
            "macAddress" => macs.push(detail.value.clone()),
            _ => {}
        }
    }

    let hardware = if task.launch_type == "FARGATE" {
        format!("{} {}", task.launch_type, task.platform_version)
    } else {
        task.launch_type.clone()
    };

    task.containers
        .iter()
        .map(|container| {
            let mut ips = task_ips.clone();
            for interface in &container.network_interfaces {
                if !interface.private_ipv4_address.is_empty() {
                    append_if_missing(&mut ips, &interface.private_ipv4_address);
                }
                if !interface.ipv6_address.is_empty() {
                    append_if_missing(&mut ips, &interface.ipv6_address);
                }
            }

            Row {
                unique_asset_identifier: format!("{}-{}", container.name, container.runtime_id),
                ip_address: ips.join("\n"),
                is_virtual: true,
                mac_address: macs.join("\n"),
                baseline_configuration_name: container.image.clone(),
                location: region.to_string(),
                asset_type: ASSET_TYPE.to_string(),
                hardware_make_model: hardware.clone(),
                function: format!("{cluster_name} {}", task.group),
                serial_asset_tag_number: container.arn.clone(),
                vlan_network_id: vpc_id.to_string(),
                ..Default::default()
            }
        })
        .collect()
}
