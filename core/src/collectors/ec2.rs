use std::sync::Arc;

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use tracing::{info, warn};

use super::{Collector, Scope, append_if_missing};
use crate::dns_index::InstanceAddresses;
use crate::error::CollectError;
use crate::paginate::paginate;
use crate::provider::models::{Instance, name_tag};
use crate::service::Service;

pub const ASSET_TYPE: &str = "EC2 Instance";

pub struct Ec2Collector;

#[async_trait]
impl Collector for Ec2Collector {
    fn service(&self) -> Service {
        Service::Ec2
    }

    async fn collect(&self, scope: Scope) -> Result<(), CollectError> {
        let region = scope.client_region().to_string();
        let ec2 = scope.clients.ec2(&region);

        info!("loading data");

        let account_id = ec2.account_id().await?.unwrap_or_default();
        let instances = paginate(|token| ec2.describe_instances(token)).await?;
        if instances.is_empty() {
            info!("no instances found");
            return Ok(());
        }

        info!("processing data");

        let arn_prefix = format!("arn:{}:ec2:{region}:{account_id}:instance/", scope.partition());
        let mut group = scope.describe_group();
        for instance in instances {
            let ec2 = Arc::clone(&ec2);
            let dns = Arc::clone(&scope.dns);
            let region = region.clone();
            let arn_prefix = arn_prefix.clone();
            let subject = Some(instance.instance_id.clone());

            group.spawn(scope.emitter.clone(), subject, async move {
                let os_name = if instance.image_id.is_empty() {
                    String::new()
                } else {
                    match ec2.describe_image(&instance.image_id).await {
                        Ok(image) => image.map(|i| i.name).unwrap_or_default(),
                        Err(e) => {
                            warn!("failed to load ami for {}: {e}", instance.instance_id);
                            String::new()
                        }
                    }
                };
                let dns_names = dns.lookup(&InstanceAddresses::from(&instance));
                let serial = format!("{arn_prefix}{}", instance.instance_id);

                Ok(vec![instance_row(&instance, dns_names, os_name, &region, serial)])
            });
        }
        group.join().await;

        info!("finished processing data");
        Ok(())
    }
}

/// Maps one instance. `dns_names` are the reverse-DNS index matches; the
/// instance's own public and private DNS names are appended after them.
fn instance_row(
    instance: &Instance,
    mut dns_names: Vec<String>,
    os_name: String,
    region: &str,
    serial: String,
) -> Row {
    let mut public = false;
    let mut ips: Vec<String> = Vec::new();
    let mut macs: Vec<String> = Vec::new();

    if let Some(ip) = instance.public_ip_address.as_deref().filter(|ip| !ip.is_empty()) {
        ips.push(ip.to_string());
        public = true;
    }

    for interface in &instance.network_interfaces {
        if !interface.private_ip_address.is_empty() {
            ips.push(interface.private_ip_address.clone());
        }
        for private_ip in interface.private_ip_addresses.iter().filter(|p| p.primary) {
            append_if_missing(&mut ips, &private_ip.address);
        }
        if !interface.mac_address.is_empty() {
            macs.push(interface.mac_address.clone());
        }
    }

    if let Some(name) = instance.public_dns_name.as_deref().filter(|n| !n.is_empty()) {
        append_if_missing(&mut dns_names, name);
        public = true;
    }
    if let Some(name) = instance.private_dns_name.as_deref().filter(|n| !n.is_empty()) {
        append_if_missing(&mut dns_names, name);
    }

    Row {
        unique_asset_identifier: instance.instance_id.clone(),
        ip_address: ips.join("\n"),
        is_virtual: true,
        is_public: public,
        dns_name_or_url: dns_names.join("\n"),
        mac_address: macs.join("\n"),
        baseline_configuration_name: instance.image_id.clone(),
        os_name_and_version: os_name,
        location: region.to_string(),
        asset_type: ASSET_TYPE.to_string(),
        hardware_make_model: instance.instance_type.clone(),
        function: name_tag(&instance.tags).to_string(),
        serial_asset_tag_number: serial,
        vlan_network_id: instance.vpc_id.clone(),
        ..Default::default()
    }
}
