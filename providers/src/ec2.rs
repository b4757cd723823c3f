use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::config::{Builder, Region};
use aws_sdk_ec2::types::{self, Filter};
use aws_sdk_ec2::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::{Image, Instance, NetworkInterface, PrivateIp, Tag, Volume};
use awsinv_core::provider::{Ec2Api, ProviderResult};
use tracing::debug;

use crate::{owned, page, sdk_error};

/// Instances in these states are inventoried; terminated ones are not.
const INSTANCE_STATES: [&str; 4] = ["pending", "running", "stopping", "stopped"];

pub struct Ec2Client {
    client: Client,
}

impl Ec2Client {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl Ec2Api for Ec2Client {
    async fn account_id(&self) -> ProviderResult<Option<String>> {
        let resp = self
            .client
            .describe_security_groups()
            .max_results(5)
            .send()
            .await
            .map_err(sdk_error("DescribeSecurityGroups"))?;

        Ok(resp
            .security_groups()
            .first()
            .and_then(|group| group.owner_id())
            .map(str::to_string))
    }

    async fn describe_instances(&self, token: Option<String>) -> ProviderResult<Page<Instance>> {
        let state = Filter::builder()
            .name("instance-state-name")
            .set_values(Some(INSTANCE_STATES.iter().map(|s| s.to_string()).collect()))
            .build();
        let resp = self
            .client
            .describe_instances()
            .filters(state)
            .set_next_token(token)
            .send()
            .await
            .map_err(sdk_error("DescribeInstances"))?;

        let instances = resp
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .map(instance)
            .collect();
        Ok(page(instances, resp.next_token()))
    }

    async fn describe_image(&self, image_id: &str) -> ProviderResult<Option<Image>> {
        debug!("describing image {image_id}");
        let resp = self
            .client
            .describe_images()
            .image_ids(image_id)
            .send()
            .await
            .map_err(sdk_error("DescribeImages"))?;

        Ok(resp.images().first().map(|image| Image {
            image_id: owned(image.image_id()),
            name: owned(image.name()),
        }))
    }

    async fn describe_volumes(&self, token: Option<String>) -> ProviderResult<Page<Volume>> {
        let resp = self
            .client
            .describe_volumes()
            .set_next_token(token)
            .send()
            .await
            .map_err(sdk_error("DescribeVolumes"))?;

        let volumes = resp
            .volumes()
            .iter()
            .map(|volume| Volume {
                volume_id: owned(volume.volume_id()),
                volume_type: volume
                    .volume_type()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
                size_gib: volume.size().unwrap_or_default(),
                tags: tags(volume.tags()),
            })
            .collect();
        Ok(page(volumes, resp.next_token()))
    }

    async fn network_interface_vpc(
        &self,
        interface_ids: &[String],
    ) -> ProviderResult<Option<String>> {
        let resp = self
            .client
            .describe_network_interfaces()
            .set_network_interface_ids(Some(interface_ids.to_vec()))
            .send()
            .await
            .map_err(sdk_error("DescribeNetworkInterfaces"))?;

        Ok(resp
            .network_interfaces()
            .first()
            .and_then(|interface| interface.vpc_id())
            .map(str::to_string))
    }
}

fn instance(instance: &types::Instance) -> Instance {
    Instance {
        instance_id: owned(instance.instance_id()),
        instance_type: instance
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        image_id: owned(instance.image_id()),
        vpc_id: owned(instance.vpc_id()),
        public_ip_address: instance.public_ip_address().map(str::to_string),
        private_ip_address: instance.private_ip_address().map(str::to_string),
        public_dns_name: instance.public_dns_name().map(str::to_string),
        private_dns_name: instance.private_dns_name().map(str::to_string),
        network_interfaces: instance
            .network_interfaces()
            .iter()
            .map(|interface| NetworkInterface {
                private_ip_address: owned(interface.private_ip_address()),
                private_ip_addresses: interface
                    .private_ip_addresses()
                    .iter()
                    .map(|ip| PrivateIp {
                        address: owned(ip.private_ip_address()),
                        primary: ip.primary().unwrap_or(false),
                    })
                    .collect(),
                mac_address: owned(interface.mac_address()),
            })
            .collect(),
        tags: tags(instance.tags()),
    }
}

fn tags(tags: &[types::Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|tag| Tag {
            key: owned(tag.key()),
            value: owned(tag.value()),
        })
        .collect()
}
