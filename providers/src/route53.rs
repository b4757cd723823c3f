use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::config::{Builder, Region};
use aws_sdk_route53::types::{ResourceRecordSet, RrType};
use aws_sdk_route53::Client;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::{HostedZone, RecordCursor, RecordSet};
use awsinv_core::provider::{ProviderResult, Route53Api};

use crate::{sdk_error, truncated_page};

pub struct Route53Client {
    client: Client,
}

impl Route53Client {
    pub fn new(sdk: &SdkConfig, region: &str) -> Self {
        let config = Builder::from(sdk).region(Region::new(region.to_string())).build();
        Self {
            client: Client::from_conf(config),
        }
    }
}

#[async_trait]
impl Route53Api for Route53Client {
    async fn list_hosted_zones(&self, marker: Option<String>) -> ProviderResult<Page<HostedZone>> {
        let resp = self
            .client
            .list_hosted_zones()
            .set_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListHostedZones"))?;

        let zones = resp
            .hosted_zones()
            .iter()
            .map(|zone| HostedZone {
                id: zone.id().to_string(),
                name: zone.name().to_string(),
            })
            .collect();
        Ok(truncated_page(zones, resp.is_truncated(), resp.next_marker()))
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> ProviderResult<Page<RecordSet, RecordCursor>> {
        let mut request = self.client.list_resource_record_sets().hosted_zone_id(zone_id);
        if let Some(cursor) = cursor {
            request = request
                .start_record_name(cursor.name)
                .set_start_record_type(cursor.record_type.as_deref().map(RrType::from))
                .set_start_record_identifier(cursor.identifier);
        }
        let resp = request
            .send()
            .await
            .map_err(sdk_error("ListResourceRecordSets"))?;

        let records = resp.resource_record_sets().iter().map(record_set).collect();
        let next = match resp.next_record_name() {
            Some(name) if resp.is_truncated() => Some(RecordCursor {
                name: name.to_string(),
                record_type: resp.next_record_type().map(|t| t.as_str().to_string()),
                identifier: resp.next_record_identifier().map(str::to_string),
            }),
            _ => None,
        };
        Ok(Page { items: records, next })
    }
}

/// Alias records carry their target instead of resource records; the target's
/// DNS name is kept as the single value.
fn record_set(set: &ResourceRecordSet) -> RecordSet {
    let mut values: Vec<String> = set
        .resource_records()
        .iter()
        .map(|record| record.value().to_string())
        .collect();
    if let Some(alias) = set.alias_target() {
        values.push(alias.dns_name().to_string());
    }

    RecordSet {
        record_type: set.r#type().as_str().to_string(),
        name: set.name().to_string(),
        values,
    }
}
