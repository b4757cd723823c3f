//! Provider items as the collectors see them.
//!
//! Adapters translate SDK responses into these plain structs so collectors and
//! tests never touch SDK types. Optional provider strings that are absent in a
//! response are carried as empty strings, except for addresses, where absence
//! matters to the reverse-DNS lookup.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Value of the `Name` tag, or empty.
pub fn name_tag(tags: &[Tag]) -> &str {
    tags.iter()
        .rev()
        .find(|tag| tag.key == "Name")
        .map(|tag| tag.value.as_str())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateIp {
    pub address: String,
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkInterface {
    pub private_ip_address: String,
    pub private_ip_addresses: Vec<PrivateIp>,
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: String,
    pub instance_type: String,
    pub image_id: String,
    pub vpc_id: String,
    pub public_ip_address: Option<String>,
    pub private_ip_address: Option<String>,
    pub public_dns_name: Option<String>,
    pub private_dns_name: Option<String>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub image_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Volume {
    pub volume_id: String,
    pub volume_type: String,
    pub size_gib: i32,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub arn: String,
    pub size_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheNode {
    pub node_id: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheCluster {
    pub cluster_id: String,
    pub arn: String,
    pub node_type: String,
    pub engine: String,
    pub engine_version: String,
    pub parameter_group: String,
    pub subnet_group: String,
    pub nodes: Vec<CacheNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcsCluster {
    pub arn: String,
    pub name: String,
}

/// One `name`/`value` pair from a task's network interface attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentDetail {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerInterface {
    pub private_ipv4_address: String,
    pub ipv6_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub runtime_id: String,
    pub arn: String,
    pub image: String,
    pub network_interfaces: Vec<ContainerInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcsTask {
    pub arn: String,
    /// Task group, e.g. `service:web`.
    pub group: String,
    /// `EC2`, `FARGATE` or `EXTERNAL`.
    pub launch_type: String,
    pub platform_version: String,
    /// Details of the task's elastic network interface attachments only.
    pub interface_details: Vec<AttachmentDetail>,
    pub containers: Vec<Container>,
}

/// An Elasticsearch or OpenSearch domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDomain {
    pub name: String,
    pub arn: String,
    /// Engine and version joined by an underscore, e.g. `Elasticsearch_7.10`.
    pub engine_version: String,
    pub instance_type: String,
    /// Public endpoint; empty for domains inside a VPC.
    pub endpoint: String,
    pub vpc_endpoint: String,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicLoadBalancer {
    pub name: String,
    pub dns_name: String,
    pub scheme: String,
    pub canonical_hosted_zone_name: String,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBalancer {
    pub name: String,
    pub arn: String,
    pub dns_name: String,
    /// `application`, `network` or `gateway`.
    pub kind: String,
    pub scheme: String,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub arn: String,
    pub version: String,
    pub runtime: String,
    pub description: String,
    pub timeout_secs: i32,
    pub memory_mb: i32,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbInstance {
    pub identifier: String,
    pub arn: String,
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    pub endpoint_address: String,
    pub publicly_accessible: bool,
    pub vpc_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    pub id: String,
    pub arn: String,
    pub domain_name: String,
    pub aliases: Vec<String>,
    pub origins: Vec<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostedZone {
    pub id: String,
    pub name: String,
}

/// A DNS record set: the record type, the record name, and its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub record_type: String,
    pub name: String,
    pub values: Vec<String>,
}

/// Resume point of a record-set listing. Route 53 continues from a
/// (name, type, set identifier) triple instead of an opaque token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCursor {
    pub name: String,
    pub record_type: Option<String>,
    pub identifier: Option<String>,
}
