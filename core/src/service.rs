use std::fmt;
use std::str::FromStr;

use crate::error::LoadError;

/// A provider service the inventory knows how to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    CloudFront,
    DynamoDb,
    Ebs,
    Ec2,
    Ecs,
    ElastiCache,
    Elasticsearch,
    Elb,
    ElbV2,
    Iam,
    Lambda,
    Rds,
    S3,
}

impl Service {
    pub const ALL: [Service; 13] = [
        Service::CloudFront,
        Service::DynamoDb,
        Service::Ebs,
        Service::Ec2,
        Service::Ecs,
        Service::ElastiCache,
        Service::Elasticsearch,
        Service::Elb,
        Service::ElbV2,
        Service::Iam,
        Service::Lambda,
        Service::Rds,
        Service::S3,
    ];

    /// The key used on the command line and in log fields.
    pub fn key(self) -> &'static str {
        match self {
            Service::CloudFront => "cloudfront",
            Service::DynamoDb => "dynamodb",
            Service::Ebs => "ebs",
            Service::Ec2 => "ec2",
            Service::Ecs => "ecs",
            Service::ElastiCache => "elasticache",
            Service::Elasticsearch => "es",
            Service::Elb => "elb",
            Service::ElbV2 => "elbv2",
            Service::Iam => "iam",
            Service::Lambda => "lambda",
            Service::Rds => "rds",
            Service::S3 => "s3",
        }
    }

    /// Global services are collected once per run instead of once per region.
    pub fn is_global(self) -> bool {
        matches!(self, Service::CloudFront | Service::Iam)
    }

    /// Whether the collector consults the reverse-DNS index.
    pub fn needs_dns_index(self) -> bool {
        matches!(self, Service::Ec2)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Service {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "elasticsearch" {
            return Ok(Service::Elasticsearch);
        }
        Service::ALL
            .into_iter()
            .find(|service| service.key() == s)
            .ok_or_else(|| LoadError::InvalidService(s.to_string()))
    }
}
