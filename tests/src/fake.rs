use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use awsinv_common::inventory::Row;
use awsinv_common::regions::DEFAULT_REGION;
use awsinv_core::ProviderError;
use awsinv_core::paginate::Page;
use awsinv_core::provider::models::{
    Bucket, CacheCluster, ClassicLoadBalancer, DbInstance, Distribution, EcsCluster, EcsTask,
    Function, HostedZone, Image, Instance, LoadBalancer, RecordCursor, RecordSet, SearchDomain,
    Table, User, Volume,
};
use awsinv_core::provider::{
    ClientFactory, CloudFrontApi, DynamoDbApi, Ec2Api, EcsApi, ElastiCacheApi, ElasticsearchApi,
    ElbApi, ElbV2Api, IamApi, LambdaApi, ProviderResult, RdsApi, Route53Api, S3Api,
};
use awsinv_core::sink::RowSink;

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub region: String,
    pub subject: Option<String>,
}

/// What a region holds. List data is stored as pages; a single page is the
/// common case.
#[derive(Debug, Clone, Default)]
pub struct RegionData {
    pub account_id: Option<String>,
    pub instances: Vec<Vec<Instance>>,
    pub images: Vec<Image>,
    pub volumes: Vec<Vec<Volume>>,
    /// VPC of each network interface id.
    pub interface_vpcs: HashMap<String, String>,
    /// Each cluster with the tasks running in it.
    pub ecs_clusters: Vec<(EcsCluster, Vec<EcsTask>)>,
    pub tables: Vec<Table>,
    pub clusters: Vec<CacheCluster>,
    pub subnet_group_vpcs: HashMap<String, String>,
    pub classic_balancers: Vec<ClassicLoadBalancer>,
    pub balancers: Vec<LoadBalancer>,
    pub functions: Vec<Vec<Function>>,
    pub databases: Vec<DbInstance>,
    pub search_domains: Vec<SearchDomain>,
}

#[derive(Debug, Default)]
struct Cloud {
    regions: HashMap<String, RegionData>,
    distributions: Vec<Distribution>,
    users: Vec<Vec<User>>,
    zones: Vec<(HostedZone, Vec<Vec<RecordSet>>)>,
    /// Buckets are account-wide; each carries its raw location constraint.
    buckets: Vec<(Bucket, String)>,
    failing: HashSet<(&'static str, String)>,
    stalled: HashSet<(&'static str, String)>,
    panicking: HashSet<(&'static str, String)>,
    calls: Vec<Call>,
}

/// An in-memory provider. Clones share state, so a test keeps one handle to
/// inspect calls after handing another to the loader.
#[derive(Debug, Clone, Default)]
pub struct FakeCloud {
    cloud: Arc<Mutex<Cloud>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Cloud> {
        self.cloud.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Edits the data of `region`, creating it if needed.
    pub fn region(self, region: &str, edit: impl FnOnce(&mut RegionData)) -> Self {
        edit(self.state().regions.entry(region.to_string()).or_default());
        self
    }

    pub fn with_distributions(self, distributions: Vec<Distribution>) -> Self {
        self.state().distributions = distributions;
        self
    }

    pub fn with_user_pages(self, pages: Vec<Vec<User>>) -> Self {
        self.state().users = pages;
        self
    }

    pub fn with_zone(self, zone: HostedZone, pages: Vec<Vec<RecordSet>>) -> Self {
        self.state().zones.push((zone, pages));
        self
    }

    pub fn with_bucket(self, name: &str, constraint: &str) -> Self {
        self.state().buckets.push((
            Bucket {
                name: name.to_string(),
            },
            constraint.to_string(),
        ));
        self
    }

    /// Makes `operation` fail when called in region `key` or on item `key`.
    pub fn failing(self, operation: &'static str, key: &str) -> Self {
        self.state().failing.insert((operation, key.to_string()));
        self
    }

    /// Makes `operation` never return when called in region or on item `key`.
    pub fn stalled(self, operation: &'static str, key: &str) -> Self {
        self.state().stalled.insert((operation, key.to_string()));
        self
    }

    /// Makes `operation` panic when called in region or on item `key`.
    pub fn panicking(self, operation: &'static str, key: &str) -> Self {
        self.state().panicking.insert((operation, key.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation == operation)
            .collect()
    }

    fn client(&self, region: &str) -> Arc<FakeClient> {
        Arc::new(FakeClient {
            cloud: self.clone(),
            region: region.to_string(),
        })
    }
}

impl ClientFactory for FakeCloud {
    fn cloudfront(&self, region: &str) -> Arc<dyn CloudFrontApi> {
        self.client(region)
    }

    fn dynamodb(&self, region: &str) -> Arc<dyn DynamoDbApi> {
        self.client(region)
    }

    fn ec2(&self, region: &str) -> Arc<dyn Ec2Api> {
        self.client(region)
    }

    fn ecs(&self, region: &str) -> Arc<dyn EcsApi> {
        self.client(region)
    }

    fn elasticache(&self, region: &str) -> Arc<dyn ElastiCacheApi> {
        self.client(region)
    }

    fn elasticsearch(&self, region: &str) -> Arc<dyn ElasticsearchApi> {
        self.client(region)
    }

    fn elb(&self, region: &str) -> Arc<dyn ElbApi> {
        self.client(region)
    }

    fn elbv2(&self, region: &str) -> Arc<dyn ElbV2Api> {
        self.client(region)
    }

    fn iam(&self, region: &str) -> Arc<dyn IamApi> {
        self.client(region)
    }

    fn lambda(&self, region: &str) -> Arc<dyn LambdaApi> {
        self.client(region)
    }

    fn rds(&self, region: &str) -> Arc<dyn RdsApi> {
        self.client(region)
    }

    fn route53(&self, region: &str) -> Arc<dyn Route53Api> {
        self.client(region)
    }

    fn s3(&self, region: &str) -> Arc<dyn S3Api> {
        self.client(region)
    }
}

/// A client bound to one region.
struct FakeClient {
    cloud: FakeCloud,
    region: String,
}

impl FakeClient {
    /// Records the call, then applies any injected stall, panic or failure.
    async fn call(&self, operation: &'static str, subject: Option<&str>) -> ProviderResult<()> {
        let (stall, panic, fail) = {
            let mut cloud = self.cloud.state();
            cloud.calls.push(Call {
                operation,
                region: self.region.clone(),
                subject: subject.map(str::to_string),
            });
            let matches = |set: &HashSet<(&'static str, String)>| {
                set.contains(&(operation, self.region.clone()))
                    || subject.is_some_and(|s| set.contains(&(operation, s.to_string())))
            };
            (
                matches(&cloud.stalled),
                matches(&cloud.panicking),
                matches(&cloud.failing),
            )
        };

        if stall {
            std::future::pending::<()>().await;
        }
        if panic {
            panic!("{operation} blew up");
        }
        if fail {
            return Err(ProviderError::new(operation, "injected failure"));
        }
        Ok(())
    }

    fn with_region<T>(&self, read: impl FnOnce(&RegionData) -> T) -> T {
        let cloud = self.cloud.state();
        match cloud.regions.get(&self.region) {
            Some(data) => read(data),
            None => read(&RegionData::default()),
        }
    }
}

/// Serves `pages` with the page index as the continuation token.
fn paged<T: Clone>(pages: &[Vec<T>], token: Option<String>) -> Page<T> {
    let index: usize = token.and_then(|t| t.parse().ok()).unwrap_or(0);
    let items = pages.get(index).cloned().unwrap_or_default();
    if index + 1 < pages.len() {
        Page::more(items, (index + 1).to_string())
    } else {
        Page::last(items)
    }
}

fn single<T: Clone>(items: &[T], token: Option<String>) -> Page<T> {
    paged(&[items.to_vec()], token)
}

#[async_trait]
impl CloudFrontApi for FakeClient {
    async fn list_distributions(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<Distribution>> {
        self.call("ListDistributions", None).await?;
        Ok(single(&self.cloud.state().distributions, marker))
    }
}

#[async_trait]
impl DynamoDbApi for FakeClient {
    async fn list_tables(&self, start: Option<String>) -> ProviderResult<Page<String>> {
        self.call("ListTables", None).await?;
        let names: Vec<String> =
            self.with_region(|r| r.tables.iter().map(|t| t.name.clone()).collect());
        Ok(single(&names, start))
    }

    async fn describe_table(&self, name: &str) -> ProviderResult<Table> {
        self.call("DescribeTable", Some(name)).await?;
        self.with_region(|r| r.tables.iter().find(|t| t.name == name).cloned())
            .ok_or_else(|| ProviderError::new("DescribeTable", format!("{name} not found")))
    }
}

#[async_trait]
impl Ec2Api for FakeClient {
    async fn account_id(&self) -> ProviderResult<Option<String>> {
        self.call("DescribeSecurityGroups", None).await?;
        Ok(self.with_region(|r| r.account_id.clone()))
    }

    async fn describe_instances(&self, token: Option<String>) -> ProviderResult<Page<Instance>> {
        self.call("DescribeInstances", None).await?;
        Ok(self.with_region(|r| paged(&r.instances, token)))
    }

    async fn describe_image(&self, image_id: &str) -> ProviderResult<Option<Image>> {
        self.call("DescribeImages", Some(image_id)).await?;
        Ok(self.with_region(|r| r.images.iter().find(|i| i.image_id == image_id).cloned()))
    }

    async fn describe_volumes(&self, token: Option<String>) -> ProviderResult<Page<Volume>> {
        self.call("DescribeVolumes", None).await?;
        Ok(self.with_region(|r| paged(&r.volumes, token)))
    }

    async fn network_interface_vpc(
        &self,
        interface_ids: &[String],
    ) -> ProviderResult<Option<String>> {
        let first = interface_ids.first().map(String::as_str);
        self.call("DescribeNetworkInterfaces", first).await?;
        Ok(self.with_region(|r| {
            interface_ids
                .iter()
                .find_map(|id| r.interface_vpcs.get(id).cloned())
        }))
    }
}

#[async_trait]
impl EcsApi for FakeClient {
    async fn list_clusters(&self, token: Option<String>) -> ProviderResult<Page<String>> {
        self.call("ListClusters", None).await?;
        let arns: Vec<String> =
            self.with_region(|r| r.ecs_clusters.iter().map(|(c, _)| c.arn.clone()).collect());
        Ok(single(&arns, token))
    }

    async fn describe_clusters(&self, arns: &[String]) -> ProviderResult<Vec<EcsCluster>> {
        self.call("DescribeClusters", None).await?;
        Ok(self.with_region(|r| {
            r.ecs_clusters
                .iter()
                .filter(|(c, _)| arns.contains(&c.arn))
                .map(|(c, _)| c.clone())
                .collect()
        }))
    }

    async fn list_tasks(
        &self,
        cluster: &str,
        token: Option<String>,
    ) -> ProviderResult<Page<String>> {
        self.call("ListTasks", Some(cluster)).await?;
        let arns: Vec<String> = self.with_region(|r| {
            r.ecs_clusters
                .iter()
                .filter(|(c, _)| c.arn == cluster)
                .flat_map(|(_, tasks)| tasks.iter().map(|t| t.arn.clone()))
                .collect()
        });
        Ok(single(&arns, token))
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> ProviderResult<Vec<EcsTask>> {
        self.call("DescribeTasks", Some(cluster)).await?;
        Ok(self.with_region(|r| {
            r.ecs_clusters
                .iter()
                .filter(|(c, _)| c.arn == cluster)
                .flat_map(|(_, tasks)| tasks.iter().filter(|t| arns.contains(&t.arn)).cloned())
                .collect()
        }))
    }
}

#[async_trait]
impl ElastiCacheApi for FakeClient {
    async fn describe_cache_clusters(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<CacheCluster>> {
        self.call("DescribeCacheClusters", None).await?;
        Ok(self.with_region(|r| single(&r.clusters, marker)))
    }

    async fn subnet_group_vpc(&self, group: &str) -> ProviderResult<Option<String>> {
        self.call("DescribeCacheSubnetGroups", Some(group)).await?;
        Ok(self.with_region(|r| r.subnet_group_vpcs.get(group).cloned()))
    }
}

#[async_trait]
impl ElasticsearchApi for FakeClient {
    async fn list_domain_names(&self) -> ProviderResult<Vec<String>> {
        self.call("ListDomainNames", None).await?;
        Ok(self.with_region(|r| r.search_domains.iter().map(|d| d.name.clone()).collect()))
    }

    async fn describe_domains(&self, names: &[String]) -> ProviderResult<Vec<SearchDomain>> {
        let first = names.first().map(String::as_str);
        self.call("DescribeDomains", first).await?;
        Ok(self.with_region(|r| {
            r.search_domains
                .iter()
                .filter(|d| names.contains(&d.name))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl ElbApi for FakeClient {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<ClassicLoadBalancer>> {
        self.call("DescribeClassicLoadBalancers", None).await?;
        Ok(self.with_region(|r| single(&r.classic_balancers, marker)))
    }
}

#[async_trait]
impl ElbV2Api for FakeClient {
    async fn describe_load_balancers(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<LoadBalancer>> {
        self.call("DescribeLoadBalancers", None).await?;
        Ok(self.with_region(|r| single(&r.balancers, marker)))
    }
}

#[async_trait]
impl IamApi for FakeClient {
    async fn list_users(&self, marker: Option<String>) -> ProviderResult<Page<User>> {
        self.call("ListUsers", None).await?;
        Ok(paged(&self.cloud.state().users, marker))
    }
}

#[async_trait]
impl LambdaApi for FakeClient {
    async fn list_functions(&self, marker: Option<String>) -> ProviderResult<Page<Function>> {
        self.call("ListFunctions", None).await?;
        Ok(self.with_region(|r| paged(&r.functions, marker)))
    }
}

#[async_trait]
impl RdsApi for FakeClient {
    async fn describe_db_instances(
        &self,
        marker: Option<String>,
    ) -> ProviderResult<Page<DbInstance>> {
        self.call("DescribeDBInstances", None).await?;
        Ok(self.with_region(|r| single(&r.databases, marker)))
    }
}

#[async_trait]
impl Route53Api for FakeClient {
    async fn list_hosted_zones(&self, marker: Option<String>) -> ProviderResult<Page<HostedZone>> {
        self.call("ListHostedZones", None).await?;
        let zones: Vec<HostedZone> =
            self.cloud.state().zones.iter().map(|(z, _)| z.clone()).collect();
        Ok(single(&zones, marker))
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
    ) -> ProviderResult<Page<RecordSet, RecordCursor>> {
        self.call("ListResourceRecordSets", Some(zone_id)).await?;

        let cloud = self.cloud.state();
        let pages = cloud
            .zones
            .iter()
            .find(|(zone, _)| zone.id == zone_id)
            .map(|(_, pages)| pages.as_slice())
            .unwrap_or_default();
        let page = paged(pages, cursor.map(|c| c.name));
        Ok(Page {
            items: page.items,
            next: page.next.map(|name| RecordCursor {
                name,
                record_type: None,
                identifier: None,
            }),
        })
    }
}

#[async_trait]
impl S3Api for FakeClient {
    async fn list_buckets(&self, token: Option<String>) -> ProviderResult<Page<Bucket>> {
        self.call("ListBuckets", None).await?;
        let buckets: Vec<Bucket> =
            self.cloud.state().buckets.iter().map(|(b, _)| b.clone()).collect();
        Ok(single(&buckets, token))
    }

    async fn bucket_location(&self, bucket: &str) -> ProviderResult<String> {
        self.call("GetBucketLocation", Some(bucket)).await?;
        self.cloud
            .state()
            .buckets
            .iter()
            .find(|(b, _)| b.name == bucket)
            .map(|(_, constraint)| constraint.clone())
            .ok_or_else(|| {
                ProviderError::new("GetBucketLocation", format!("{bucket} not found"))
            })
    }
}

/// A sink that keeps every row it receives.
pub fn recording_sink() -> (Box<dyn RowSink>, Arc<Mutex<Vec<Row>>>) {
    let rows = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&rows);
    let sink = move |row: Row| -> anyhow::Result<()> {
        recorder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(row);
        Ok(())
    };
    (Box::new(sink), rows)
}

/// Region global services are reached through.
pub const GLOBAL_REGION: &str = DEFAULT_REGION;
