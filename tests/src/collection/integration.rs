use std::sync::Arc;

use awsinv_core::provider::models::{
    AttachmentDetail, CacheCluster, CacheNode, Container, EcsCluster, EcsTask, Function,
    SearchDomain, Table, User,
};
use awsinv_core::{LoadError, Loader, Service};

use crate::fake::{FakeCloud, recording_sink};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn function(name: &str) -> Function {
    Function {
        name: name.to_string(),
        arn: format!("arn:aws:lambda:us-east-1:012345678910:function:{name}"),
        runtime: "python3.12".to_string(),
        ..Default::default()
    }
}

fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        arn: format!("arn:aws:iam::012345678910:user/{name}"),
    }
}

fn ecs_cluster(name: &str) -> EcsCluster {
    EcsCluster {
        arn: format!("arn:aws:ecs:us-east-1:012345678910:cluster/{name}"),
        name: name.to_string(),
    }
}

fn ecs_task(id: &str, containers: &[&str]) -> EcsTask {
    EcsTask {
        arn: format!("arn:aws:ecs:us-east-1:012345678910:task/{id}"),
        group: "service:web".to_string(),
        launch_type: "FARGATE".to_string(),
        platform_version: "1.4.0".to_string(),
        interface_details: vec![
            AttachmentDetail {
                name: "networkInterfaceId".into(),
                value: format!("eni-{id}"),
            },
            AttachmentDetail {
                name: "privateIPv4Address".into(),
                value: "10.0.3.17".into(),
            },
        ],
        containers: containers
            .iter()
            .map(|name| Container {
                name: name.to_string(),
                runtime_id: format!("{id}-{name}"),
                arn: format!("arn:aws:ecs:us-east-1:012345678910:container/{id}/{name}"),
                image: format!("{name}:latest"),
                network_interfaces: Vec::new(),
            })
            .collect(),
    }
}

fn search_domain(name: &str) -> SearchDomain {
    SearchDomain {
        name: name.to_string(),
        arn: format!("arn:aws:es:us-east-1:012345678910:domain/{name}"),
        engine_version: "Elasticsearch_7.10".to_string(),
        instance_type: "m6g.large.search".to_string(),
        vpc_endpoint: format!("vpc-{name}.us-east-1.es.amazonaws.com"),
        vpc_id: "vpc-0a1b".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn regional_services_need_regions() {
    let cloud = FakeCloud::new();
    let loader = Loader::new(Arc::new(cloud.clone()));

    let result = loader.load(&[], &[], None).await;

    assert_eq!(result, Err(LoadError::NoRegions));
    assert!(cloud.calls().is_empty(), "nothing may start on a rejected selection");
}

#[tokio::test]
async fn validation_reports_regions_before_services() {
    let loader = Loader::new(Arc::new(FakeCloud::new()));

    let result = loader
        .load(&strings(&["us-east-1", "xx-nowhere-1"]), &strings(&["bogus"]), None)
        .await;
    assert_eq!(result, Err(LoadError::InvalidRegion("xx-nowhere-1".into())));

    let result = loader
        .load(&strings(&["us-east-1"]), &strings(&["lambda", "bogus"]), None)
        .await;
    assert_eq!(result, Err(LoadError::InvalidService("bogus".into())));
    assert_eq!(result.unwrap_err().to_string(), "invalid service: bogus");
}

#[tokio::test]
async fn global_services_run_without_regions() {
    let cloud = FakeCloud::new().with_user_pages(vec![vec![user("alice"), user("bob")]]);
    let loader = Loader::new(Arc::new(cloud.clone()));
    let (sink, rows) = recording_sink();

    let summary = loader.load(&[], &strings(&["iam"]), Some(sink)).await.unwrap();

    assert_eq!(summary.collectors, 1);
    assert_eq!(summary.rows, 2);
    let rows = rows.lock().unwrap();
    assert!(rows.iter().all(|r| r.asset_type == "IAM User" && r.location.is_empty()));
    assert_eq!(cloud.calls_to("ListUsers")[0].region, crate::fake::GLOBAL_REGION);
}

#[tokio::test]
async fn one_collector_per_global_and_per_region_service_pair() {
    let loader = Loader::new(Arc::new(FakeCloud::new()));
    let regions = strings(&["us-east-1", "us-west-2", "eu-west-1"]);

    let summary = loader
        .load(&regions, &strings(&["iam", "cloudfront", "lambda", "rds"]), None)
        .await
        .unwrap();
    assert_eq!(summary.collectors, 2 + 3 * 2);

    let summary = loader.load(&regions, &[], None).await.unwrap();
    let globals = Service::ALL.iter().filter(|s| s.is_global()).count();
    let regionals = Service::ALL.len() - globals;
    assert_eq!(summary.collectors, globals + regions.len() * regionals);
    assert_eq!(summary.failures, 0);
}

#[tokio::test]
async fn duplicate_selections_are_collected_once() {
    let cloud = FakeCloud::new().region("us-east-1", |r| {
        r.functions = vec![vec![function("resize")]];
    });
    let loader = Loader::new(Arc::new(cloud));

    let summary = loader
        .load(
            &strings(&["us-east-1", "us-east-1"]),
            &strings(&["lambda", "lambda"]),
            None,
        )
        .await
        .unwrap();

    assert_eq!(summary.collectors, 1);
    assert_eq!(summary.rows, 1);
}

#[tokio::test]
async fn every_page_of_a_listing_is_delivered() {
    let cloud = FakeCloud::new().region("us-east-1", |r| {
        r.functions = vec![
            vec![function("first"), function("second")],
            vec![function("third")],
        ];
    });
    let loader = Loader::new(Arc::new(cloud.clone()));
    let (sink, rows) = recording_sink();

    let summary = loader
        .load(&strings(&["us-east-1"]), &strings(&["lambda"]), Some(sink))
        .await
        .unwrap();

    assert_eq!(summary.rows, 3);
    let ids: Vec<String> = rows
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.unique_asset_identifier.clone())
        .collect();
    assert_eq!(ids, strings(&["first", "second", "third"]));
    assert_eq!(cloud.calls_to("ListFunctions").len(), 2);
}

#[tokio::test]
async fn tables_are_described_and_mapped() {
    let cloud = FakeCloud::new().region("eu-west-1", |r| {
        r.tables = vec![
            Table {
                name: "orders".into(),
                arn: "arn:aws:dynamodb:eu-west-1:012345678910:table/orders".into(),
                size_bytes: 1536,
            },
            Table {
                name: "carts".into(),
                arn: "arn:aws:dynamodb:eu-west-1:012345678910:table/carts".into(),
                size_bytes: 10,
            },
        ];
    });
    let loader = Loader::new(Arc::new(cloud.clone()));
    let (sink, rows) = recording_sink();

    loader
        .load(&strings(&["eu-west-1"]), &strings(&["dynamodb"]), Some(sink))
        .await
        .unwrap();

    let mut rows = rows.lock().unwrap().clone();
    rows.sort_by(|a, b| a.unique_asset_identifier.cmp(&b.unique_asset_identifier));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].unique_asset_identifier, "orders");
    assert_eq!(rows[1].comments, "1.5 kB");
    assert_eq!(rows[0].comments, "10 B");
    assert_eq!(rows[0].location, "eu-west-1");
    assert_eq!(cloud.calls_to("DescribeTable").len(), 2);
}

#[tokio::test]
async fn buckets_are_reported_by_the_region_they_live_in() {
    let cloud = FakeCloud::new()
        .with_bucket("legacy-default", "")
        .with_bucket("legacy-ireland", "EU")
        .with_bucket("oregon-logs", "us-west-2");
    let loader = Loader::new(Arc::new(cloud));
    let (sink, rows) = recording_sink();

    loader
        .load(&strings(&["us-east-1", "eu-west-1"]), &strings(&["s3"]), Some(sink))
        .await
        .unwrap();

    let mut found: Vec<(String, String)> = rows
        .lock()
        .unwrap()
        .iter()
        .map(|r| (r.unique_asset_identifier.clone(), r.location.clone()))
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("legacy-default".to_string(), "us-east-1".to_string()),
            ("legacy-ireland".to_string(), "eu-west-1".to_string()),
        ]
    );
}

#[tokio::test]
async fn cache_clusters_yield_one_row_per_node() {
    let cloud = FakeCloud::new().region("us-east-1", |r| {
        r.clusters = vec![CacheCluster {
            cluster_id: "sessions".into(),
            engine: "redis".into(),
            engine_version: "7.1".into(),
            subnet_group: "private".into(),
            nodes: vec![
                CacheNode {
                    node_id: "0001".into(),
                    address: "a.cache.amazonaws.com".into(),
                },
                CacheNode {
                    node_id: "0002".into(),
                    address: "b.cache.amazonaws.com".into(),
                },
            ],
            ..Default::default()
        }];
        r.subnet_group_vpcs.insert("private".into(), "vpc-0a1b".into());
    });
    let loader = Loader::new(Arc::new(cloud));
    let (sink, rows) = recording_sink();

    loader
        .load(&strings(&["us-east-1"]), &strings(&["elasticache"]), Some(sink))
        .await
        .unwrap();

    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.vlan_network_id == "vpc-0a1b"));
    assert!(rows.iter().any(|r| r.unique_asset_identifier == "sessions-0002"));
}

#[tokio::test]
async fn rows_still_flow_when_the_sink_rejects_some() {
    let cloud = FakeCloud::new().with_user_pages(vec![vec![user("a"), user("b"), user("c")]]);
    let loader = Loader::new(Arc::new(cloud));

    let sink = |row: awsinv_common::inventory::Row| -> anyhow::Result<()> {
        if row.unique_asset_identifier == "b" {
            anyhow::bail!("cannot write {}", row.unique_asset_identifier);
        }
        Ok(())
    };

    let summary = loader
        .load(&[], &strings(&["iam"]), Some(Box::new(sink)))
        .await
        .unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.sink_failures, 1);
    assert_eq!(summary.failures, 0);
}

#[tokio::test]
async fn ecs_containers_are_collected_per_cluster_and_task() {
    let cloud = FakeCloud::new().region("us-east-1", |r| {
        r.ecs_clusters = vec![
            (
                ecs_cluster("prod"),
                vec![ecs_task("t1", &["app", "sidecar"]), ecs_task("t2", &["app"])],
            ),
            (ecs_cluster("idle"), Vec::new()),
        ];
        r.interface_vpcs.insert("eni-t1".into(), "vpc-0a1b".into());
        r.interface_vpcs.insert("eni-t2".into(), "vpc-0a1b".into());
    });
    let loader = Loader::new(Arc::new(cloud.clone()));
    let (sink, rows) = recording_sink();

    let summary = loader
        .load(&strings(&["us-east-1"]), &strings(&["ecs"]), Some(sink))
        .await
        .unwrap();

    assert_eq!(summary.failures, 0);
    let mut rows = rows.lock().unwrap().clone();
    rows.sort_by(|a, b| a.unique_asset_identifier.cmp(&b.unique_asset_identifier));
    let ids: Vec<&str> = rows.iter().map(|r| r.unique_asset_identifier.as_str()).collect();
    assert_eq!(ids, vec!["app-t1-app", "app-t2-app", "sidecar-t1-sidecar"]);
    assert!(rows.iter().all(|r| r.asset_type == "ECS Container"));
    assert!(rows.iter().all(|r| r.vlan_network_id == "vpc-0a1b"));
    assert_eq!(rows[0].function, "prod service:web");
    assert_eq!(rows[0].hardware_make_model, "FARGATE 1.4.0");
    assert_eq!(rows[0].ip_address, "10.0.3.17");
    assert_eq!(cloud.calls_to("ListTasks").len(), 2);
    assert_eq!(cloud.calls_to("DescribeTasks").len(), 1);
    assert_eq!(cloud.calls_to("DescribeNetworkInterfaces").len(), 2);
}

#[tokio::test]
async fn search_domains_are_described_in_batches_of_five() {
    let names = ["a", "b", "c", "d", "e", "f"];
    let cloud = FakeCloud::new().region("us-east-1", |r| {
        r.search_domains = names.iter().map(|n| search_domain(n)).collect();
    });
    let loader = Loader::new(Arc::new(cloud.clone()));
    let (sink, rows) = recording_sink();

    let summary = loader
        .load(&strings(&["us-east-1"]), &strings(&["es"]), Some(sink))
        .await
        .unwrap();

    assert_eq!(summary.rows, 6);
    assert_eq!(cloud.calls_to("DescribeDomains").len(), 2);
    let rows = rows.lock().unwrap();
    let row = rows.iter().find(|r| r.unique_asset_identifier == "f").unwrap();
    assert_eq!(row.asset_type, "Elasticsearch Domain");
    assert_eq!(row.dns_name_or_url, "vpc-f.us-east-1.es.amazonaws.com");
    assert_eq!(row.software_database_name_and_version, "Elasticsearch 7.10");
    assert_eq!(row.vlan_network_id, "vpc-0a1b");
}

#[tokio::test]
async fn single_search_domain_is_still_described() {
    let cloud = FakeCloud::new().region("eu-west-1", |r| {
        r.search_domains = vec![search_domain("only")];
    });
    let loader = Loader::new(Arc::new(cloud));

    let summary = loader
        .load(&strings(&["eu-west-1"]), &strings(&["elasticsearch"]), None)
        .await
        .unwrap();

    assert_eq!(summary.rows, 1);
}
