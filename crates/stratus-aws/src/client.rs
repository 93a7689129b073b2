//! The CloudClient implementation over the official AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, GroupDefinition, GroupDefinitionType,
};
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_sts::config::Credentials;
use serde_json::{json, Value};
use stratus_core::advisor::{filter_flagged, CheckKind, CheckMap};
use stratus_core::ports::CloudClient;
use stratus_core::resource::{CallerIdentity, Ec2Instance, ResourceRecord};
use stratus_core::{Error, Result};
use tracing::{debug, warn};

use crate::tags::{merge_native, resource_type_from_arn};

/// Clients for every AWS API Stratus talks to, built once from the shared
/// session config and reused read-only by all handlers.
pub struct AwsClient {
    ec2: aws_sdk_ec2::Client,
    cost_explorer: aws_sdk_costexplorer::Client,
    support: aws_sdk_support::Client,
    tagging: aws_sdk_resourcegroupstagging::Client,
    s3: aws_sdk_s3::Client,
    rds: aws_sdk_rds::Client,
}

impl AwsClient {
    pub fn new(config: &SdkConfig) -> Self {
        // Trusted Advisor only answers in us-east-1, whatever region the
        // rest of the session points at.
        let support_config = aws_sdk_support::config::Builder::from(config)
            .region(Region::new("us-east-1"))
            .build();

        Self {
            ec2: aws_sdk_ec2::Client::new(config),
            cost_explorer: aws_sdk_costexplorer::Client::new(config),
            support: aws_sdk_support::Client::from_conf(support_config),
            tagging: aws_sdk_resourcegroupstagging::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
            rds: aws_sdk_rds::Client::new(config),
        }
    }

    async fn raw_advisor_checks(&self, kind: CheckKind) -> Result<CheckMap> {
        let checks = self
            .support
            .describe_trusted_advisor_checks()
            .language("en")
            .send()
            .await
            .map_err(|e| {
                Error::Upstream(format!(
                    "Error fetching Trusted Advisor checks: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let mut map = CheckMap::new();
        for check in checks.checks() {
            let category = check.category().to_string();
            if kind == CheckKind::Recommendations && category != "cost_optimizing" {
                continue;
            }

            let result = match self
                .support
                .describe_trusted_advisor_check_result()
                .check_id(check.id())
                .language("en")
                .send()
                .await
            {
                Ok(output) => output,
                Err(e) => {
                    // A single inaccessible check must not sink the whole
                    // dataset; skip it and keep going.
                    warn!(
                        check_id = check.id(),
                        error = %DisplayErrorContext(&e),
                        "skipping unreadable advisor check"
                    );
                    continue;
                }
            };

            let Some(result) = result.result() else {
                continue;
            };

            let resources_flagged = result
                .resources_summary()
                .map(|s| s.resources_flagged())
                .unwrap_or(0);
            let estimated_monthly_savings = result
                .category_specific_summary()
                .and_then(|s| s.cost_optimizing())
                .map(|c| c.estimated_monthly_savings())
                .unwrap_or(0.0);

            map.entry(category.clone()).or_default().push(json!({
                "id": check.id(),
                "name": check.name(),
                "category": category,
                "status": result.status(),
                "resources_flagged": resources_flagged,
                "estimated_monthly_savings": estimated_monthly_savings,
            }));
        }

        Ok(map)
    }
}

#[async_trait]
impl CloudClient for AwsClient {
    async fn ec2_instances(&self) -> Result<Vec<Ec2Instance>> {
        let response = self.ec2.describe_instances().send().await.map_err(|e| {
            Error::Upstream(format!(
                "Error fetching EC2 instances: {}",
                DisplayErrorContext(&e)
            ))
        })?;

        let mut instances = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                let Some(id) = instance.instance_id() else {
                    continue;
                };
                instances.push(Ec2Instance {
                    id: id.to_string(),
                    instance_type: instance
                        .instance_type()
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_default(),
                    state: instance
                        .state()
                        .and_then(|s| s.name())
                        .map(|n| n.as_str().to_string())
                        .unwrap_or_default(),
                    launch_time: instance
                        .launch_time()
                        .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), 0))
                        .map(|t| t.to_rfc3339()),
                });
            }
        }

        debug!(count = instances.len(), "enumerated EC2 instances");
        Ok(instances)
    }

    async fn cost_and_usage(&self, start_date: &str, end_date: &str) -> Result<Value> {
        let period = DateInterval::builder()
            .start(start_date)
            .end(end_date)
            .build()
            .map_err(|e| Error::Internal(format!("invalid cost period: {e}")))?;

        let response = self
            .cost_explorer
            .get_cost_and_usage()
            .time_period(period)
            .granularity(Granularity::Daily)
            .metrics("UnblendedCost")
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key("SERVICE")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| {
                Error::Upstream(format!(
                    "Error fetching AWS costs: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let results: Vec<Value> = response
            .results_by_time()
            .iter()
            .map(|rbt| {
                let groups: Vec<Value> = rbt
                    .groups()
                    .iter()
                    .map(|group| {
                        let metric = group
                            .metrics()
                            .and_then(|m| m.get("UnblendedCost"));
                        json!({
                            "service": group.keys().first().cloned().unwrap_or_default(),
                            "amount": metric.and_then(|m| m.amount()).unwrap_or("0"),
                            "unit": metric.and_then(|m| m.unit()).unwrap_or("USD"),
                        })
                    })
                    .collect();

                json!({
                    "time_period": {
                        "start": rbt.time_period().map(|p| p.start()).unwrap_or_default(),
                        "end": rbt.time_period().map(|p| p.end()).unwrap_or_default(),
                    },
                    "estimated": rbt.estimated(),
                    "groups": groups,
                })
            })
            .collect();

        Ok(json!({
            "time_period": {"start": start_date, "end": end_date},
            "granularity": "DAILY",
            "results_by_time": results,
        }))
    }

    async fn advisor_checks(&self, kind: CheckKind) -> Result<CheckMap> {
        // Filtering runs on every fetch, before the payload can reach the
        // store: OK/informational entries never make it into the cache row.
        let raw = self.raw_advisor_checks(kind).await?;
        Ok(filter_flagged(raw))
    }

    async fn tagged_resources(&self) -> Result<Vec<ResourceRecord>> {
        let tagged = self
            .tagging
            .get_resources()
            .resources_per_page(100)
            .send()
            .await
            .map_err(|e| {
                Error::Upstream(format!(
                    "Error fetching tagged resources: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let mut inventory = Vec::new();
        for mapping in tagged.resource_tag_mapping_list() {
            let Some(arn) = mapping.resource_arn() else {
                continue;
            };
            let tags: Vec<Value> = mapping
                .tags()
                .iter()
                .map(|t| json!({"key": t.key(), "value": t.value()}))
                .collect();
            inventory.push(
                ResourceRecord::new(arn, resource_type_from_arn(arn), json!({"arn": arn}))
                    .with_tags(Value::Array(tags)),
            );
        }

        // Type-specific enumerations are each wrapped independently: a
        // missing permission for one service just leaves that service out
        // of the inventory.
        match self.ec2_instances().await {
            Ok(instances) => {
                for instance in instances {
                    let native_id = instance.id.clone();
                    let data = serde_json::to_value(&instance)?;
                    merge_native(
                        &mut inventory,
                        &native_id,
                        ResourceRecord::new(native_id.clone(), "ec2", data),
                    );
                }
            }
            Err(e) => warn!(error = %e, "skipping EC2 enumeration in tag inventory"),
        }

        match self.s3.list_buckets().send().await {
            Ok(response) => {
                for bucket in response.buckets() {
                    let Some(name) = bucket.name() else { continue };
                    merge_native(
                        &mut inventory,
                        name,
                        ResourceRecord::new(name, "s3", json!({"name": name})),
                    );
                }
            }
            Err(e) => warn!(
                error = %DisplayErrorContext(&e),
                "skipping S3 enumeration in tag inventory"
            ),
        }

        match self.rds.describe_db_instances().send().await {
            Ok(response) => {
                for db in response.db_instances() {
                    let Some(id) = db.db_instance_identifier() else {
                        continue;
                    };
                    merge_native(
                        &mut inventory,
                        id,
                        ResourceRecord::new(
                            id,
                            "rds",
                            json!({
                                "id": id,
                                "engine": db.engine(),
                                "instance_class": db.db_instance_class(),
                                "status": db.db_instance_status(),
                            }),
                        ),
                    );
                }
            }
            Err(e) => warn!(
                error = %DisplayErrorContext(&e),
                "skipping RDS enumeration in tag inventory"
            ),
        }

        debug!(count = inventory.len(), "aggregated tag inventory");
        Ok(inventory)
    }

    async fn validate_credentials(
        &self,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<CallerIdentity> {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "stratus-validate",
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .load()
            .await;

        let sts = aws_sdk_sts::Client::new(&config);
        let identity = sts.get_caller_identity().send().await.map_err(|e| {
            Error::CredentialValidation(DisplayErrorContext(&e).to_string())
        })?;

        Ok(CallerIdentity {
            account: identity.account().unwrap_or_default().to_string(),
            arn: identity.arn().unwrap_or_default().to_string(),
            user_id: identity.user_id().unwrap_or_default().to_string(),
        })
    }
}
