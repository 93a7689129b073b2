//! Shared test fixtures.

use serde_json::{json, Value};
use stratus_core::advisor::CheckMap;
use stratus_core::presentation::DeckOutline;
use stratus_core::resource::{CallerIdentity, Ec2Instance, ResourceRecord};

pub fn sample_instances() -> Vec<Ec2Instance> {
    vec![
        Ec2Instance {
            id: "i-0abc123def456".to_string(),
            instance_type: "t3.medium".to_string(),
            state: "running".to_string(),
            launch_time: Some("2026-07-01T12:00:00+00:00".to_string()),
        },
        Ec2Instance {
            id: "i-0fed654cba321".to_string(),
            instance_type: "m5.large".to_string(),
            state: "stopped".to_string(),
            launch_time: None,
        },
    ]
}

pub fn sample_inventory() -> Vec<ResourceRecord> {
    vec![
        ResourceRecord::new(
            "arn:aws:ec2:us-east-1:123456789012:instance/i-0abc123def456",
            "ec2",
            json!({"arn": "arn:aws:ec2:us-east-1:123456789012:instance/i-0abc123def456"}),
        )
        .with_tags(json!([{"Key": "env", "Value": "prod"}])),
        ResourceRecord::new(
            "arn:aws:s3:::stratus-artifacts",
            "s3",
            json!({"arn": "arn:aws:s3:::stratus-artifacts"}),
        ),
        ResourceRecord::new(
            "arn:aws:rds:us-east-1:123456789012:db:primary",
            "rds",
            json!({"arn": "arn:aws:rds:us-east-1:123456789012:db:primary", "engine": "postgres"}),
        ),
    ]
}

/// Raw advisor payload with a mix of flagged and OK entries across two
/// categories.
pub fn sample_checks() -> CheckMap {
    let mut checks = CheckMap::new();
    checks.insert(
        "cost_optimizing".to_string(),
        vec![
            json!({
                "id": "Qch7DwouX1",
                "name": "Low Utilization Amazon EC2 Instances",
                "category": "cost_optimizing",
                "status": "warning",
                "resources_flagged": 4,
                "estimated_monthly_savings": 212.16
            }),
            json!({
                "id": "hjLMh88uM8",
                "name": "Idle Load Balancers",
                "category": "cost_optimizing",
                "status": "ok",
                "resources_flagged": 0
            }),
        ],
    );
    checks.insert(
        "security".to_string(),
        vec![json!({
            "id": "Pfx0RwqBli",
            "name": "Security Groups - Unrestricted Access",
            "category": "security",
            "status": "error",
            "resources_flagged": 2
        })],
    );
    checks
}

pub fn sample_cost_data() -> Value {
    json!({
        "granularity": "DAILY",
        "results_by_time": [
            {
                "time_period": {"start": "2026-08-01", "end": "2026-08-02"},
                "estimated": false,
                "groups": [
                    {"service": "Amazon Elastic Compute Cloud - Compute", "amount": "41.27", "unit": "USD"},
                    {"service": "Amazon Relational Database Service", "amount": "12.80", "unit": "USD"}
                ]
            }
        ]
    })
}

pub fn sample_diagram() -> Value {
    json!({
        "nodes": [
            {"id": "web", "type": "ec2", "label": "Web tier", "x": 100, "y": 100},
            {"id": "bucket", "type": "s3", "label": "Artifacts", "x": 300, "y": 100},
            {"id": "db", "type": "rds", "label": "Primary DB", "x": 200, "y": 250}
        ],
        "edges": [
            {"id": "e1", "source": "web", "target": "db"},
            {"id": "e2", "source": "web", "target": "bucket"}
        ]
    })
}

pub fn sample_outline() -> DeckOutline {
    DeckOutline {
        title: "AWS Cost Optimization Review".to_string(),
        agenda: "Current spend, flagged findings, remediation plan".to_string(),
        key_findings: vec![
            "Four EC2 instances under 10% utilization".to_string(),
            "Two security groups allow unrestricted access".to_string(),
        ],
        recommendations: vec![
            "Rightsize or stop the idle instances".to_string(),
            "Restrict ingress on flagged security groups".to_string(),
        ],
        conclusion: "Estimated monthly savings of $212 are available now".to_string(),
        qa_points: vec!["Which teams own the flagged instances?".to_string()],
    }
}

pub fn sample_identity() -> CallerIdentity {
    CallerIdentity {
        account: "123456789012".to_string(),
        arn: "arn:aws:iam::123456789012:user/stratus".to_string(),
        user_id: "AIDAEXAMPLE".to_string(),
    }
}
