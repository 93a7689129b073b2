//! Tag-inventory aggregation helpers.
//!
//! The tag-search API reports ARNs; the type-specific enumerations report
//! native identifiers (instance ids, bucket names, DB identifiers). An ARN
//! conveniently ends with the native id, so de-duplication is suffix-based
//! rather than exact-match.

use stratus_core::resource::ResourceRecord;

/// Extract the service segment of an ARN for grouping, e.g.
/// `arn:aws:ec2:us-east-1:123:instance/i-0ab` -> `ec2`.
pub fn resource_type_from_arn(arn: &str) -> String {
    arn.split(':')
        .nth(2)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Add a natively enumerated resource unless the inventory already holds an
/// entry whose identity ends with its native id.
pub fn merge_native(inventory: &mut Vec<ResourceRecord>, native_id: &str, record: ResourceRecord) {
    if inventory.iter().any(|r| r.id.ends_with(native_id)) {
        return;
    }
    inventory.push(record);
}
