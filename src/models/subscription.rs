//! Azure subscription model.

use super::ResourceGroup;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An Azure subscription with every resource group collected beneath it.
///
/// Provider metadata beyond the two named fields is preserved verbatim in
/// [`extra`](Self::extra), so the serialized snapshot keeps whatever the API
/// returned without binding to provider types.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Subscription {
    /// Provider-assigned subscription identifier.
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    /// Human-readable subscription name.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Remaining provider metadata (state, tenant id, policies, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Resource groups in API listing order.
    #[serde(rename = "resourceGroups", default)]
    pub resource_groups: Vec<ResourceGroup>,
}
