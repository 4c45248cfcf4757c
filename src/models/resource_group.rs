//! Azure resource group model.

use super::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resource group belonging to exactly one subscription.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResourceGroup {
    /// Group name, unique within its subscription.
    pub name: String,
    /// Remaining provider metadata (location, tags, provisioning state, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Resources in API listing order.
    #[serde(default)]
    pub resources: Vec<Resource>,
}
