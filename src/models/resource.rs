//! Azure resource model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single provisioned object inside a resource group.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Resource {
    /// Resource name.
    pub name: String,
    /// Slash-delimited taxonomy path, e.g. `Microsoft.Compute/virtualMachines`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Remaining provider metadata (id, location, sku, tags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
