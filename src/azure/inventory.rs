//! Depth-3 traversal of the account hierarchy.

use super::rest::MgmtClient;
use crate::models::{Resource, ResourceGroup, Subscription};
use serde_json::Value;
use std::error::Error;

/// Collect the full subscription -> resource group -> resource tree.
///
/// Levels are visited exhaustively in the order the provider returns them;
/// nothing is sorted, filtered, de-duplicated, or capped. An account with N
/// subscriptions of M groups each issues 1 + N + N*M listing calls.
pub async fn collect(client: &MgmtClient) -> Result<Vec<Subscription>, Box<dyn Error>> {
    let mut tree: Vec<Subscription> = Vec::new();

    for raw in client.list_subscriptions().await? {
        let mut subscription: Subscription = parse("subscription", raw)?;
        log::info!(
            "Subscription '{}' ({})",
            subscription.display_name,
            subscription.subscription_id
        );

        for raw in client
            .list_resource_groups(&subscription.subscription_id)
            .await?
        {
            let mut group: ResourceGroup = parse("resource group", raw)?;

            for raw in client
                .list_resources(&subscription.subscription_id, &group.name)
                .await?
            {
                let resource: Resource = parse("resource", raw)?;
                group.resources.push(resource);
            }

            log::info!("  group '{}': {} resources", group.name, group.resources.len());
            subscription.resource_groups.push(group);
        }

        tree.push(subscription);
    }

    Ok(tree)
}

/// Convert one raw API object into its model, keeping unknown fields.
fn parse<T: serde::de::DeserializeOwned>(kind: &str, raw: Value) -> Result<T, Box<dyn Error>> {
    serde_path_to_error::deserialize(raw)
        .map_err(|e| format!("Error parsing {kind}: path={} error={}", e.path(), e).into())
}
