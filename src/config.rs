//! Fixed endpoints, API versions, and output locations.

/// Azure Resource Manager endpoint.
pub const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// OAuth2 authority issuing management tokens.
pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Token audience for management API calls.
pub const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";

/// Well-known Azure CLI public client id, used for the username/password grant.
pub const CLI_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";

/// api-version for subscription listing.
pub const SUBSCRIPTIONS_API_VERSION: &str = "2020-01-01";

/// api-version for resource group and resource listing.
pub const RESOURCES_API_VERSION: &str = "2021-04-01";

/// JSON snapshot written to the working directory.
pub const JSON_SNAPSHOT: &str = "az-tree.json";

/// Graphviz snapshot written to the working directory.
pub const DOT_SNAPSHOT: &str = "az-tree.dot";
