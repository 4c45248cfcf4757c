//! Credential resolution and token acquisition.
//!
//! Two mutually exclusive credential schemes are read from the environment:
//! a service principal (`AZ_CLIENT`/`AZ_SECRET`/`AZ_TENANT`) or a plain
//! username/password pair (`AZ_USER`/`AZ_PASS`). The service principal wins
//! whenever its triple is complete; the pair is only consulted after that.

use crate::config;
use colored::Colorize;
use serde::Deserialize;
use std::error::Error;

/// A fully resolved credential scheme.
pub enum Credentials {
    /// Client-credentials grant against the tenant's authority.
    ServicePrincipal {
        client: String,
        secret: String,
        tenant: String,
    },
    /// Resource-owner password grant via the shared authority.
    UserPass { user: String, pass: String },
}

impl Credentials {
    /// Scheme name for log lines. Never includes secret material.
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::ServicePrincipal { .. } => "service principal",
            Credentials::UserPass { .. } => "username/password",
        }
    }
}

/// Resolve credentials from the process environment.
pub fn resolve_credentials() -> Option<Credentials> {
    resolve_from(|key| std::env::var(key).ok())
}

/// Resolve credentials from any variable source.
///
/// The service principal triple takes strict precedence: when all three of
/// its variables are present the username/password pair is never consulted.
/// An incomplete triple is ignored, not merged.
pub fn resolve_from(get: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
    if let (Some(client), Some(secret), Some(tenant)) =
        (get("AZ_CLIENT"), get("AZ_SECRET"), get("AZ_TENANT"))
    {
        return Some(Credentials::ServicePrincipal {
            client,
            secret,
            tenant,
        });
    }
    if let (Some(user), Some(pass)) = (get("AZ_USER"), get("AZ_PASS")) {
        return Some(Credentials::UserPass { user, pass });
    }
    None
}

/// Successful token response from the authority.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange credentials for a management-scope bearer token.
///
/// `authority` is the token-issuing endpoint base, normally
/// [`config::AUTHORITY_HOST`]; tests point it at a mock server.
pub async fn request_token(
    http: &reqwest::Client,
    authority: &str,
    credentials: &Credentials,
) -> Result<String, Box<dyn Error>> {
    let (url, form) = token_request(authority, credentials);
    log::debug!("POST {url}");

    let response = http.post(&url).form(&form).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log::warn!(
            "{failed} to authenticate with {scheme} credentials",
            failed = "failed".on_red(),
            scheme = credentials.scheme()
        );
        return Err(format!("authentication failed: {status}: {body}").into());
    }

    let mut deserializer = serde_json::Deserializer::from_str(&body);
    let token: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing token response: path={} error={}", e.path(), e))?;

    Ok(token.access_token)
}

/// Authority URL and form fields for the scheme's OAuth2 grant.
///
/// The username/password grant authenticates as the well-known Azure CLI
/// public client against the shared `common` authority.
fn token_request(
    authority: &str,
    credentials: &Credentials,
) -> (String, Vec<(&'static str, String)>) {
    match credentials {
        Credentials::ServicePrincipal {
            client,
            secret,
            tenant,
        } => (
            format!("{authority}/{tenant}/oauth2/token"),
            vec![
                ("grant_type", "client_credentials".to_string()),
                ("client_id", client.clone()),
                ("client_secret", secret.clone()),
                ("resource", config::MANAGEMENT_RESOURCE.to_string()),
            ],
        ),
        Credentials::UserPass { user, pass } => (
            format!("{authority}/common/oauth2/token"),
            vec![
                ("grant_type", "password".to_string()),
                ("client_id", config::CLI_CLIENT_ID.to_string()),
                ("username", user.clone()),
                ("password", pass.clone()),
                ("resource", config::MANAGEMENT_RESOURCE.to_string()),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_service_principal_resolved() {
        let vars = [
            ("AZ_CLIENT", "client-1"),
            ("AZ_SECRET", "s3cret"),
            ("AZ_TENANT", "tenant-1"),
        ];
        match resolve_from(lookup(&vars)) {
            Some(Credentials::ServicePrincipal {
                client,
                secret,
                tenant,
            }) => {
                assert_eq!(client, "client-1");
                assert_eq!(secret, "s3cret");
                assert_eq!(tenant, "tenant-1");
            }
            _ => panic!("Expected service principal credentials"),
        }
    }

    #[test]
    fn test_service_principal_takes_precedence() {
        let vars = [
            ("AZ_CLIENT", "client-1"),
            ("AZ_SECRET", "s3cret"),
            ("AZ_TENANT", "tenant-1"),
            ("AZ_USER", "alice"),
            ("AZ_PASS", "hunter2"),
        ];
        let credentials = resolve_from(lookup(&vars)).expect("Expected credentials");
        assert_eq!(credentials.scheme(), "service principal");
    }

    #[test]
    fn test_incomplete_triple_falls_back_to_userpass() {
        // AZ_TENANT missing, so the pair wins even with two triple vars set
        let vars = [
            ("AZ_CLIENT", "client-1"),
            ("AZ_SECRET", "s3cret"),
            ("AZ_USER", "alice"),
            ("AZ_PASS", "hunter2"),
        ];
        let credentials = resolve_from(lookup(&vars)).expect("Expected credentials");
        assert_eq!(credentials.scheme(), "username/password");
    }

    #[test]
    fn test_missing_credentials() {
        assert!(resolve_from(lookup(&[])).is_none());
        assert!(resolve_from(lookup(&[("AZ_USER", "alice")])).is_none());
        assert!(resolve_from(lookup(&[("AZ_CLIENT", "c"), ("AZ_SECRET", "s")])).is_none());
    }

    #[test]
    fn test_token_request_service_principal() {
        let credentials = Credentials::ServicePrincipal {
            client: "client-1".to_string(),
            secret: "s3cret".to_string(),
            tenant: "tenant-1".to_string(),
        };
        let (url, form) = token_request("https://login.example.com", &credentials);
        assert_eq!(url, "https://login.example.com/tenant-1/oauth2/token");
        assert!(form.contains(&("grant_type", "client_credentials".to_string())));
        assert!(form.contains(&("client_id", "client-1".to_string())));
    }

    #[test]
    fn test_token_request_userpass_uses_cli_client() {
        let credentials = Credentials::UserPass {
            user: "alice".to_string(),
            pass: "hunter2".to_string(),
        };
        let (url, form) = token_request("https://login.example.com", &credentials);
        assert_eq!(url, "https://login.example.com/common/oauth2/token");
        assert!(form.contains(&("client_id", config::CLI_CLIENT_ID.to_string())));
        assert!(form.contains(&("grant_type", "password".to_string())));
    }
}
