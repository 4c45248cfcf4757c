//! Graphviz DOT encoding.
//!
//! The tree is lowered to a flat list of statements which are rendered in a
//! single pass after a fixed preamble. Node identifiers are sanitized with
//! `\W` -> `_`; cluster labels keep the original resource name.

use crate::models::Subscription;
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// Regex matching every character invalid in a graph identifier.
static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_non_word_regex() -> &'static Regex {
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"\W").expect("Invalid Regex"))
}

/// Replace every non-word character with `_`.
pub fn sanitize_id(name: &str) -> String {
    get_non_word_regex().replace_all(name, "_").into_owned()
}

/// Escape a string for use inside a double-quoted DOT label.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Icon filename for a resource type: the second slash-delimited segment of
/// the lower-cased type string, with `.svg` appended.
///
/// A type string with no `/` falls back to the whole lower-cased string so
/// one malformed resource cannot sink an otherwise complete snapshot.
fn icon_image(resource_type: &str) -> String {
    let lowered = resource_type.to_lowercase();
    match lowered.split('/').nth(1) {
        Some(segment) => format!("{segment}.svg"),
        None => {
            log::warn!("resource type '{resource_type}' has no '/', using it whole as icon name");
            format!("{lowered}.svg")
        }
    }
}

/// One statement of the graph body.
#[derive(Debug)]
enum Statement {
    /// `/* ... */` section marker, preceded by a blank line.
    Comment { depth: usize, text: String },
    /// `"from" -> "to";`
    Edge {
        depth: usize,
        from: String,
        to: String,
    },
    /// Labeled cluster wrapping one image-annotated icon node.
    IconCluster {
        depth: usize,
        id: String,
        label: String,
        image: String,
    },
}

/// Encode the tree as a DOT directed graph rooted at the synthetic `root`
/// node. Deterministic: the same tree always renders byte-identically.
pub fn render_dot(tree: &[Subscription]) -> String {
    render_statements(&build_statements(tree))
}

/// Lower the tree into the statement list.
fn build_statements(tree: &[Subscription]) -> Vec<Statement> {
    let mut statements = Vec::new();

    for subscription in tree {
        let sub_id = sanitize_id(&subscription.display_name);
        statements.push(Statement::Comment {
            depth: 1,
            text: format!("Subscription: {sub_id}"),
        });
        statements.push(Statement::Edge {
            depth: 1,
            from: "root".to_string(),
            to: sub_id.clone(),
        });

        for group in &subscription.resource_groups {
            let group_id = sanitize_id(&group.name);
            statements.push(Statement::Comment {
                depth: 2,
                text: format!("Resource Group: {group_id}"),
            });
            statements.push(Statement::Edge {
                depth: 2,
                from: sub_id.clone(),
                to: group_id.clone(),
            });

            for resource in &group.resources {
                let resource_id = sanitize_id(&resource.name);
                statements.push(Statement::Edge {
                    depth: 3,
                    from: group_id.clone(),
                    to: format!("{resource_id}_icon"),
                });
                statements.push(Statement::IconCluster {
                    depth: 3,
                    id: resource_id,
                    label: escape_label(&resource.name),
                    image: icon_image(&resource.resource_type),
                });
            }
        }
    }

    statements
}

/// Render the fixed preamble and every statement in one pass.
fn render_statements(statements: &[Statement]) -> String {
    let mut o = String::from("digraph az_tree {");

    o.push_str("\n    compound=true;");
    o.push_str("\n    ranksep=1.25;");
    o.push_str("\n    bgcolor=white;");
    o.push_str("\n    node [shape=plaintext, fontsize=16, label=\"\"];");
    o.push_str("\n    edge [arrowsize=1, color=black];");
    o.push_str("\n    graph[penwidth=0, labelloc=\"b\"];");

    for statement in statements {
        match statement {
            Statement::Comment { depth, text } => {
                let _ = write!(o, "\n\n{pad}/* {text} */", pad = pad(*depth));
            }
            Statement::Edge { depth, from, to } => {
                let _ = write!(o, "\n{pad}\"{from}\" -> \"{to}\";", pad = pad(*depth));
            }
            Statement::IconCluster {
                depth,
                id,
                label,
                image,
            } => {
                let _ = write!(
                    o,
                    "\n{pad}subgraph cluster_{id} {{label=\"{label}\"; {id}_icon[image=\"{image}\"];}};",
                    pad = pad(*depth)
                );
            }
        }
    }

    o.push_str("\n}");
    o
}

fn pad(depth: usize) -> String {
    "    ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, ResourceGroup};
    use serde_json::Map;

    fn tree_one(sub: &str, group: &str, resource: &str, resource_type: &str) -> Vec<Subscription> {
        vec![Subscription {
            subscription_id: "1111".to_string(),
            display_name: sub.to_string(),
            extra: Map::new(),
            resource_groups: vec![ResourceGroup {
                name: group.to_string(),
                extra: Map::new(),
                resources: vec![Resource {
                    name: resource.to_string(),
                    resource_type: resource_type.to_string(),
                    extra: Map::new(),
                }],
            }],
        }]
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("My RG (prod)"), "My_RG__prod_");
        assert_eq!(sanitize_id("rg1"), "rg1");
        assert_eq!(sanitize_id("a.b-c/d"), "a_b_c_d");
        // Unicode letters are word characters, they pass through
        assert_eq!(sanitize_id("Café Prod"), "Café_Prod");
    }

    #[test]
    fn test_icon_image() {
        assert_eq!(
            icon_image("Microsoft.Compute/virtualMachines"),
            "virtualmachines.svg"
        );
        // Only the second segment counts
        assert_eq!(icon_image("Microsoft.Sql/servers/databases"), "servers.svg");
    }

    #[test]
    fn test_icon_image_no_slash_falls_back() {
        assert_eq!(icon_image("CustomProviderType"), "customprovidertype.svg");
    }

    #[test]
    fn test_single_resource_scenario() {
        let dot = render_dot(&tree_one(
            "Sub A",
            "rg1",
            "vm1",
            "Microsoft.Compute/virtualMachines",
        ));

        let expected = r#"digraph az_tree {
    compound=true;
    ranksep=1.25;
    bgcolor=white;
    node [shape=plaintext, fontsize=16, label=""];
    edge [arrowsize=1, color=black];
    graph[penwidth=0, labelloc="b"];

    /* Subscription: Sub_A */
    "root" -> "Sub_A";

        /* Resource Group: rg1 */
        "Sub_A" -> "rg1";
            "rg1" -> "vm1_icon";
            subgraph cluster_vm1 {label="vm1"; vm1_icon[image="virtualmachines.svg"];};
}"#;
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_sanitized_identifiers_original_label() {
        let dot = render_dot(&tree_one(
            "Sub A",
            "My RG (prod)",
            "my vm (old)",
            "Microsoft.Compute/virtualMachines",
        ));

        assert!(dot.contains(r#""Sub_A" -> "My_RG__prod_";"#));
        assert!(dot.contains(r#""My_RG__prod_" -> "my_vm__old__icon";"#));
        // Identifier sanitized, label kept verbatim
        assert!(dot.contains(
            r#"subgraph cluster_my_vm__old_ {label="my vm (old)"; my_vm__old__icon[image="virtualmachines.svg"];};"#
        ));
    }

    #[test]
    fn test_empty_tree_renders_preamble_only() {
        let expected = r#"digraph az_tree {
    compound=true;
    ranksep=1.25;
    bgcolor=white;
    node [shape=plaintext, fontsize=16, label=""];
    edge [arrowsize=1, color=black];
    graph[penwidth=0, labelloc="b"];
}"#;
        assert_eq!(render_dot(&[]), expected);
        assert!(!render_dot(&[]).contains("->"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let tree = tree_one("Sub A", "rg1", "vm1", "Microsoft.Compute/virtualMachines");
        assert_eq!(render_dot(&tree), render_dot(&tree));
    }

    #[test]
    fn test_label_escaping() {
        let dot = render_dot(&tree_one(
            "Sub A",
            "rg1",
            r#"vm "quoted""#,
            "Microsoft.Compute/virtualMachines",
        ));
        assert!(dot.contains(r#"label="vm \"quoted\"";"#));
    }
}
