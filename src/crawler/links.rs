//! Link extraction from Redfish documents
//!
//! Redfish resources point at each other through object members named
//! `@odata.id`. No schema is assumed: the scan visits every object member and
//! array element at any depth.

use serde_json::Value;

/// The reserved member name carrying a resource link
pub const LINK_KEY: &str = "@odata.id";

/// One `@odata.id` member found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct FoundLink<'a> {
    /// JSON pointer (RFC 6901) of the member inside the document
    pub pointer: String,

    /// The raw member value, not necessarily a string
    pub value: &'a Value,
}

struct Pending<'a> {
    pointer: String,
    value: &'a Value,
    is_link: bool,
}

/// Extracts every `@odata.id` member from a document, in document order
///
/// Values under the link key are reported as-is and not descended into.
///
/// # Example
///
/// ```
/// use redfish_walker::crawler::extract_links;
/// use serde_json::json;
///
/// let document = json!({
///     "@odata.id": "/redfish/v1/Chassis",
///     "Members": [{"@odata.id": "/redfish/v1/Chassis/1"}]
/// });
/// let links: Vec<_> = extract_links(&document)
///     .into_iter()
///     .map(|link| (link.pointer, link.value.as_str().unwrap().to_string()))
///     .collect();
///
/// assert_eq!(links[0], ("/@odata.id".to_string(), "/redfish/v1/Chassis".to_string()));
/// assert_eq!(links[1], ("/Members/0/@odata.id".to_string(), "/redfish/v1/Chassis/1".to_string()));
/// ```
pub fn extract_links(document: &Value) -> Vec<FoundLink<'_>> {
    let mut found = Vec::new();
    let mut stack = vec![Pending {
        pointer: String::new(),
        value: document,
        is_link: false,
    }];

    while let Some(entry) = stack.pop() {
        if entry.is_link {
            found.push(FoundLink {
                pointer: entry.pointer,
                value: entry.value,
            });
            continue;
        }

        // Children are pushed in reverse so they pop in document order
        match entry.value {
            Value::Object(members) => {
                for (key, child) in members.iter().rev() {
                    stack.push(Pending {
                        pointer: format!("{}/{}", entry.pointer, escape_pointer_token(key)),
                        value: child,
                        is_link: key == LINK_KEY,
                    });
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push(Pending {
                        pointer: format!("{}/{}", entry.pointer, index),
                        value: child,
                        is_link: false,
                    });
                }
            }
            _ => {}
        }
    }

    found
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
