use crate::resource::ResourceId;

/// Checks if a path lies at or below an ancestor path
///
/// The comparison respects segment boundaries, so `/redfish/v1/Chassis`
/// contains `/redfish/v1/Chassis/1` but not `/redfish/v1/ChassisExtra`.
///
/// # Examples
///
/// ```
/// use redfish_walker::resource::is_within;
///
/// assert!(is_within("/redfish/v1/Chassis/1", "/redfish/v1/Chassis"));
/// assert!(is_within("/redfish/v1/Chassis", "/redfish/v1/Chassis"));
/// assert!(!is_within("/redfish/v1/ChassisExtra", "/redfish/v1/Chassis"));
/// ```
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor.ends_with('/') {
        return path.starts_with(ancestor);
    }

    match path.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Optional filters restricting which links a crawl follows
///
/// The default scope admits every link, so the crawl covers the whole graph
/// reachable from the start resource.
#[derive(Debug, Clone, Default)]
pub struct LinkScope {
    /// Only follow links at or below this path
    pub prefix: Option<String>,

    /// Only follow links at or below the resource they were found in
    pub subtree_only: bool,
}

impl LinkScope {
    /// Returns true if `child`, found inside `parent`, should be followed
    pub fn admits(&self, parent: &ResourceId, child: &ResourceId) -> bool {
        if let Some(prefix) = &self.prefix {
            if !is_within(child.as_str(), prefix) {
                return false;
            }
        }

        if self.subtree_only && !is_within(child.as_str(), parent.as_str()) {
            return false;
        }

        true
    }
}
