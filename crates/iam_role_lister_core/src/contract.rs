use serde::Serialize;

/// Upper bound IAM accepts for the `MaxItems` page-size hint on `ListRoles`.
pub const MAX_LIST_ROLES_PAGE_SIZE: i32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub role_name: String,
}

impl RoleRecord {
    pub fn new(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
        }
    }
}

/// One bounded page of roles as returned by the identity service.
///
/// `next_marker` is the continuation token for the following page, or `None`
/// once the service reports no more results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePage {
    pub roles: Vec<RoleRecord>,
    pub next_marker: Option<String>,
}

impl RolePage {
    pub fn last(role_names: &[&str]) -> Self {
        Self {
            roles: role_names.iter().copied().map(RoleRecord::new).collect(),
            next_marker: None,
        }
    }

    pub fn with_marker(role_names: &[&str], next_marker: impl Into<String>) -> Self {
        Self {
            roles: role_names.iter().copied().map(RoleRecord::new).collect(),
            next_marker: Some(next_marker.into()),
        }
    }
}

/// Invocation result: every role name in upstream order plus the total.
///
/// Fields are private so `count` can only ever be derived from `role_names`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RoleSummary {
    role_names: Vec<String>,
    count: usize,
}

impl RoleSummary {
    pub fn from_role_names(role_names: Vec<String>) -> Self {
        let count = role_names.len();
        Self { role_names, count }
    }

    pub fn role_names(&self) -> &[String] {
        &self.role_names
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
