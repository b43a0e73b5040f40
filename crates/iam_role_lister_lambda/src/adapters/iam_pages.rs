use aws_sdk_iam::operation::list_roles::ListRolesOutput;

use crate::runtime::contract::{RolePage, RoleRecord};

/// Projects an IAM `ListRoles` response onto the page contract.
///
/// IAM only guarantees `Marker` when `IsTruncated` is set, so the marker is
/// ignored on the final page.
pub fn role_page_from_output(output: &ListRolesOutput) -> RolePage {
    let roles = output
        .roles()
        .iter()
        .map(|role| RoleRecord::new(role.role_name()))
        .collect();

    let next_marker = if output.is_truncated() {
        let marker = output.marker().map(str::to_string);
        if marker.is_none() {
            tracing::warn!(
                component = "role_lister",
                event = "truncated_page_without_marker",
                "IAM reported a truncated page without a marker; treating it as the last page"
            );
        }
        marker
    } else {
        None
    };

    RolePage { roles, next_marker }
}
