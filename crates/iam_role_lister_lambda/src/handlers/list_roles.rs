use std::time::Instant;

use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{error, info, info_span};

use crate::adapters::role_source::RolePageSource;
use crate::runtime::contract::RoleSummary;
use crate::runtime::error::RoleListingError;
use crate::runtime::pagination::drain_role_pages;

/// Lambda entry point. The event payload and context do not influence the
/// result; the request id is only attached to log lines.
pub fn handle_list_roles_event(
    event: LambdaEvent<Value>,
    source: &impl RolePageSource,
) -> Result<RoleSummary, RoleListingError> {
    let span = info_span!("invocation", request_id = %event.context.request_id);
    let _entered = span.enter();
    list_roles(source)
}

pub fn list_roles(source: &impl RolePageSource) -> Result<RoleSummary, RoleListingError> {
    let started_at = Instant::now();
    info!(component = "role_lister", event = "listing_started");

    let mut pages_fetched = 0usize;
    let result = drain_role_pages(
        |marker| source.fetch_page(marker),
        &mut |progress| {
            pages_fetched = progress.page_number;
            info!(
                component = "role_lister",
                event = "page_fetched",
                page_number = progress.page_number,
                roles_on_page = progress.roles_on_page,
                roles_so_far = progress.roles_so_far,
                truncated = progress.truncated,
            );
        },
    );

    match result {
        Ok(summary) => {
            info!(
                component = "role_lister",
                event = "listing_completed",
                pages_fetched,
                count = summary.count(),
                duration_ms = started_at.elapsed().as_millis() as u64,
            );
            Ok(summary)
        }
        Err(listing_error) => {
            error!(
                component = "role_lister",
                event = "listing_failed",
                page_number = listing_error.page_number(),
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %listing_error,
            );
            Err(listing_error)
        }
    }
}
