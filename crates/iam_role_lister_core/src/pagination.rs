use crate::contract::{RolePage, RoleSummary};
use crate::error::{BoxError, RoleListingError};

/// Progress reported after each page has been folded into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub page_number: usize,
    pub roles_on_page: usize,
    pub roles_so_far: usize,
    pub truncated: bool,
}

/// Fetches pages until the service stops handing out continuation markers and
/// projects every role down to its name.
///
/// `fetch_page` receives `None` for the first request and the previous page's
/// marker afterwards. The first fetch error aborts the drain; nothing collected
/// so far is returned. A page that hands back the marker it was requested with
/// is reported as an upstream failure instead of being fetched again.
pub fn drain_role_pages<F>(
    mut fetch_page: F,
    on_page: &mut dyn FnMut(PageProgress),
) -> Result<RoleSummary, RoleListingError>
where
    F: FnMut(Option<&str>) -> Result<RolePage, BoxError>,
{
    let mut role_names = Vec::new();
    let mut marker: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        let page = fetch_page(marker.as_deref())
            .map_err(|source| RoleListingError::upstream(page_number, source))?;

        let roles_on_page = page.roles.len();
        role_names.extend(page.roles.into_iter().map(|role| role.role_name));

        // An empty marker carries no position, so it ends the listing.
        let next_marker = page.next_marker.filter(|value| !value.is_empty());
        if next_marker.is_some() && next_marker == marker {
            return Err(RoleListingError::upstream(
                page_number,
                format!(
                    "ListRoles returned the same marker twice: {}",
                    marker.unwrap_or_default()
                ),
            ));
        }
        on_page(PageProgress {
            page_number,
            roles_on_page,
            roles_so_far: role_names.len(),
            truncated: next_marker.is_some(),
        });

        match next_marker {
            Some(value) => marker = Some(value),
            None => break,
        }
    }

    Ok(RoleSummary::from_role_names(role_names))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;

    fn scripted(
        pages: Vec<Result<RolePage, BoxError>>,
    ) -> (
        impl FnMut(Option<&str>) -> Result<RolePage, BoxError>,
        Rc<RefCell<Vec<Option<String>>>>,
    ) {
        let requested = Rc::new(RefCell::new(Vec::new()));
        let recorder = requested.clone();
        let mut pages: VecDeque<_> = pages.into();
        let fetch = move |marker: Option<&str>| {
            recorder.borrow_mut().push(marker.map(str::to_string));
            pages
                .pop_front()
                .unwrap_or_else(|| Err("no more scripted pages".into()))
        };
        (fetch, requested)
    }

    #[test]
    fn drains_pages_in_upstream_order() {
        let (fetch, requested) = scripted(vec![
            Ok(RolePage::with_marker(&["Admin", "Dev"], "page-2")),
            Ok(RolePage::last(&["ReadOnly"])),
        ]);

        let summary = drain_role_pages(fetch, &mut |_| {}).expect("drain should succeed");

        assert_eq!(summary.role_names(), ["Admin", "Dev", "ReadOnly"]);
        assert_eq!(summary.count(), 3);
        assert_eq!(
            *requested.borrow(),
            vec![None, Some("page-2".to_string())]
        );
    }

    #[test]
    fn zero_roles_yield_empty_summary() {
        let (fetch, requested) = scripted(vec![Ok(RolePage::default())]);

        let summary = drain_role_pages(fetch, &mut |_| {}).expect("drain should succeed");

        assert!(summary.role_names().is_empty());
        assert_eq!(summary.count(), 0);
        assert_eq!(requested.borrow().len(), 1);
    }

    #[test]
    fn single_page_stops_after_one_fetch() {
        let (fetch, requested) = scripted(vec![Ok(RolePage::last(&["Admin"]))]);
        let mut progress = Vec::new();

        drain_role_pages(fetch, &mut |page| progress.push(page)).expect("drain should succeed");

        assert_eq!(requested.borrow().len(), 1);
        assert_eq!(
            progress,
            vec![PageProgress {
                page_number: 1,
                roles_on_page: 1,
                roles_so_far: 1,
                truncated: false,
            }]
        );
    }

    #[test]
    fn failure_mid_stream_aborts_without_partial_result() {
        let (fetch, requested) = scripted(vec![
            Ok(RolePage::with_marker(&["Admin"], "page-2")),
            Err("Throttling: Rate exceeded".into()),
            Ok(RolePage::last(&["ReadOnly"])),
        ]);

        let error = drain_role_pages(fetch, &mut |_| {}).expect_err("drain should fail");

        assert_eq!(error.page_number(), 2);
        assert_eq!(error.to_string(), "Throttling: Rate exceeded");
        assert_eq!(requested.borrow().len(), 2);
    }

    #[test]
    fn empty_marker_ends_listing() {
        let (fetch, requested) = scripted(vec![
            Ok(RolePage::with_marker(&["Admin"], "")),
            Ok(RolePage::last(&["Unreachable"])),
        ]);

        let summary = drain_role_pages(fetch, &mut |_| {}).expect("drain should succeed");

        assert_eq!(summary.role_names(), ["Admin"]);
        assert_eq!(requested.borrow().len(), 1);
    }

    #[test]
    fn repeated_marker_fails_instead_of_looping() {
        let (fetch, requested) = scripted(vec![
            Ok(RolePage::with_marker(&["Admin"], "same-marker")),
            Ok(RolePage::with_marker(&["Admin"], "same-marker")),
            Ok(RolePage::with_marker(&["Admin"], "same-marker")),
        ]);
        let mut pages_seen = 0usize;

        let error = drain_role_pages(fetch, &mut |_| pages_seen += 1)
            .expect_err("repeated marker should fail");

        assert_eq!(error.page_number(), 2);
        assert_eq!(
            error.to_string(),
            "ListRoles returned the same marker twice: same-marker"
        );
        assert_eq!(requested.borrow().len(), 2);
        assert_eq!(pages_seen, 1);
    }

    #[test]
    fn distinct_markers_keep_paging() {
        let (fetch, requested) = scripted(vec![
            Ok(RolePage::with_marker(&["Admin"], "marker-a")),
            Ok(RolePage::with_marker(&["Dev"], "marker-b")),
            Ok(RolePage::last(&["ReadOnly"])),
        ]);

        let summary = drain_role_pages(fetch, &mut |_| {}).expect("drain should succeed");

        assert_eq!(summary.count(), 3);
        assert_eq!(requested.borrow().len(), 3);
    }

    #[test]
    fn keeps_pages_that_arrive_empty_but_truncated() {
        let (fetch, _) = scripted(vec![
            Ok(RolePage::with_marker(&[], "page-2")),
            Ok(RolePage::last(&["Dev"])),
        ]);

        let summary = drain_role_pages(fetch, &mut |_| {}).expect("drain should succeed");

        assert_eq!(summary.role_names(), ["Dev"]);
    }
}
