use crate::runtime::contract::RolePage;
use crate::runtime::error::BoxError;

pub trait RolePageSource {
    /// Fetches the page that starts at `marker`, or the first page for `None`.
    fn fetch_page(&self, marker: Option<&str>) -> Result<RolePage, BoxError>;
}
