use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure while enumerating roles.
///
/// The identity service is the only failure source. Its error is carried as-is:
/// the display text is the upstream text and `source()` points at it.
#[derive(Debug, Error)]
pub enum RoleListingError {
    #[error("{source}")]
    Upstream {
        page_number: usize,
        #[source]
        source: BoxError,
    },
}

impl RoleListingError {
    pub fn upstream(page_number: usize, source: impl Into<BoxError>) -> Self {
        Self::Upstream {
            page_number,
            source: source.into(),
        }
    }

    /// 1-based index of the page whose fetch failed.
    pub fn page_number(&self) -> usize {
        match self {
            Self::Upstream { page_number, .. } => *page_number,
        }
    }

    pub fn into_source(self) -> BoxError {
        match self {
            Self::Upstream { source, .. } => source,
        }
    }
}
