pub mod iam_pages;
pub mod role_source;
