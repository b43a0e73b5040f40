pub use iam_role_lister_core::{contract, error, pagination};
