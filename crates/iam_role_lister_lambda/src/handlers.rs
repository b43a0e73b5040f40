pub mod list_roles;
