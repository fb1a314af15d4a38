pub mod admin;
pub mod auth;
pub mod contact;
pub mod password_reset;
pub mod profile;
pub mod projects;
