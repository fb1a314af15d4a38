pub mod account;
pub mod admin;
pub mod contact;
pub mod oauth;
pub mod password_reset;
pub mod profile;
pub mod project;
