//! sea-orm entities for the site database.

pub mod contact_messages;
pub mod outbox_events;
pub mod projects;
pub mod users;
