//! Domain types shared across the Vitrine site backend.
//!
//! This crate contains only pure types and policy functions with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; never in `infra/`
//! or `handlers/`.

pub mod pagination;
pub mod policy;
pub mod user;
