//! # MedSched Core
//!
//! Domain types and logic for doctor weekly scheduling: the weekly template
//! model, the availability resolver, the scheduling service that sits on top
//! of the storage traits, and the localization helper used to label output.
//!
//! Nothing in this crate talks to a database directly; persistence is reached
//! through [`store::TemplateStore`] and [`store::BookingStore`].

pub mod availability;
pub mod errors;
pub mod localization;
pub mod models;
pub mod scheduler;
pub mod store;
