#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod account;
pub mod department;
pub mod employee;
mod id;
pub mod journal_entry;
pub mod period;
pub mod position;
pub mod primitives;
pub mod stock;
pub mod user;
