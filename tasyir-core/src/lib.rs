#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod account;
mod app;
pub mod department;
pub mod employee;
pub mod entity;
pub mod journal_entry;
pub mod period;
pub mod position;
pub mod session;
pub mod stock_category;
pub mod stock_item;
pub mod supplier;
pub mod user;

pub use app::*;

pub mod primitives {
    pub use tasyir_types::primitives::*;
}

pub mod query {
    #[derive(Debug)]
    pub struct PaginatedQueryArgs<T: std::fmt::Debug> {
        pub first: usize,
        pub after: Option<T>,
    }

    pub struct PaginatedQueryRet<T, C> {
        pub entities: Vec<T>,
        pub has_next_page: bool,
        pub end_cursor: Option<C>,
    }
}

pub use primitives::*;
