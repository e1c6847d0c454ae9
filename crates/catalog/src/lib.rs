//! Filterable, paginated, exportable reference tables.
//!
//! A dataset is a static slice of [`Record`]s described by a [`TableSpec`].
//! Filter state lives in a URL query string; [`FilterSession`] keeps the two
//! in sync through an injected [`Navigator`].

pub mod error;
pub mod record;
pub mod filter;
pub mod paginate;
pub mod url_state;
pub mod export;
pub mod table;

pub use error::*;
pub use record::*;
pub use filter::{FilterState, Selection};
pub use paginate::{paginate, parse_page, Page, PageInfo};
pub use url_state::*;
pub use export::CsvExport;
pub use table::*;
