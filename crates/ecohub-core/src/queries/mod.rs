pub mod ordering;
pub mod record_query;

pub use record_query::{OrderBy, Query, SortDirection};
