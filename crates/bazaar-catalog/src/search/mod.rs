//! Search module.
//!
//! Filter state, sort options and the pipeline that turns the catalog into the
//! visible product list.

mod filter;
mod query;
mod results;
mod select;

pub use filter::{FilterState, PriceRange};
pub use query::{CatalogQuery, Page, SortOption};
pub use results::{PagedResults, Pagination};
pub use select::select_visible_products;
