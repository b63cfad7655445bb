pub mod cascade_resolver;
pub mod table_sorter;

pub use cascade_resolver::{blocks_of, districts_of, states_of, villages_of, CascadeOptions};
pub use table_sorter::{SortColumn, SortDirection, TableSort};
