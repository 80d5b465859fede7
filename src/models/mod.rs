pub mod catalog;

pub use catalog::{Catalog, Channel, Region};
