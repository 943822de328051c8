//! Policy terms and product lines

mod data;
pub mod terms;

pub use data::{Policy, ProductLine};
pub use terms::{PolicyTerms, MAX_AMOUNT, MAX_DURATION_MONTHS};
