pub mod add;
pub mod aggregate;
pub mod backup;
pub mod duration;
pub mod filter;
pub mod log;
pub mod normalize;
pub mod query;
pub mod report;
pub mod validate;
