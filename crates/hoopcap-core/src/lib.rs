// Library root: the salary/performance join pipeline, exposed as modules so
// the binary and integration tests share one public API.

pub mod columns;
pub mod config;
pub mod error;
pub mod join;
pub mod normalize;
pub mod numeric;
pub mod pipeline;
pub mod report;
pub mod salary;
pub mod stats;
pub mod table;
