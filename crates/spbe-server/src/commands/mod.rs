pub mod dispatch;
pub mod migrate;
pub mod schema;
pub mod seed;
pub mod serve;

pub use dispatch::dispatch;
