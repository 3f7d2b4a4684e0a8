pub mod alarm_list;
pub mod config;
pub mod error;
pub mod execute;
pub mod fetch;
pub mod mutate;
pub mod plan;
pub mod run;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{AlarmError, Result};
