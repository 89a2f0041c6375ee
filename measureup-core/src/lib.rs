pub mod calculations;
pub mod models;
pub mod report;
pub mod resolver;
pub mod session;

pub use models::*;
pub use resolver::{Resolution, ValueTable};
pub use session::{SessionState, Step};
