mod handler;
pub mod model;

pub use handler::{add_member, create_group};
