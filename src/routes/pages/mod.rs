mod handler;

pub use handler::{about, home, not_found, render_template};
