//! Problem data and the text instance format.

mod loader;
mod model;

pub use model::Instance;
