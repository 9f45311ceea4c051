pub mod rest;
pub mod source;
pub mod types;

pub use rest::GachaRestClient;
pub use source::GachaSource;
