pub mod card;
pub mod quote;

pub use card::{Card, CardMetadata, TitleField, TITLE_PRIORITY, UNKNOWN_TITLE};
pub use quote::PriceQuote;
