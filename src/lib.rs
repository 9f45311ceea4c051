pub mod config;
pub mod error;
pub mod ev;
pub mod gacha;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod preferences;
pub mod report;
pub mod server;
pub mod ui;
