pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod glossary;
pub mod institutions;
pub mod platform;
pub mod scale;
pub mod series;
pub mod source;
pub mod state;
pub mod table;
pub mod throttle;
pub mod timing;
