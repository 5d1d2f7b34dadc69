//! roidash
//!
//! Terminal dashboard for marketing-campaign ROI reports.
//!
//! Pure core (`table`, `model`, `pages`, `route`, `state`) with an impure
//! shell (`report` fetching, `view` terminal rendering, `config` and
//! `logging` setup).

pub mod config;
pub mod logging;
pub mod model;
pub mod pages;
pub mod report;
pub mod route;
pub mod state;
pub mod table;
pub mod view;
