//! Scrolling fixed-duration window over live time series.
//!
//! `domain` holds the window engine, `application` the collaborator traits and
//! the polling scheduler, `infrastructure` the adapters, and `presentation`
//! the HTTP surface renderers consume.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
