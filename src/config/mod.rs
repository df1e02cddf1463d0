//! Configuration module for SEO-Probe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an absent file or section is never an error.
//!
//! # Example
//!
//! ```no_run
//! use seo_probe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-probe.toml")).unwrap();
//! println!("Crawl delay: {}ms", config.crawler.crawl_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, InsightConfig, MobileCheck, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
