//! # cfddns
//!
//! Update Cloudflare DNS "A" records with the machine's current public IP.
//!
//! Each run fetches the public IP once, then for every sub-domain given
//! on the command line resolves the zone id and record id fresh and
//! issues one update. Nothing is cached or persisted between runs.
//!
//! ## Usage
//!
//! ```bash
//! # Token from the CLOUDFLARE_API_TOKEN environment variable
//! cfddns www.example.com
//!
//! # Token from a file, several records in one zone
//! cfddns --file ~/.cloudflare-token www.example.com vpn.example.com
//!
//! # Explicit zone name
//! cfddns --zone example.com deep.nested.example.com
//! ```

pub mod cloudflare;
pub mod config;
pub mod detector;
pub mod error;

pub use cloudflare::CloudflareClient;
pub use detector::IpDetector;
pub use error::{CfddnsError, Result};
