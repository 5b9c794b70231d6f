pub mod config;
pub mod error;
pub mod escape;
pub mod naming;
pub mod types;

pub use config::{Config, DeploySettings, Environment};
pub use error::{ConfigError, DeployError, Result};
pub use escape::decode_escaped_html;
pub use naming::{base_site_name, candidate_name, normalize_site_name};
pub use types::*;
