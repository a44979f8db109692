mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Gateway, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.gateway.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "gateway.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.gateway.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "gateway.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.target_floor == 0 {
		return Err(Error::Validation {
			message: "search.target_floor must be greater than zero.".to_string(),
		});
	}
	if cfg.search.min_results_before_broaden == 0 {
		return Err(Error::Validation {
			message: "search.min_results_before_broaden must be greater than zero.".to_string(),
		});
	}
	if cfg.search.min_results_before_broaden > cfg.search.target_floor {
		return Err(Error::Validation {
			message: "search.min_results_before_broaden must not exceed search.target_floor."
				.to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.http_bind = cfg.service.http_bind.trim().to_string();
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.gateway.api_base = cfg.gateway.api_base.trim().trim_end_matches('/').to_string();

	let path = cfg.gateway.path.trim();

	cfg.gateway.path =
		if path.is_empty() || path.starts_with('/') { path.to_string() } else { format!("/{path}") };
}
