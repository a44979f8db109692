use std::sync::Arc;

use larder_service::LarderService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LarderService>,
}
impl AppState {
	pub fn new(config: larder_config::Config) -> Self {
		Self { service: Arc::new(LarderService::new(config)) }
	}
}
