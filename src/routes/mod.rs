// Route exports
pub mod discovery;

use actix_web::web;
use crate::services::DiscoveryStore;

pub fn configure_routes<S: DiscoveryStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(discovery::configure::<S>),
    );
}
