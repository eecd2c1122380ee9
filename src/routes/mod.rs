// Route exports
pub mod errors;
pub mod matches;
pub mod roommates;

use actix_web::web;

pub use errors::{handle_json_payload_error, handle_query_payload_error, JsonError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(roommates::configure),
    );
}
