//! Gateway: HTTP server for the LINE webhook.
//!
//! Single port serves the webhook (`POST /callback`), a health probe and the static
//! assets that template replies link to.

mod assets;
mod server;

pub use assets::asset_base_url;
pub use server::{router, run_gateway, run_gateway_with, GatewayState};
