//! Order of 86 showcase server.
//!
//! A small HTTP service for the "Order of 86" wizard showcase site. It
//! serves the pre-rendered static site, per-wizard profile pages with
//! Open Graph metadata, and on-demand OG card images for social link
//! unfurling.
//!
//! # Architecture
//!
//! - **Store**: wizard attributes loaded once at startup from a bundled
//!   JSON source ([`order86_core::WizardStore`])
//! - **Render**: profile pages via maud (compile-time templates, all
//!   dynamic values escaped) and OG cards via SVG rasterized with resvg
//! - **Cache**: first OG render per wizard is frozen in an in-process
//!   moka cache, so repeated requests return byte-identical PNGs
//! - **Rate limiting**: fixed-window per-client counter applied before
//!   routing, with a periodic sweep bounding the tracked set
//!
//! # Routes
//!
//! ```text
//! GET /wizard/{id}          profile page (HTML)
//! GET /wizard/{id}/og.png   OG card image (PNG)
//! GET /health               health probe (JSON)
//! GET /*                    static files under the document root,
//!                           with an index fallback for unknown routes
//! ```

pub mod config;
pub mod error;
pub mod ogcard;
pub mod ratelimit;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
