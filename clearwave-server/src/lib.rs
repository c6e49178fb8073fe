//! # clearwave-server
//!
//! HTTP upload handler for the clearwave denoiser.
//!
//! A thin layer of glue: it accepts a multipart WAV upload, hands the
//! decoded samples to [`clearwave_dsp`], and returns the cleaned audio as
//! a WAV attachment. The DSP core holds no state, so concurrent requests
//! are naturally independent; each one owns its own buffers for the
//! duration of the call.
//!
//! ## Example
//!
//! ```no_run
//! use clearwave_server::{DenoiseServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> clearwave_server::Result<()> {
//!     let server = DenoiseServer::new(ServerConfig {
//!         bind_address: "0.0.0.0:8080".to_string(),
//!         ..Default::default()
//!     });
//!     server.run().await
//! }
//! ```

mod error;
mod server;

pub use error::{Result, ServerError};
pub use server::{DenoiseServer, ServerConfig, ServerState};
