//! Top-level client orchestrating the Runtime and Frontend layers.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (Match engine, clock ticker, event bus)
//!   └─→ Frontend (UI layer - CLI, GUI, etc.)
//! ```
//!
//! The frontend only ever sees a [`RuntimeHandle`]; the client owns the
//! runtime and shuts it down once the frontend returns.

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::Result;
use runtime::RuntimeHandle;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. Client::builder() receives the runtime and frontend
/// 2. Client::run() transfers control to the frontend (blocking)
/// 3. On frontend exit, the runtime is shut down and its workers joined
pub struct Client {
    runtime: runtime::Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the client until the frontend returns.
    ///
    /// # Errors
    ///
    /// Returns the frontend's error if it failed, otherwise any error from
    /// shutting the runtime down.
    pub async fn run(self) -> Result<()> {
        let handle: RuntimeHandle = self.runtime.handle();

        // Run frontend (blocks until user quits)
        let mut frontend = self.frontend;
        let frontend_result = frontend.run(handle).await;

        // The frontend consumed its handle, so the worker can drain.
        let shutdown_result = self.runtime.shutdown().await;

        frontend_result?;
        shutdown_result?;
        Ok(())
    }
}
