//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use runtime::RuntimeHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the match via RuntimeHandle:
/// - Subscribe to events (Battle, Lock)
/// - Submit casts
/// - Query snapshots
///
/// Frontends do NOT own the Runtime - they receive a handle for communication only.
///
/// # Example Implementation
///
/// ```no_run
/// use async_trait::async_trait;
/// use client_frontend_core::Frontend;
/// use runtime::RuntimeHandle;
/// use anyhow::Result;
///
/// struct MyFrontend;
///
/// #[async_trait]
/// impl Frontend for MyFrontend {
///     async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
///         let mut events = handle.subscribe(runtime::Topic::Battle);
///
///         while let Ok(event) = events.recv().await {
///             // Render UI, handle input, etc.
///         }
///
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop.
    ///
    /// Should return when the user quits. The handle must not outlive this
    /// call, or runtime shutdown will wait on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend encounters a fatal error.
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()>;
}
