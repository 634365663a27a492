//! Component runtime — shared scaffolding for the widget's long-running
//! tasks (host channels, the relay).
//!
//! A [`Component`] captures its shared state at construction time; the
//! generic run signature only carries the shutdown token.
//! [`spawn_components`] runs each component as an independent Tokio task
//! and returns a [`RuntimeHandle`] that resolves when all of them have
//! exited. Any component error cancels the shared token so siblings
//! stop cooperatively.

use std::future::Future;
use std::pin::Pin;

use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::AppError;

/// A boxed, owned future returned by [`Component::run`].
pub type ComponentFuture = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'static>>;

/// A self-contained, concurrently-runnable unit.
pub trait Component: Send + 'static {
    /// Stable identifier used in log messages.
    fn id(&self) -> &str;

    /// Consume the component and return its run loop. The future must
    /// watch `shutdown` and exit promptly once it is cancelled.
    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture;
}

/// Handle to a running component set. Await [`RuntimeHandle::join`] to
/// block until all components have exited.
pub struct RuntimeHandle {
    inner: JoinHandle<Result<(), AppError>>,
}

impl RuntimeHandle {
    /// Await all components and return the first error, if any.
    pub async fn join(self) -> Result<(), AppError> {
        match self.inner.await {
            Ok(r) => r,
            Err(e) => Err(AppError::Host(format!("runtime task panicked: {e}"))),
        }
    }
}

/// Spawn each component as an independent task.
///
/// If any component returns `Err` or panics, `shutdown` is cancelled so
/// the siblings stop cooperatively; the remaining components are drained
/// and the first error is returned from the handle.
pub fn spawn_components(
    components: Vec<Box<dyn Component>>,
    shutdown: CancellationToken,
) -> RuntimeHandle {
    let handle = tokio::spawn(async move {
        let mut set: JoinSet<Result<(), AppError>> = JoinSet::new();

        for component in components {
            let id = component.id().to_string();
            debug!(component = %id, "spawning component");
            set.spawn(component.run(shutdown.clone()));
        }

        let mut first_err: Option<AppError> = None;

        while let Some(res) = set.join_next().await {
            match res {
                Err(e) => {
                    error!("component panicked: {e}");
                    shutdown.cancel();
                    first_err
                        .get_or_insert_with(|| AppError::Host(format!("component panicked: {e}")));
                }
                Ok(Err(e)) => {
                    error!("component failed: {e}");
                    shutdown.cancel();
                    first_err.get_or_insert(e);
                }
                Ok(Ok(())) => {}
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    });

    RuntimeHandle { inner: handle }
}
