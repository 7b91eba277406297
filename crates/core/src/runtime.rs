//! Task spawning and timers for both targets.
//!
//! Natively everything runs on tokio, so spawned futures must be `Send`.
//! In the browser there is one thread and futures run on the JS event loop.

use std::future::Future;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub type BoxedFuture<T> = futures_util::future::BoxFuture<'static, T>;

#[cfg(target_arch = "wasm32")]
pub type BoxedFuture<T> = futures_util::future::LocalBoxFuture<'static, T>;

/// Box a future into the platform's [`BoxedFuture`].
#[cfg(not(target_arch = "wasm32"))]
pub fn boxed<T, F>(fut: F) -> BoxedFuture<T>
where
    F: Future<Output = T> + Send + 'static,
{
    Box::pin(fut)
}

#[cfg(target_arch = "wasm32")]
pub fn boxed<T, F>(fut: F) -> BoxedFuture<T>
where
    F: Future<Output = T> + 'static,
{
    Box::pin(fut)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn(fut: BoxedFuture<()>) {
    tokio::spawn(fut);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn(fut: BoxedFuture<()>) {
    wasm_bindgen_futures::spawn_local(fut);
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
