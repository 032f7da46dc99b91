use std::future::Future;

/// Run a fire-and-forget task off the UI path.
///
/// Natively the future is built and driven on its own thread, so it need not
/// be `Send`; on the web it runs on the browser's event loop.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F, Fut>(make_future: F)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    std::thread::spawn(move || futures::executor::block_on(make_future()));
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F, Fut>(make_future: F)
where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(make_future());
}
