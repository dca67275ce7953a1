use std::future::Future;
use tokio_util::sync::CancellationToken;
use super::error::{ApiError, Result};

/// Lifetime of one view
///
/// Every request issued for a view runs under the view's token. Cancelling
/// the scope, or dropping it, aborts requests still in flight so their
/// results are never applied.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the scope on Ctrl-C. Must be called inside a tokio runtime.
    pub fn cancel_on_interrupt(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                res = tokio::signal::ctrl_c() => {
                    if res.is_ok() {
                        log::info!("Interrupted, cancelling pending requests");
                        token.cancel();
                    }
                }
            }
        });
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Run a request future unless `token` is cancelled first
pub async fn guarded<F, T>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ApiError::Cancelled),
        res = fut => res,
    }
}
