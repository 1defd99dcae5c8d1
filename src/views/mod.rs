//! Per-role dashboard loaders. Each loader issues its fixed batch of
//! parallel reads on mount; the batch is all-or-nothing with respect to the
//! rendered state (any single failure discards every partial result and the
//! view falls back to defaults). No shared cache between views and no retry
//! here; the only special handling lives in the client's refresh interceptor.

mod admin;
mod doctor;
mod patient;
mod receptionist;

pub use admin::{AdminDashboard, AdminStats};
pub use doctor::DoctorDashboard;
pub use patient::PatientHome;
pub use receptionist::ReceptionistDesk;

use std::future::Future;

use tokio::task::JoinHandle;

/// A view's in-flight load, tied to the view's lifetime: dropping the task
/// aborts the fetch so a late response is discarded instead of being applied
/// to a view that no longer exists.
pub struct ViewTask<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ViewTask<T> {
    pub fn spawn(fut: impl Future<Output = T> + Send + 'static) -> Self {
        Self { handle: Some(tokio::spawn(fut)) }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }

    /// Wait for the load. `None` when the task was aborted.
    pub async fn join(mut self) -> Option<T> {
        let handle = self.handle.take()?;
        handle.await.ok()
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
