use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use mervolt_contact::ContactSubmission;
use tokio::task::JoinHandle;

use crate::{Field, SubmissionStatus, SubmitTransport};

/// How long a successful submission keeps the success status.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

/// Message shown for any failed submission, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Failed to send message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// A previous submission is still waiting for its response; nothing was sent.
    AlreadyInFlight,
}

#[derive(Default)]
struct Inner {
    form: ContactSubmission,
    status: SubmissionStatus,
    reset_task: Option<JoinHandle<()>>,
}

// Never held across an await.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Settles a `Loading` status left behind when `submit` is dropped
/// before the transport answers.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut inner = lock(self.inner);
        if inner.status.is_loading() {
            tracing::warn!("contact form submission interrupted");
            inner.status = SubmissionStatus::Error(FAILURE_MESSAGE.to_owned());
        }
    }
}

/// Drives the contact form: holds field values, allows one outstanding
/// submission and tracks its status.
pub struct FormController<T> {
    transport: T,
    inner: Arc<Mutex<Inner>>,
    success_display: Duration,
}

impl<T: SubmitTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_success_display(transport, SUCCESS_DISPLAY)
    }

    pub fn with_success_display(transport: T, success_display: Duration) -> Self {
        Self {
            transport,
            inner: Arc::new(Mutex::new(Inner::default())),
            success_display,
        }
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let mut inner = lock(&self.inner);

        match field {
            Field::Name => inner.form.name = value,
            Field::Phone => inner.form.phone = value,
            Field::Message => inner.form.message = value,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        lock(&self.inner).status.clone()
    }

    pub fn form(&self) -> ContactSubmission {
        lock(&self.inner).form.clone()
    }

    /// Send the current field values to the relay.
    ///
    /// Returns [`SubmitOutcome::AlreadyInFlight`] without issuing a request
    /// while an earlier submission is loading. A pending success reversion
    /// is cancelled before the new request starts. If this future is
    /// dropped mid-request the status becomes an error and the fields stay.
    pub async fn submit(&self) -> SubmitOutcome {
        let form = {
            let mut inner = lock(&self.inner);
            if inner.status.is_loading() {
                tracing::debug!("submission already in flight");
                return SubmitOutcome::AlreadyInFlight;
            }

            if let Some(task) = inner.reset_task.take() {
                task.abort();
            }

            inner.status = SubmissionStatus::Loading;
            inner.form.clone()
        };

        let mut in_flight = InFlight {
            inner: &self.inner,
            settled: false,
        };

        let result = self.transport.submit(&form).await;

        let mut inner = lock(&self.inner);
        in_flight.settled = true;

        match result {
            Ok(()) => {
                tracing::info!("contact form submitted");
                inner.form.clear();
                inner.status = SubmissionStatus::Success;
                inner.reset_task = Some(self.schedule_reset());
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact form submission failed");
                inner.status = SubmissionStatus::Error(FAILURE_MESSAGE.to_owned());
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_reset(&self) -> JoinHandle<()> {
        let inner: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let delay = self.success_display;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(inner) = inner.upgrade() else {
                return;
            };

            let mut inner = lock(&inner);
            if inner.status.is_success() {
                inner.status = SubmissionStatus::Idle;
            }
            inner.reset_task = None;
        })
    }
}

impl<T> Drop for FormController<T> {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.inner).reset_task.take() {
            task.abort();
        }
    }
}
