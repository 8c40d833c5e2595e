use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use agent_transport::AgentTransport;
use reply_extract::EmailReply;
use tracing::{debug, error};

use crate::app::{App, HostOps, Mode, RequestId};
use crate::error::{interpret_call, GenerateError};

#[derive(Debug, Clone, PartialEq)]
pub enum RequestEvent {
    Completed {
        request_id: RequestId,
        outcome: Result<EmailReply, GenerateError>,
    },
    Faulted {
        request_id: RequestId,
        message: String,
    },
}

impl RequestEvent {
    fn request_id(&self) -> RequestId {
        match self {
            Self::Completed { request_id, .. } | Self::Faulted { request_id, .. } => *request_id,
        }
    }
}

/// Owner-side hooks the controller uses to get queued events applied.
pub trait RenderNotifier: Send + Sync {
    /// Called from a worker thread when the event queue goes from empty to
    /// non-empty. The owner should call
    /// [`RuntimeController::flush_pending_events`] soon after.
    fn events_pending(&self);

    fn request_render(&self);
}

/// Notifier for owners that poll [`RuntimeController::flush_pending_events`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl RenderNotifier for NoopNotifier {
    fn events_pending(&self) {}

    fn request_render(&self) {}
}

struct ActiveRequest {
    request_id: RequestId,
    join_handle: Option<JoinHandle<()>>,
}

pub struct RuntimeController {
    app: Arc<Mutex<App>>,
    notifier: Arc<dyn RenderNotifier>,
    pending_events: Mutex<VecDeque<RequestEvent>>,
    next_request_id: AtomicU64,
    active_request: Mutex<Option<ActiveRequest>>,
    transport: Arc<dyn AgentTransport>,
    agent_id: String,
}

impl RuntimeController {
    /// Creates a controller that runs each request on a worker thread and
    /// buffers its outcome until the owner drains the queue.
    ///
    /// Workers never touch `App` directly. Call
    /// [`RuntimeController::flush_pending_events`] from the owning thread to
    /// apply completions, typically after [`RenderNotifier::events_pending`].
    pub fn new(
        app: Arc<Mutex<App>>,
        notifier: Arc<dyn RenderNotifier>,
        transport: Arc<dyn AgentTransport>,
        agent_id: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            notifier,
            pending_events: Mutex::new(VecDeque::new()),
            next_request_id: AtomicU64::new(1),
            active_request: Mutex::new(None),
            transport,
            agent_id: agent_id.into(),
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Runs the generate handler against the shared app.
    pub fn generate(self: &Arc<Self>) {
        let mut host = Arc::clone(self);
        lock_unpoisoned(&self.app).on_generate(&mut host);
    }

    pub fn retry(self: &Arc<Self>) {
        let mut host = Arc::clone(self);
        lock_unpoisoned(&self.app).on_retry(&mut host);
    }

    pub fn is_request_active(&self) -> bool {
        self.lock_active_request().is_some()
    }

    fn start_request_internal(self: &Arc<Self>, message: String) -> Result<RequestId, String> {
        let mut active_request = self.lock_active_request();
        if active_request.is_some() {
            return Err("Request already active".to_string());
        }

        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        let join_handle = self.spawn_worker(request_id, message)?;

        *active_request = Some(ActiveRequest {
            request_id,
            join_handle: Some(join_handle),
        });

        Ok(request_id)
    }

    fn spawn_worker(
        self: &Arc<Self>,
        request_id: RequestId,
        message: String,
    ) -> Result<JoinHandle<()>, String> {
        let controller = Arc::clone(self);
        thread::Builder::new()
            .name(format!("reply-request-{request_id}"))
            .spawn(move || controller.run_worker(request_id, message))
            .map_err(|error| format!("Failed to spawn request worker: {error}"))
    }

    fn run_worker(self: Arc<Self>, request_id: RequestId, message: String) {
        self.wait_for_app_request_visibility(request_id);
        debug!(request_id, agent_id = %self.agent_id, "calling agent");

        let call_outcome =
            catch_unwind(AssertUnwindSafe(|| self.transport.call(&message, &self.agent_id)));

        let event = match call_outcome {
            Ok(outcome) => RequestEvent::Completed {
                request_id,
                outcome: interpret_call(outcome),
            },
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(request_id, %message, "agent transport panicked");
                RequestEvent::Faulted {
                    request_id,
                    message: format!("Agent transport panicked: {message}"),
                }
            }
        };

        self.enqueue_event(event);
    }

    fn enqueue_event(&self, event: RequestEvent) {
        let should_notify = {
            let mut queue = lock_unpoisoned(&self.pending_events);
            let should_notify = queue.is_empty();
            queue.push_back(event);
            should_notify
        };

        if should_notify {
            self.notifier.events_pending();
        }
    }

    fn drain_pending_events(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let event = lock_unpoisoned(&self.pending_events).pop_front();

            match event {
                Some(event) => {
                    self.apply_event(event);
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    /// Applies queued request events to `App` and requests a render when any
    /// were applied. Returns the number of events drained.
    pub fn flush_pending_events(&self) -> usize {
        let drained = self.drain_pending_events();
        if drained > 0 {
            self.notifier.request_render();
        }

        drained
    }

    fn wait_for_app_request_visibility(&self, request_id: RequestId) {
        for _ in 0..256 {
            let visible = {
                let app = lock_unpoisoned(&self.app);
                matches!(app.mode, Mode::Requesting { request_id: current } if current == request_id)
            };

            if visible {
                return;
            }

            thread::yield_now();
        }
    }

    fn apply_event(&self, event: RequestEvent) {
        let request_id = event.request_id();

        {
            let mut app = lock_unpoisoned(&self.app);
            match event {
                RequestEvent::Completed {
                    request_id,
                    outcome,
                } => app.on_request_completed(request_id, outcome),
                RequestEvent::Faulted {
                    request_id,
                    message,
                } => app.on_request_faulted(request_id, &message),
            }
        }

        self.clear_active_request_if_matching(request_id);
    }

    fn clear_active_request_if_matching(&self, request_id: RequestId) {
        let mut active_request = self.lock_active_request();
        let matches = active_request.as_ref().map(|active| active.request_id) == Some(request_id);
        if !matches {
            return;
        }

        let Some(mut completed) = active_request.take() else {
            return;
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn lock_active_request(&self) -> MutexGuard<'_, Option<ActiveRequest>> {
        lock_unpoisoned(&self.active_request)
    }
}

impl HostOps for Arc<RuntimeController> {
    fn start_request(&mut self, message: String) -> Result<RequestId, String> {
        self.start_request_internal(message)
    }

    fn request_render(&mut self) {
        self.notifier.request_render();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
