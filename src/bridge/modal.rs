//! Modal Resource Controller
//!
//! Owns the injected modal / file-input handles and turns "the user picked a
//! file or closed the dialog" into a one-shot awaitable result.
//!
//! Each call creates a `PendingRequest` holding the resolver and both
//! dismissal subscriptions. The request settles exactly once: the first
//! handler invocation releases both subscriptions, hides the modal and sends
//! the outcome. Dropping the request (settled or not) releases whatever
//! subscriptions are left, so no listener outlives its request.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::sync::oneshot;
use tracing::debug;

use super::BridgeError;
use crate::core::RequestId;
use crate::platform::{EventHandler, ModalResources, PickedFile, Subscription};

/// Outcome of a file selection request
pub enum FileSelection {
    /// The user picked a file before dismissing the modal
    Selected(Box<dyn PickedFile>),
    /// The modal was dismissed with nothing selected
    Dismissed,
}

impl FileSelection {
    pub fn is_dismissed(&self) -> bool {
        matches!(self, FileSelection::Dismissed)
    }
}

impl std::fmt::Debug for FileSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSelection::Selected(file) => f.debug_tuple("Selected").field(&file.name()).finish(),
            FileSelection::Dismissed => f.write_str("Dismissed"),
        }
    }
}

/// Lifecycle of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    /// Settled with a file
    Resolved,
    /// Settled without a file, or abandoned before settling
    Cancelled,
}

struct PendingRequest {
    id: RequestId,
    state: Rc<Cell<Option<RequestState>>>,
    resolver: RefCell<Option<oneshot::Sender<FileSelection>>>,
    subscriptions: RefCell<Vec<Subscription>>,
    resources: ModalResources,
}

impl PendingRequest {
    fn release_subscriptions(&self) {
        let released = std::mem::take(&mut *self.subscriptions.borrow_mut());
        drop(released);
    }

    fn settle(&self) {
        self.release_subscriptions();
        let Some(resolver) = self.resolver.borrow_mut().take() else {
            return;
        };
        self.resources.modal.hide();

        let selection = match self.resources.file_input.selected() {
            Some(file) => {
                debug!(request_id = %self.id, file = %file.name(), "file selected");
                self.state.set(Some(RequestState::Resolved));
                FileSelection::Selected(file)
            }
            None => {
                debug!(request_id = %self.id, "file selection dismissed");
                self.state.set(Some(RequestState::Cancelled));
                FileSelection::Dismissed
            }
        };
        // The receiver only goes away together with this request.
        let _ = resolver.send(selection);
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.release_subscriptions();
        if self.resolver.get_mut().take().is_some() {
            debug!(request_id = %self.id, "file request abandoned before settling");
            self.resources.modal.hide();
            self.state.set(Some(RequestState::Cancelled));
        }
    }
}

/// Marks the single request slot as taken for as long as it lives
struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    fn claim(flag: &Rc<Cell<bool>>) -> Result<Self, BridgeError> {
        if flag.replace(true) {
            return Err(BridgeError::RequestPending);
        }
        Ok(Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Controller for the shared file-picker modal
pub struct ModalController {
    resources: ModalResources,
    in_flight: Rc<Cell<bool>>,
    last_state: Rc<Cell<Option<RequestState>>>,
}

impl ModalController {
    pub fn new(resources: ModalResources) -> Self {
        Self {
            resources,
            in_flight: Rc::new(Cell::new(false)),
            last_state: Rc::new(Cell::new(None)),
        }
    }

    /// Whether a request currently owns the modal
    pub fn is_pending(&self) -> bool {
        self.in_flight.get()
    }

    /// State of the most recent request
    pub fn last_state(&self) -> Option<RequestState> {
        self.last_state.get()
    }

    /// Show the modal and wait for the user to pick a file or dismiss it
    ///
    /// Dismissal is a normal outcome ([`FileSelection::Dismissed`]), not an
    /// error. Fails with [`BridgeError::RequestPending`] while an earlier
    /// request has not settled.
    pub async fn request_file_selection(&self) -> Result<FileSelection, BridgeError> {
        let _slot = InFlight::claim(&self.in_flight)?;
        let resources = &self.resources;

        resources.file_input.reset();
        resources.modal.show().await?;

        // Subscribing only now keeps the click that opened the modal from
        // dismissing it.
        let (resolver, resolution) = oneshot::channel();
        let request = Rc::new(PendingRequest {
            id: RequestId::new(),
            state: self.last_state.clone(),
            resolver: RefCell::new(Some(resolver)),
            subscriptions: RefCell::new(Vec::with_capacity(2)),
            resources: resources.clone(),
        });
        request.state.set(Some(RequestState::Pending));

        let handler: EventHandler = {
            let request = Rc::downgrade(&request);
            Rc::new(move || {
                if let Some(request) = request.upgrade() {
                    request.settle();
                }
            })
        };
        let close = resources.modal.close_control().subscribe(handler.clone());
        let outside = resources.outside_clicks.subscribe(handler);
        request.subscriptions.borrow_mut().extend([close, outside]);

        debug!(request_id = %request.id, "waiting for file selection");
        let selection = resolution.await.unwrap_or(FileSelection::Dismissed);
        Ok(selection)
    }
}
