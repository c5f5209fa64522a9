use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use super::super::{EventHandler, EventSource, Subscription};

/// One event type on one DOM target
pub struct DomEvents {
    target: EventTarget,
    event: &'static str,
}

impl DomEvents {
    pub fn new(target: EventTarget, event: &'static str) -> Self {
        Self { target, event }
    }

    pub fn click(target: EventTarget) -> Self {
        Self::new(target, "click")
    }
}

impl EventSource for DomEvents {
    fn subscribe(&self, handler: EventHandler) -> Subscription {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        if let Err(e) = self
            .target
            .add_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref())
        {
            warn!(event = self.event, error = ?e, "addEventListener failed");
            return Subscription::new(|| {});
        }

        let target = self.target.clone();
        let event = self.event;
        Subscription::new(move || {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            // Detaching usually happens from inside the listener itself; the
            // closure is freed once that dispatch has returned.
            wasm_bindgen_futures::spawn_local(async move { drop(closure) });
        })
    }
}
