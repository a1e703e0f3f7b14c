/// Asynchronous response delivery.
///
/// Commands from a detached control panel arrive asynchronously relative
/// to the session's owning context. The session mutates synchronously;
/// the response goes back over a channel, and a delivery failure (the
/// caller navigated away or dropped the receiver) is swallowed because
/// no recovery action is possible.
use std::sync::mpsc::Sender;

use crate::command::CommandResponse;
use crate::session::SurfaceSession;

/// Executes a JSON-encoded request and sends the response to `responder`.
///
/// A send failure means the receiver is gone; it is logged and dropped,
/// never escalated.
pub fn dispatch_to(session: &mut SurfaceSession, raw: &str, responder: &Sender<CommandResponse>) {
    let response = session.handle_json(raw);
    if responder.send(response).is_err() {
        tracing::debug!(
            "response receiver for {} is gone; dropping command result",
            session.store().surface_id()
        );
    }
}
