/// Command boundary for one tracked surface.
///
/// A `SurfaceSession` owns the surface's `HistoryStore` and executes
/// typed commands against an attached `TextSurface`, answering with the
/// `{success, error?}` / `{words, chars, lines}` response contract.
pub mod command;
pub mod dispatch;
pub mod session;

pub use command::{
    Command, CommandRequest, CommandResponse, ERR_NO_TEXT_ELEMENT, ERR_UNKNOWN_ACTION,
};
pub use dispatch::dispatch_to;
pub use session::SurfaceSession;
