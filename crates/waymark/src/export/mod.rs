//! QR code rendering and archive export.
//!
//! Codes are rendered once at startup into a [`QrStore`]. Requests only
//! read from the store, so no image work happens on the request path.

mod archive;
mod qr;
mod store;

pub use archive::pack_archive;
pub use qr::render_qr;
pub use store::{QrStore, QrStoreStatsSnapshot};
