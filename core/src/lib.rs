//! Synchronous client for the Docsvault document-management API.
//!
//! # Overview
//! Every remote endpoint is one call: build a query against
//! `{base_url}/DocsvaultAPI/{action}`, send it, parse the XML envelope, check
//! its status code, and reshape the `Result` node into a flat record or list
//! of records.
//!
//! # Design
//! - `DocsvaultClient::invoke` is the only code path that talks to the
//!   server; the typed wrappers (`login`, `get_file_details`, ...) are thin
//!   projections over it.
//! - Endpoints are static `Operation` descriptors (`operation::Endpoint`).
//! - Errors are either transport-level or application-level
//!   (`ApiError::kind`); nothing is retried.
//! - The session token is passed explicitly to every call. The client holds
//!   no session state.
//! - The crate emits `tracing` events but never installs a subscriber.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod operation;
pub mod projection;
pub mod types;

pub use client::{DocsvaultClient, API_NAMESPACE};
pub use envelope::{Envelope, Node};
pub use error::{ApiError, ErrorKind, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use operation::{Endpoint, Operation, StatusCheck};
pub use types::{
    CheckedOutFile, ConnectedUser, FileDetail, FileProfile, FileVersion, FolderDetail, FolderDocument,
    FolderProfile, Group, IndexEntry, LocatedFileDetail, RelatedDocument, UserDetail,
};
