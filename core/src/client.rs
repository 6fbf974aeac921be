//! Request builder, envelope check and typed wrappers for the Docsvault API.
//!
//! # Design
//! `DocsvaultClient` holds only a base URL and a transport; the session token
//! is an argument of every call. All endpoints go through `invoke`, which is
//! split like the rest of the crate into `build_request` (pure), the
//! transport round-trip, and `parse_response` (pure). The typed wrappers add
//! nothing but parameter names and a projection of the `Result` node.

use tracing::{debug, warn};

use crate::envelope::{Envelope, Node};
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::operation::{Endpoint, Operation};
use crate::projection::{project_all, project_one, Project};
use crate::types::{
    CheckedOutFile, ConnectedUser, FileDetail, FileProfile, FileVersion, FolderDetail, FolderDocument,
    FolderProfile, Group, LocatedFileDetail, RelatedDocument, UserDetail,
};

/// Path segment every endpoint lives under.
pub const API_NAMESPACE: &str = "DocsvaultAPI";

/// Synchronous client for one Docsvault server.
#[derive(Debug, Clone)]
pub struct DocsvaultClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl DocsvaultClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> DocsvaultClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request(&self, operation: &Operation, params: &[(&str, &str)]) -> HttpRequest {
        HttpRequest {
            method: operation.method,
            path: format!("{}/{API_NAMESPACE}/{}", self.base_url, operation.action),
            query: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Check the HTTP status and the envelope status, returning the `Result`
    /// node untouched.
    pub fn parse_response(&self, operation: &Operation, response: HttpResponse) -> Result<Option<Node>> {
        if response.status != 200 {
            return Err(ApiError::Http {
                operation: operation.name().to_string(),
                status: response.status,
            });
        }

        let envelope = Envelope::parse(&response.body).map_err(|e| ApiError::Malformed {
            label: operation.label.clone(),
            reason: e.to_string(),
        })?;

        if !operation.status_check.is_success(envelope.status_code.as_deref()) {
            let message = envelope
                .message
                .unwrap_or_else(|| "No message in API response.".to_string());
            warn!(action = %operation.action, status_code = ?envelope.status_code, %message, "Docsvault rejected call");
            return Err(ApiError::Rejected {
                label: operation.label.clone(),
                message,
            });
        }

        Ok(envelope.result)
    }

    /// Perform one call: build, send, check. No retries.
    pub fn invoke(&self, operation: &Operation, params: &[(&str, &str)]) -> Result<Option<Node>> {
        let request = self.build_request(operation, params);
        debug!(action = %operation.action, method = %request.method, url = %request.path, "calling Docsvault API");

        let response = self
            .transport
            .execute(&request)
            .map_err(|e| ApiError::Network {
                operation: operation.name().to_string(),
                reason: e.to_string(),
            })?;
        debug!(action = %operation.action, status = response.status, "Docsvault API answered");

        self.parse_response(operation, response)
    }

    fn call(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Option<Node>> {
        self.invoke(&endpoint.operation(), params)
    }

    /// A single record that must be present under `Result/<name>`.
    fn record<P: Project>(&self, endpoint: Endpoint, params: &[(&str, &str)], name: &str) -> Result<P> {
        let result = self.call(endpoint, params)?;
        let node = result
            .as_ref()
            .and_then(|r| r.child(name))
            .ok_or_else(|| missing(endpoint, name))?;
        project_one(node, endpoint.label())
    }

    /// A single record under `Result/<name>`, projected from an empty node
    /// when the server omits it.
    fn lenient_record<P: Project>(&self, endpoint: Endpoint, params: &[(&str, &str)], name: &str) -> Result<P> {
        let result = self.call(endpoint, params)?;
        match result.as_ref().and_then(|r| r.child(name)) {
            Some(node) => project_one(node, endpoint.label()),
            None => project_one(&Node::new(name), endpoint.label()),
        }
    }

    /// Zero, one or many records under `Result/<name>`.
    fn records<P: Project>(&self, endpoint: Endpoint, params: &[(&str, &str)], name: &str) -> Result<Vec<P>> {
        let result = self.call(endpoint, params)?;
        project_all(result.as_ref(), name, endpoint.label())
    }

    // --- session ---

    /// Open a session; returns the token from `Result/TokenID`.
    pub fn login(&self, user_name: &str, password: &str) -> Result<String> {
        let endpoint = Endpoint::Login;
        let result = self.call(endpoint, &[("UserName", user_name), ("Password", password)])?;
        result
            .as_ref()
            .and_then(|r| r.child_text("TokenID"))
            .map(str::to_string)
            .ok_or_else(|| missing(endpoint, "Token ID"))
    }

    /// Open a session with POST; the token is the text of `Result` itself.
    pub fn login_post(&self, user_name: &str, password: &str) -> Result<String> {
        let endpoint = Endpoint::LoginPost;
        let result = self.call(endpoint, &[("UserName", user_name), ("Password", password)])?;
        result
            .as_ref()
            .and_then(Node::text)
            .map(str::to_string)
            .ok_or_else(|| missing(endpoint, "Token ID"))
    }

    pub fn logout(&self, token_id: &str, user_name: &str) -> Result<()> {
        self.call(Endpoint::Logout, &[("TokenID", token_id), ("UserName", user_name)])?;
        Ok(())
    }

    pub fn get_login_user_id(&self, token_id: &str) -> Result<String> {
        let endpoint = Endpoint::GetLoginUserId;
        let result = self.call(endpoint, &[("TokenID", token_id)])?;
        result
            .as_ref()
            .and_then(|r| r.child_text("UserID"))
            .map(str::to_string)
            .ok_or_else(|| missing(endpoint, "User ID"))
    }

    // --- users ---

    pub fn get_user_details_by_name(&self, token_id: &str, user_name: &str) -> Result<UserDetail> {
        self.record(
            Endpoint::GetUserDetailsByName,
            &[("TokenID", token_id), ("UserName", user_name)],
            "UserDetail",
        )
    }

    pub fn get_user_details_by_id(&self, token_id: &str, user_id: &str) -> Result<UserDetail> {
        self.record(
            Endpoint::GetUserDetailsById,
            &[("TokenID", token_id), ("UserID", user_id)],
            "UserDetail",
        )
    }

    pub fn get_user_details_by_email(&self, token_id: &str, email: &str) -> Result<UserDetail> {
        self.record(
            Endpoint::GetUserDetailsByEmail,
            &[("TokenID", token_id), ("EmailID", email)],
            "UserDetail",
        )
    }

    pub fn get_readonly_users(&self, token_id: &str) -> Result<Vec<UserDetail>> {
        self.records(Endpoint::GetReadonlyUsers, &[("TokenID", token_id)], "UserDetail")
    }

    pub fn get_webaccess_users(&self, token_id: &str) -> Result<Vec<UserDetail>> {
        self.records(Endpoint::GetWebAccessUsers, &[("TokenID", token_id)], "UserDetail")
    }

    pub fn get_user_groups(&self, token_id: &str, user_id: &str) -> Result<Vec<Group>> {
        self.records(
            Endpoint::GetUserGroups,
            &[("TokenID", token_id), ("UserID", user_id)],
            "Group",
        )
    }

    pub fn get_connected_users(&self, token_id: &str) -> Result<Vec<ConnectedUser>> {
        self.records(Endpoint::GetConnectedUsers, &[("TokenID", token_id)], "UserDetail")
    }

    // --- files ---

    pub fn get_file_details(&self, token_id: &str, file_id: &str) -> Result<FileDetail> {
        self.record(
            Endpoint::GetFileDetailsById,
            &[("TokenID", token_id), ("FileID", file_id)],
            "FileDetail",
        )
    }

    /// `location` is the full path including the file name, starting at the
    /// cabinet.
    pub fn get_file_details_by_location(&self, token_id: &str, location: &str) -> Result<LocatedFileDetail> {
        self.record(
            Endpoint::GetFileDetailsByLocation,
            &[("TokenID", token_id), ("Location", location)],
            "FileDetail",
        )
    }

    pub fn get_file_profile(&self, token_id: &str, file_id: &str) -> Result<FileProfile> {
        self.record(
            Endpoint::GetFileProfile,
            &[("TokenID", token_id), ("FileID", file_id)],
            "FileDetail",
        )
    }

    /// Files checked out by `user_id`, or by anyone when `user_id` is empty.
    pub fn get_checked_out_files_by_user(&self, token_id: &str, user_id: &str) -> Result<Vec<CheckedOutFile>> {
        self.records(
            Endpoint::GetCheckedOutFilesByUser,
            &[("TokenID", token_id), ("UserID", user_id)],
            "FileDetail",
        )
    }

    pub fn get_file_versions(&self, token_id: &str, file_id: &str) -> Result<Vec<FileVersion>> {
        self.records(
            Endpoint::GetFileVersions,
            &[("TokenID", token_id), ("FileID", file_id)],
            "FileDetail",
        )
    }

    pub fn get_file_relations(&self, token_id: &str, file_id: &str) -> Result<Vec<RelatedDocument>> {
        self.records(
            Endpoint::GetFileRelations,
            &[("TokenID", token_id), ("FileID", file_id)],
            "FileDetail",
        )
    }

    // --- folders ---

    pub fn get_folder_details_by_id(&self, token_id: &str, folder_id: &str) -> Result<FolderDetail> {
        self.lenient_record(
            Endpoint::GetFolderDetailsById,
            &[("TokenID", token_id), ("FolderID", folder_id)],
            "FolderDetail",
        )
    }

    pub fn get_folder_details_by_location(&self, token_id: &str, location: &str) -> Result<FolderDetail> {
        self.lenient_record(
            Endpoint::GetFolderDetailsByLocation,
            &[("TokenID", token_id), ("Location", location)],
            "FolderDetail",
        )
    }

    pub fn get_folder_profile(&self, token_id: &str, folder_id: &str) -> Result<FolderProfile> {
        self.lenient_record(
            Endpoint::GetFolderProfile,
            &[("TokenID", token_id), ("FolderID", folder_id)],
            "FolderDetail",
        )
    }

    pub fn get_folder_relations(&self, token_id: &str, folder_id: &str) -> Result<Vec<FolderDocument>> {
        let endpoint = Endpoint::GetFolderRelations;
        let result = self.call(endpoint, &[("TokenID", token_id), ("FolderID", folder_id)])?;
        let related = result.as_ref().and_then(|r| r.child("RelatedDocs"));
        project_all(related, "Doc", endpoint.label())
    }
}

fn missing(endpoint: Endpoint, field: &str) -> ApiError {
    ApiError::MissingField {
        label: endpoint.label().to_string(),
        field: field.to_string(),
    }
}
