//! Entity projections returned by the typed wrappers.
//!
//! # Design
//! Each struct is a flat record whose serialized keys are the snake_case names
//! callers of the Docsvault binding already rely on. Values are copied from
//! the envelope verbatim; an element that is present but empty becomes `None`.
//! The only coercion is `checked_out`, which is a `bool` on `FileDetail` and
//! `CheckedOutFile` and stays a string everywhere else, matching what each
//! endpoint historically returned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A Docsvault user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetail {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub dv_authentication: Option<String>,
    pub web_access: Option<String>,
    pub license_type: Option<String>,
}

/// A user with an open session, as listed by `GetConnectedUsers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectedUser {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub dv_authentication: Option<String>,
    pub web_access: Option<String>,
    pub login_from: Option<String>,
    pub license_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub group_name: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
}

/// One profile index and its value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub index: Option<String>,
    pub index_value: Option<String>,
}

/// A file looked up by ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDetail {
    pub file_id: Option<String>,
    pub parent_id: Option<String>,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub flag_name: Option<String>,
    pub file_size: Option<String>,
    pub doc_type: Option<String>,
    pub pages: Option<String>,
    pub version: Option<String>,
    pub version_note: Option<String>,
    pub version_owner: Option<String>,
    pub version_owner_name: Option<String>,
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub accessed_date: Option<String>,
    pub checked_out: bool,
    pub checked_out_by: Option<String>,
    pub checked_out_by_name: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub doc_notes: Option<String>,
    pub profile_id: Option<String>,
    pub profile_name: Option<String>,
    pub indexes: Vec<IndexEntry>,
}

/// A file looked up by location. `checked_out` keeps the server's text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocatedFileDetail {
    pub file_id: Option<String>,
    pub parent_id: Option<String>,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub flag_name: Option<String>,
    pub file_size: Option<String>,
    pub doc_type: Option<String>,
    pub pages: Option<String>,
    pub version: Option<String>,
    pub version_note: Option<String>,
    pub version_owner: Option<String>,
    pub version_owner_name: Option<String>,
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub accessed_date: Option<String>,
    pub checked_out: Option<String>,
    pub checked_out_by: Option<String>,
    pub checked_out_by_name: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub doc_notes: Option<String>,
    pub profile_id: Option<String>,
    pub profile_name: Option<String>,
    pub list_of_indexes: Vec<IndexEntry>,
}

/// A file's profile with its index values keyed by index name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileProfile {
    pub flag_name: Option<String>,
    pub doc_notes: Option<String>,
    pub profile_name: Option<String>,
    pub index_values: BTreeMap<String, Option<String>>,
}

/// A file currently checked out, as listed by `GetCheckedoutFilesByUser`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckedOutFile {
    pub file_id: Option<String>,
    pub parent_id: Option<String>,
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub flag_name: Option<String>,
    pub file_size: Option<String>,
    pub doc_type: Option<String>,
    pub pages: Option<String>,
    pub version: Option<String>,
    pub version_note: Option<String>,
    pub version_owner: Option<String>,
    pub version_owner_name: Option<String>,
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub accessed_date: Option<String>,
    pub checked_out: bool,
    pub checked_out_by: Option<String>,
    pub checked_out_by_name: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileVersion {
    pub file_size: Option<String>,
    pub version: Option<String>,
    pub version_note: Option<String>,
    pub version_owner: Option<String>,
    pub version_owner_name: Option<String>,
    pub created_date: Option<String>,
    pub version_notes: Option<String>,
}

/// A document related to a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedDocument {
    pub file_id: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// A folder looked up by ID or location. `checked_out` keeps the server's
/// text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderDetail {
    pub folder_id: Option<String>,
    pub parent_id: Option<String>,
    pub folder_name: Option<String>,
    pub description: Option<String>,
    pub flag_name: Option<String>,
    pub has_child: Option<String>,
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub accessed_date: Option<String>,
    pub checked_out: Option<String>,
    pub checked_out_by: Option<String>,
    pub checked_out_by_name: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub location: Option<String>,
    pub doc_notes: Option<String>,
    pub profile_id: Option<String>,
    pub profile_name: Option<String>,
    pub list_of_indexes: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderProfile {
    pub flag_name: Option<String>,
    pub doc_notes: Option<String>,
    pub profile_name: Option<String>,
    pub list_of_indexes: Vec<IndexEntry>,
}

/// A document related to a folder, as listed by `GetFolderRelations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderDocument {
    pub doc_id: Option<String>,
    pub doc_name: Option<String>,
    pub doc_type: Option<String>,
    pub version: Option<String>,
    pub folder_id: Option<String>,
    pub folder_name: Option<String>,
    pub location: Option<String>,
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub accessed_date: Option<String>,
    pub size: Option<String>,
    pub extension: Option<String>,
    pub checksum: Option<String>,
    pub pages: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub file_path: Option<String>,
    pub doc_notes: Option<String>,
    pub workflow_status: Option<String>,
    pub web_access: Option<String>,
    pub task_id: Option<String>,
}
