//! Field remapping from envelope nodes to entity records.
//!
//! # Design
//! `Fields` wraps one record node together with the operation's failure
//! label. A `required` field must be present as an element (it may be empty,
//! which reads as `None`); its absence is a `MissingField` error naming the
//! element. An `optional` field is simply `None` when absent. Which fields are
//! required follows what each endpoint has always guaranteed; see the
//! `Project` impls below.

use std::collections::BTreeMap;

use crate::envelope::Node;
use crate::error::{ApiError, Result};
use crate::types::{
    CheckedOutFile, ConnectedUser, FileDetail, FileProfile, FileVersion, FolderDetail, FolderDocument,
    FolderProfile, Group, IndexEntry, LocatedFileDetail, RelatedDocument, UserDetail,
};

/// A record node plus the label used when one of its fields is missing.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    node: &'a Node,
    label: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(node: &'a Node, label: &'a str) -> Self {
        Self { node, label }
    }

    pub fn required(&self, name: &str) -> Result<Option<String>> {
        match self.node.child(name) {
            Some(child) => Ok(child.text().map(str::to_string)),
            None => Err(ApiError::MissingField {
                label: self.label.to_string(),
                field: name.to_string(),
            }),
        }
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        self.node.child_text(name).map(str::to_string)
    }

    /// `true` only for the literal text `"true"`.
    pub fn flag(&self, name: &str) -> bool {
        self.node.child_text(name) == Some("true")
    }

    /// Every `ListOfIndexes/Indexes` entry; none when the list is absent.
    pub fn indexes(&self) -> Vec<IndexEntry> {
        self.index_nodes()
            .map(|node| {
                let fields = Fields::new(node, self.label);
                IndexEntry {
                    index: fields.optional("Index"),
                    index_value: fields.optional("IndexValue"),
                }
            })
            .collect()
    }

    fn index_nodes(&self) -> impl Iterator<Item = &'a Node> + 'a {
        self.node
            .child("ListOfIndexes")
            .into_iter()
            .flat_map(|list| list.all("Indexes"))
    }
}

/// Build an entity record from its envelope node.
pub trait Project: Sized {
    fn project(fields: &Fields<'_>) -> Result<Self>;
}

/// Project one node.
pub fn project_one<T: Project>(node: &Node, label: &str) -> Result<T> {
    T::project(&Fields::new(node, label))
}

/// Project every child of `parent` named `name`; one child still yields a
/// one-element list and no children yield an empty one.
pub fn project_all<T: Project>(parent: Option<&Node>, name: &str, label: &str) -> Result<Vec<T>> {
    parent
        .into_iter()
        .flat_map(|p| p.all(name))
        .map(|node| project_one(node, label))
        .collect()
}

impl Project for UserDetail {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            user_id: f.required("UserID")?,
            user_name: f.required("UserName")?,
            full_name: f.required("UserFullName")?,
            description: f.required("UserDescription")?,
            email: f.required("UserEmail")?,
            dv_authentication: f.required("DVAuthentication")?,
            web_access: f.required("WebAccess")?,
            license_type: f.required("LicenseType")?,
        })
    }
}

impl Project for ConnectedUser {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            user_id: f.required("UserID")?,
            user_name: f.required("UserName")?,
            full_name: f.required("UserFullName")?,
            description: f.required("UserDescription")?,
            email: f.required("UserEmail")?,
            dv_authentication: f.required("DVAuthentication")?,
            web_access: f.required("WebAccess")?,
            login_from: f.required("LoginFrom")?,
            license_type: f.required("LicenseType")?,
        })
    }
}

impl Project for Group {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            group_name: f.required("GroupName")?,
            group_id: f.required("GroupID")?,
            description: f.required("Description")?,
        })
    }
}

impl Project for FileDetail {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            file_id: f.required("FileID")?,
            parent_id: f.required("ParentID")?,
            file_name: f.required("FileName")?,
            description: f.required("Description")?,
            flag_name: f.required("FlagName")?,
            file_size: f.required("FileSize")?,
            doc_type: f.required("DocType")?,
            pages: f.required("Pages")?,
            version: f.required("Version")?,
            version_note: f.required("VersionNote")?,
            version_owner: f.required("VersionOwner")?,
            version_owner_name: f.required("VersionOwnerName")?,
            modified_date: f.required("ModifiedDate")?,
            created_date: f.required("CreatedDate")?,
            accessed_date: f.required("AccessedDate")?,
            checked_out: f.flag("CheckedOut"),
            checked_out_by: f.optional("CheckedOutBy"),
            checked_out_by_name: f.optional("CheckedOutByName"),
            owner_id: f.required("OwnerID")?,
            owner_name: f.required("OwnerName")?,
            location: f.required("Location")?,
            doc_notes: f.required("DocNotes")?,
            profile_id: f.required("ProfileID")?,
            profile_name: f.required("ProfileName")?,
            indexes: f.indexes(),
        })
    }
}

impl Project for LocatedFileDetail {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            file_id: f.required("FileID")?,
            parent_id: f.required("ParentID")?,
            file_name: f.required("FileName")?,
            description: f.required("Description")?,
            flag_name: f.required("FlagName")?,
            file_size: f.required("FileSize")?,
            doc_type: f.required("DocType")?,
            pages: f.required("Pages")?,
            version: f.required("Version")?,
            version_note: f.required("VersionNote")?,
            version_owner: f.required("VersionOwner")?,
            version_owner_name: f.required("VersionOwnerName")?,
            modified_date: f.required("ModifiedDate")?,
            created_date: f.required("CreatedDate")?,
            accessed_date: f.required("AccessedDate")?,
            checked_out: f.optional("CheckedOut"),
            checked_out_by: f.optional("CheckedOutBy"),
            checked_out_by_name: f.optional("CheckedOutByName"),
            owner_id: f.required("OwnerID")?,
            owner_name: f.required("OwnerName")?,
            location: f.required("Location")?,
            doc_notes: f.required("DocNotes")?,
            profile_id: f.required("ProfileID")?,
            profile_name: f.required("ProfileName")?,
            list_of_indexes: f.indexes(),
        })
    }
}

impl Project for FileProfile {
    fn project(f: &Fields<'_>) -> Result<Self> {
        let mut index_values = BTreeMap::new();
        for node in f.index_nodes() {
            let index = Fields::new(node, f.label);
            let name = index.required("Index")?.unwrap_or_default();
            index_values.insert(name, index.required("IndexValue")?);
        }
        Ok(Self {
            flag_name: f.required("FlagName")?,
            doc_notes: f.required("DocNotes")?,
            profile_name: f.required("ProfileName")?,
            index_values,
        })
    }
}

impl Project for CheckedOutFile {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            file_id: f.required("FileID")?,
            parent_id: f.required("ParentID")?,
            file_name: f.required("FileName")?,
            description: f.required("Description")?,
            flag_name: f.required("FlagName")?,
            file_size: f.required("FileSize")?,
            doc_type: f.required("DocType")?,
            pages: f.required("Pages")?,
            version: f.required("Version")?,
            version_note: f.required("VersionNote")?,
            version_owner: f.required("VersionOwner")?,
            version_owner_name: f.required("VersionOwnerName")?,
            modified_date: f.required("ModifiedDate")?,
            created_date: f.required("CreatedDate")?,
            accessed_date: f.required("AccessedDate")?,
            checked_out: f.flag("CheckedOut"),
            checked_out_by: f.optional("CheckedOutBy"),
            checked_out_by_name: f.optional("CheckedOutByName"),
            owner_id: f.required("OwnerID")?,
            owner_name: f.required("OwnerName")?,
            location: f.required("Location")?,
        })
    }
}

impl Project for FileVersion {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            file_size: f.required("FileSize")?,
            version: f.required("Version")?,
            version_note: f.required("VersionNote")?,
            version_owner: f.required("VersionOwner")?,
            version_owner_name: f.required("VersionOwnerName")?,
            created_date: f.required("CreatedDate")?,
            version_notes: f.required("VersionNotes")?,
        })
    }
}

impl Project for RelatedDocument {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            file_id: f.required("FileID")?,
            description: f.required("Description")?,
            location: f.required("Location")?,
        })
    }
}

// Folder records are read leniently: every field may be absent.

impl Project for FolderDetail {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            folder_id: f.optional("FolderID"),
            parent_id: f.optional("ParentID"),
            folder_name: f.optional("FolderName"),
            description: f.optional("Description"),
            flag_name: f.optional("FlagName"),
            has_child: f.optional("HasChild"),
            modified_date: f.optional("ModifiedDate"),
            created_date: f.optional("CreatedDate"),
            accessed_date: f.optional("AccessedDate"),
            checked_out: f.optional("CheckedOut"),
            checked_out_by: f.optional("CheckedOutBy"),
            checked_out_by_name: f.optional("CheckedOutByName"),
            owner_id: f.optional("OwnerID"),
            owner_name: f.optional("OwnerName"),
            location: f.optional("Location"),
            doc_notes: f.optional("DocNotes"),
            profile_id: f.optional("ProfileID"),
            profile_name: f.optional("ProfileName"),
            list_of_indexes: f.indexes(),
        })
    }
}

impl Project for FolderProfile {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            flag_name: f.optional("FlagName"),
            doc_notes: f.optional("DocNotes"),
            profile_name: f.optional("ProfileName"),
            list_of_indexes: f.indexes(),
        })
    }
}

impl Project for FolderDocument {
    fn project(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            doc_id: f.optional("DocID"),
            doc_name: f.optional("DocName"),
            doc_type: f.optional("DocType"),
            version: f.optional("Version"),
            folder_id: f.optional("FolderID"),
            folder_name: f.optional("FolderName"),
            location: f.optional("Location"),
            modified_date: f.optional("ModifiedDate"),
            created_date: f.optional("CreatedDate"),
            accessed_date: f.optional("AccessedDate"),
            size: f.optional("Size"),
            extension: f.optional("Extension"),
            checksum: f.optional("Checksum"),
            pages: f.optional("Pages"),
            author: f.optional("Author"),
            title: f.optional("Title"),
            subject: f.optional("Subject"),
            keywords: f.optional("Keywords"),
            category: f.optional("Category"),
            status: f.optional("Status"),
            comment: f.optional("Comment"),
            owner_id: f.optional("OwnerID"),
            owner_name: f.optional("OwnerName"),
            file_path: f.optional("FilePath"),
            doc_notes: f.optional("DocNotes"),
            workflow_status: f.optional("WorkflowStatus"),
            web_access: f.optional("WebAccess"),
            task_id: f.optional("TaskID"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::parse_document;

    const FILE_DETAIL: &str = r#"<FileDetail>
        <FileID>101</FileID><ParentID>10</ParentID><FileName>invoice.pdf</FileName>
        <Description>March invoice</Description><FlagName/><FileSize>2048</FileSize>
        <DocType>PDF</DocType><Pages>3</Pages><Version>2</Version><VersionNote>fixed total</VersionNote>
        <VersionOwner>5</VersionOwner><VersionOwnerName>Ann Lee</VersionOwnerName>
        <ModifiedDate>2023-03-02</ModifiedDate><CreatedDate>2023-03-01</CreatedDate>
        <AccessedDate>2023-03-03</AccessedDate><CheckedOut>true</CheckedOut>
        <CheckedOutBy>5</CheckedOutBy><CheckedOutByName>Ann Lee</CheckedOutByName>
        <OwnerID>5</OwnerID><OwnerName>Ann Lee</OwnerName><Location>Finance\Invoices</Location>
        <DocNotes/><ProfileID>3</ProfileID><ProfileName>Invoice</ProfileName>
        <ListOfIndexes>
          <Indexes><Index>Vendor</Index><IndexValue>Acme</IndexValue></Indexes>
          <Indexes><Index>Amount</Index><IndexValue>120.00</IndexValue></Indexes>
        </ListOfIndexes>
      </FileDetail>"#;

    fn node(xml: &str) -> Node {
        parse_document(xml).unwrap()
    }

    #[test]
    fn file_detail_coerces_checked_out_to_bool() {
        let file: FileDetail = project_one(&node(FILE_DETAIL), "Could not get file details.").unwrap();
        assert!(file.checked_out);
        assert_eq!(file.file_id.as_deref(), Some("101"));
        assert_eq!(file.flag_name, None);
        assert_eq!(file.location.as_deref(), Some("Finance\\Invoices"));
        assert_eq!(file.indexes.len(), 2);
        assert_eq!(file.indexes[1].index_value.as_deref(), Some("120.00"));
    }

    #[test]
    fn located_file_detail_keeps_checked_out_text() {
        let file: LocatedFileDetail =
            project_one(&node(FILE_DETAIL), "Could not get file details.").unwrap();
        assert_eq!(file.checked_out.as_deref(), Some("true"));

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["checked_out"], "true");
        assert_eq!(json["list_of_indexes"][0]["index"], "Vendor");
    }

    #[test]
    fn file_detail_serializes_documented_keys_only() {
        let file: FileDetail = project_one(&node(FILE_DETAIL), "x").unwrap();
        let json = serde_json::to_value(&file).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = vec![
            "file_id", "parent_id", "file_name", "description", "flag_name", "file_size", "doc_type",
            "pages", "version", "version_note", "version_owner", "version_owner_name", "modified_date",
            "created_date", "accessed_date", "checked_out", "checked_out_by", "checked_out_by_name",
            "owner_id", "owner_name", "location", "doc_notes", "profile_id", "profile_name", "indexes",
        ];
        expected.sort_unstable();
        keys.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(json["checked_out"], true);
    }

    #[test]
    fn missing_checked_out_reads_false_on_file_detail() {
        let xml = FILE_DETAIL.replace("<CheckedOut>true</CheckedOut>", "");
        let file: FileDetail = project_one(&node(&xml), "x").unwrap();
        assert!(!file.checked_out);
    }

    #[test]
    fn missing_checked_out_is_none_by_location() {
        let xml = FILE_DETAIL.replace("<CheckedOut>true</CheckedOut>", "");
        let file: LocatedFileDetail = project_one(&node(&xml), "Could not get file details.").unwrap();
        assert_eq!(file.checked_out, None);
        assert_eq!(file.checked_out_by.as_deref(), Some("5"));
    }

    #[test]
    fn missing_required_user_field_is_application_error() {
        let xml = "<UserDetail><UserID>1</UserID></UserDetail>";
        let err = project_one::<UserDetail>(&node(xml), "Could not get user details.").unwrap_err();
        assert!(matches!(err, ApiError::MissingField { ref field, .. } if field == "UserName"));
    }

    #[test]
    fn file_profile_maps_index_names_to_values() {
        let profile: FileProfile = project_one(&node(FILE_DETAIL), "x").unwrap();
        assert_eq!(profile.profile_name.as_deref(), Some("Invoice"));
        assert_eq!(profile.index_values.len(), 2);
        assert_eq!(profile.index_values["Vendor"].as_deref(), Some("Acme"));
        assert_eq!(profile.doc_notes, None);
    }

    #[test]
    fn single_index_is_still_a_list() {
        let xml = "<FolderDetail><ListOfIndexes><Indexes><Index>Year</Index><IndexValue>2023</IndexValue></Indexes></ListOfIndexes></FolderDetail>";
        let folder: FolderDetail = project_one(&node(xml), "x").unwrap();
        assert_eq!(
            folder.list_of_indexes,
            vec![IndexEntry {
                index: Some("Year".to_string()),
                index_value: Some("2023".to_string()),
            }]
        );
    }

    #[test]
    fn folder_fields_are_lenient() {
        let folder: FolderDetail = project_one(&node("<FolderDetail/>"), "x").unwrap();
        assert_eq!(folder, FolderDetail::default());
    }

    #[test]
    fn project_all_normalizes_cardinality() {
        let one = node("<Result><Group><GroupName>Admins</GroupName><GroupID>1</GroupID><Description/></Group></Result>");
        let groups: Vec<Group> = project_all(Some(&one), "Group", "x").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name.as_deref(), Some("Admins"));

        let none: Vec<Group> = project_all(None, "Group", "x").unwrap();
        assert!(none.is_empty());
    }
}
