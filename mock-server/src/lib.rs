//! In-memory stand-in for a Docsvault server.
//!
//! Serves the `/DocsvaultAPI/...` endpoints over a small seeded dataset and
//! answers with the same XML envelopes the real product sends. Sessions are
//! real (tokens are issued by `Login`, checked by every other call, and
//! dropped by `Logout`) so clients can be tested end to end.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use quick_xml::escape::escape;
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub password: String,
    pub full_name: String,
    pub description: String,
    pub email: String,
    pub dv_authentication: bool,
    pub web_access: bool,
    pub read_only: bool,
    pub license_type: String,
    pub group_ids: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug)]
pub struct Version {
    pub number: String,
    pub size: String,
    pub note: String,
    pub owner_id: String,
    pub created: String,
}

#[derive(Clone, Debug)]
pub struct File {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub description: String,
    pub doc_type: String,
    pub pages: String,
    pub owner_id: String,
    pub checked_out_by: Option<String>,
    pub profile: Option<(String, String)>,
    pub indexes: Vec<(String, String)>,
    pub versions: Vec<Version>,
    pub related: Vec<String>,
    pub notes: String,
    pub created: String,
    pub modified: String,
}

#[derive(Clone, Debug)]
pub struct Folder {
    pub id: String,
    pub parent_id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub owner_id: String,
    pub profile: Option<(String, String)>,
    pub indexes: Vec<(String, String)>,
    pub created: String,
    pub modified: String,
}

/// Server state: fixtures plus open sessions (token -> user id).
#[derive(Clone, Debug, Default)]
pub struct Db {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
    pub sessions: HashMap<String, String>,
}

pub type SharedDb = Arc<RwLock<Db>>;

/// Query parameters accepted by any endpoint; each endpoint reads its own.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    #[serde(rename = "UserName")]
    pub user_name: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
    #[serde(rename = "TokenID")]
    pub token_id: Option<String>,
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
    #[serde(rename = "EmailID")]
    pub email_id: Option<String>,
    #[serde(rename = "FileID")]
    pub file_id: Option<String>,
    #[serde(rename = "FolderID")]
    pub folder_id: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
}

pub const INVALID_TOKEN: &str = "Invalid Token ID.";
pub const INVALID_LOGIN: &str = "Invalid user name or password.";

pub fn app() -> Router {
    app_with(Db::seeded())
}

pub fn app_with(db: Db) -> Router {
    let db: SharedDb = Arc::new(RwLock::new(db));
    Router::new()
        .route("/DocsvaultAPI/Login", get(login))
        .route("/DocsvaultAPI/LoginPost", post(login_post))
        .route("/DocsvaultAPI/Logout", get(logout))
        .route("/DocsvaultAPI/GetLoginUserID", get(login_user_id))
        .route("/DocsvaultAPI/UserDetails/GetUserDetailsByName", get(user_by_name))
        .route("/DocsvaultAPI/UserDetails/GetUserDetailsByID", get(user_by_id))
        .route("/DocsvaultAPI/UserDetails/GetUserDetailsByEmailID", get(user_by_email))
        .route("/DocsvaultAPI/UserDetails/GetReadonlyUsers", get(readonly_users))
        .route("/DocsvaultAPI/UserDetails/GetWebAccessUsers", get(webaccess_users))
        .route("/DocsvaultAPI/UserDetails/GetUserGroup", get(user_groups))
        .route("/DocsvaultAPI/UserDetails/GetConnectedUsers", get(connected_users))
        .route("/DocsvaultAPI/FileDetails/GetFileDetailsByID", get(file_by_id))
        .route("/DocsvaultAPI/FileDetails/GetFileDetailsByLocation", get(file_by_location))
        .route("/DocsvaultAPI/FileDetails/GetFileProfile", get(file_profile))
        .route("/DocsvaultAPI/FileDetails/GetCheckedoutFilesByUser", get(checked_out_files))
        .route("/DocsvaultAPI/FileDetails/GetFileVersion", get(file_versions))
        .route("/DocsvaultAPI/FileDetails/GetFileRelations", get(file_relations))
        .route("/DocsvaultAPI/FolderDetails/GetFolderDetailsByID", get(folder_by_id))
        .route("/DocsvaultAPI/FolderDetails/GetFolderDetailsByLocation", get(folder_by_location))
        .route("/DocsvaultAPI/FolderDetails/GetFolderProfile", get(folder_profile))
        .route("/DocsvaultAPI/FolderDetails/GetFolderRelations", get(folder_relations))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- wire format ---

/// An XML envelope served with an XML content type.
#[derive(Debug)]
pub struct Xml(pub String);

impl IntoResponse for Xml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], self.0).into_response()
    }
}

/// `Ok` carries the inner XML of `<Result>`; `Err` the failure message.
type Reply = Result<String, String>;

pub fn success_envelope(result: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><Docsvault><Response><StatusCode>0</StatusCode>\
         <Message>Success</Message></Response><Result>{result}</Result></Docsvault>"
    )
}

pub fn failure_envelope(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><Docsvault><Response><StatusCode>1</StatusCode>\
         <Message>{}</Message></Response></Docsvault>",
        escape(message)
    )
}

fn respond(reply: Reply) -> Xml {
    match reply {
        Ok(result) => Xml(success_envelope(&result)),
        Err(message) => {
            tracing::debug!(%message, "rejecting call");
            Xml(failure_envelope(&message))
        }
    }
}

fn element(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("<{name}/>")
    } else {
        format!("<{name}>{}</{name}>", escape(value))
    }
}

fn record(name: &str, fields: &[(&str, &str)]) -> String {
    let body: String = fields.iter().map(|(k, v)| element(k, v)).collect();
    format!("<{name}>{body}</{name}>")
}

fn index_list(indexes: &[(String, String)]) -> String {
    let body: String = indexes
        .iter()
        .map(|(index, value)| record("Indexes", &[("Index", index.as_str()), ("IndexValue", value.as_str())]))
        .collect();
    format!("<ListOfIndexes>{body}</ListOfIndexes>")
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// --- lookups ---

impl Db {
    fn authorize(&self, params: &Params) -> Result<&User, String> {
        params
            .token_id
            .as_ref()
            .and_then(|token| self.sessions.get(token))
            .and_then(|user_id| self.user(user_id))
            .ok_or_else(|| INVALID_TOKEN.to_string())
    }

    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn user_name(&self, id: &str) -> &str {
        self.user(id).map(|u| u.full_name.as_str()).unwrap_or_default()
    }

    fn file(&self, id: &str) -> Result<&File, String> {
        self.files
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| "File not found.".to_string())
    }

    fn folder(&self, id: &str) -> Result<&Folder, String> {
        self.folders
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| "Folder not found.".to_string())
    }

    fn folder_location(&self, id: &str) -> &str {
        self.folder(id).map(|f| f.location.as_str()).unwrap_or_default()
    }

    fn user_xml(&self, user: &User, login_from: Option<&str>) -> String {
        let mut fields = vec![
            ("UserID", user.id.as_str()),
            ("UserName", user.name.as_str()),
            ("UserFullName", user.full_name.as_str()),
            ("UserDescription", user.description.as_str()),
            ("UserEmail", user.email.as_str()),
            ("DVAuthentication", flag(user.dv_authentication)),
            ("WebAccess", flag(user.web_access)),
        ];
        if let Some(from) = login_from {
            fields.push(("LoginFrom", from));
        }
        fields.push(("LicenseType", user.license_type.as_str()));
        record("UserDetail", &fields)
    }

    /// Full `FileDetail` record; `with_profile` adds doc notes, profile and
    /// indexes.
    fn file_xml(&self, file: &File, with_profile: bool) -> String {
        let latest = file.versions.last();
        let version_owner = latest.map(|v| v.owner_id.as_str()).unwrap_or_default();
        let checked_out_by = file.checked_out_by.as_deref().unwrap_or_default();
        let (profile_id, profile_name) = file
            .profile
            .as_ref()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .unwrap_or_default();

        let mut fields = vec![
            ("FileID", file.id.as_str()),
            ("ParentID", file.folder_id.as_str()),
            ("FileName", file.name.as_str()),
            ("Description", file.description.as_str()),
            ("FlagName", ""),
            ("FileSize", latest.map(|v| v.size.as_str()).unwrap_or_default()),
            ("DocType", file.doc_type.as_str()),
            ("Pages", file.pages.as_str()),
            ("Version", latest.map(|v| v.number.as_str()).unwrap_or_default()),
            ("VersionNote", latest.map(|v| v.note.as_str()).unwrap_or_default()),
            ("VersionOwner", version_owner),
            ("VersionOwnerName", self.user_name(version_owner)),
            ("ModifiedDate", file.modified.as_str()),
            ("CreatedDate", file.created.as_str()),
            ("AccessedDate", file.modified.as_str()),
            ("CheckedOut", flag(file.checked_out_by.is_some())),
            ("CheckedOutBy", checked_out_by),
            ("CheckedOutByName", self.user_name(checked_out_by)),
            ("OwnerID", file.owner_id.as_str()),
            ("OwnerName", self.user_name(&file.owner_id)),
            ("Location", self.folder_location(&file.folder_id)),
        ];
        if !with_profile {
            return record("FileDetail", &fields);
        }
        fields.extend([
            ("DocNotes", file.notes.as_str()),
            ("ProfileID", profile_id),
            ("ProfileName", profile_name),
        ]);
        let body: String = fields.iter().map(|(k, v)| element(k, v)).collect();
        format!("<FileDetail>{body}{}</FileDetail>", index_list(&file.indexes))
    }

    fn folder_xml(&self, folder: &Folder) -> String {
        let (profile_id, profile_name) = folder
            .profile
            .as_ref()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .unwrap_or_default();
        let has_child = self.folders.iter().any(|f| f.parent_id == folder.id);
        let fields = [
            ("FolderID", folder.id.as_str()),
            ("ParentID", folder.parent_id.as_str()),
            ("FolderName", folder.name.as_str()),
            ("Description", folder.description.as_str()),
            ("FlagName", ""),
            ("HasChild", flag(has_child)),
            ("ModifiedDate", folder.modified.as_str()),
            ("CreatedDate", folder.created.as_str()),
            ("AccessedDate", folder.modified.as_str()),
            ("CheckedOut", "false"),
            ("CheckedOutBy", ""),
            ("CheckedOutByName", ""),
            ("OwnerID", folder.owner_id.as_str()),
            ("OwnerName", self.user_name(&folder.owner_id)),
            ("Location", folder.location.as_str()),
            ("DocNotes", ""),
            ("ProfileID", profile_id),
            ("ProfileName", profile_name),
        ];
        let body: String = fields.iter().map(|(k, v)| element(k, v)).collect();
        format!("<FolderDetail>{body}{}</FolderDetail>", index_list(&folder.indexes))
    }
}

// --- handlers ---

async fn login(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    respond(open_session(&db, &p).await.map(|token| element("TokenID", token.as_str())))
}

async fn login_post(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    respond(open_session(&db, &p).await)
}

async fn open_session(db: &SharedDb, p: &Params) -> Reply {
    let mut db = db.write().await;
    let user_id = db
        .users
        .iter()
        .find(|u| Some(&u.name) == p.user_name.as_ref() && Some(&u.password) == p.password.as_ref())
        .map(|u| u.id.clone())
        .ok_or_else(|| INVALID_LOGIN.to_string())?;
    let token = Uuid::new_v4().to_string();
    db.sessions.insert(token.clone(), user_id);
    tracing::info!(user = ?p.user_name, "session opened");
    Ok(token)
}

async fn logout(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let mut db = db.write().await;
    let reply = match db.authorize(&p) {
        Ok(user) if Some(&user.name) == p.user_name.as_ref() => Ok(()),
        Ok(_) => Err("User name does not match Token ID.".to_string()),
        Err(e) => Err(e),
    };
    respond(reply.map(|()| {
        if let Some(token) = &p.token_id {
            db.sessions.remove(token);
        }
        String::new()
    }))
}

async fn login_user_id(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(db.authorize(&p).map(|user| element("UserID", user.id.as_str())))
}

async fn user_by_name(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(find_user(&db, &p, |u| Some(&u.name) == p.user_name.as_ref()))
}

async fn user_by_id(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(find_user(&db, &p, |u| Some(&u.id) == p.user_id.as_ref()))
}

async fn user_by_email(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(find_user(&db, &p, |u| Some(&u.email) == p.email_id.as_ref()))
}

fn find_user(db: &Db, p: &Params, matches: impl Fn(&User) -> bool) -> Reply {
    db.authorize(p)?;
    db.users
        .iter()
        .find(|u| matches(u))
        .map(|u| db.user_xml(u, None))
        .ok_or_else(|| "User not found.".to_string())
}

async fn readonly_users(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(list_users(&db, &p, |u| u.read_only))
}

async fn webaccess_users(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    respond(list_users(&db, &p, |u| u.web_access))
}

fn list_users(db: &Db, p: &Params, keep: impl Fn(&User) -> bool) -> Reply {
    db.authorize(p)?;
    Ok(db
        .users
        .iter()
        .filter(|u| keep(u))
        .map(|u| db.user_xml(u, None))
        .collect())
}

async fn user_groups(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let user = p
            .user_id
            .as_deref()
            .and_then(|id| db.user(id))
            .ok_or_else(|| "User not found.".to_string())?;
        Ok(db
            .groups
            .iter()
            .filter(|g| user.group_ids.contains(&g.id))
            .map(|g| {
                record(
                    "Group",
                    &[("GroupName", g.name.as_str()), ("GroupID", g.id.as_str()), ("Description", g.description.as_str())],
                )
            })
            .collect())
    });
    respond(reply)
}

async fn connected_users(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).map(|_| {
        let mut ids: Vec<&String> = db.sessions.values().collect();
        ids.sort();
        ids.dedup();
        ids.into_iter()
            .filter_map(|id| db.user(id))
            .map(|u| db.user_xml(u, Some("API")))
            .collect()
    });
    respond(reply)
}

async fn file_by_id(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let file = db.file(p.file_id.as_deref().unwrap_or_default())?;
        Ok(db.file_xml(file, true))
    });
    respond(reply)
}

async fn file_by_location(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let wanted = p.location.as_deref().unwrap_or_default();
        db.files
            .iter()
            .find(|f| format!("{}\\{}", db.folder_location(&f.folder_id), f.name) == wanted)
            .map(|f| db.file_xml(f, true))
            .ok_or_else(|| "File not found.".to_string())
    });
    respond(reply)
}

async fn file_profile(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let file = db.file(p.file_id.as_deref().unwrap_or_default())?;
        let profile_name = file.profile.as_ref().map(|(_, n)| n.as_str()).unwrap_or_default();
        let fields = [
            ("FlagName", ""),
            ("DocNotes", file.notes.as_str()),
            ("ProfileName", profile_name),
        ];
        let body: String = fields.iter().map(|(k, v)| element(k, v)).collect();
        Ok(format!("<FileDetail>{body}{}</FileDetail>", index_list(&file.indexes)))
    });
    respond(reply)
}

async fn checked_out_files(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).map(|_| {
        let by = p.user_id.as_deref().unwrap_or_default();
        db.files
            .iter()
            .filter(|f| match &f.checked_out_by {
                Some(user) => by.is_empty() || user == by,
                None => false,
            })
            .map(|f| db.file_xml(f, false))
            .collect()
    });
    respond(reply)
}

async fn file_versions(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let file = db.file(p.file_id.as_deref().unwrap_or_default())?;
        Ok(file
            .versions
            .iter()
            .map(|v| {
                record(
                    "FileDetail",
                    &[
                        ("FileSize", v.size.as_str()),
                        ("Version", v.number.as_str()),
                        ("VersionNote", v.note.as_str()),
                        ("VersionOwner", v.owner_id.as_str()),
                        ("VersionOwnerName", db.user_name(&v.owner_id)),
                        ("CreatedDate", v.created.as_str()),
                        ("VersionNotes", v.note.as_str()),
                    ],
                )
            })
            .collect())
    });
    respond(reply)
}

async fn file_relations(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let file = db.file(p.file_id.as_deref().unwrap_or_default())?;
        Ok(file
            .related
            .iter()
            .filter_map(|id| db.file(id).ok())
            .map(|f| {
                record(
                    "FileDetail",
                    &[
                        ("FileID", f.id.as_str()),
                        ("Description", f.description.as_str()),
                        ("Location", db.folder_location(&f.folder_id)),
                    ],
                )
            })
            .collect())
    });
    respond(reply)
}

async fn folder_by_id(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let folder = db.folder(p.folder_id.as_deref().unwrap_or_default())?;
        Ok(db.folder_xml(folder))
    });
    respond(reply)
}

async fn folder_by_location(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        db.folders
            .iter()
            .find(|f| Some(&f.location) == p.location.as_ref())
            .map(|f| db.folder_xml(f))
            .ok_or_else(|| "Folder not found.".to_string())
    });
    respond(reply)
}

async fn folder_profile(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let folder = db.folder(p.folder_id.as_deref().unwrap_or_default())?;
        let profile_name = folder.profile.as_ref().map(|(_, n)| n.as_str()).unwrap_or_default();
        Ok(format!(
            "<FolderDetail>{}{}{}{}</FolderDetail>",
            element("FlagName", ""),
            element("DocNotes", ""),
            element("ProfileName", profile_name),
            index_list(&folder.indexes)
        ))
    });
    respond(reply)
}

async fn folder_relations(State(db): State<SharedDb>, Query(p): Query<Params>) -> Xml {
    let db = db.read().await;
    let reply: Reply = db.authorize(&p).and_then(|_| {
        let folder = db.folder(p.folder_id.as_deref().unwrap_or_default())?;
        let docs: String = db
            .files
            .iter()
            .filter(|f| f.folder_id == folder.id)
            .map(|f| {
                let latest = f.versions.last();
                let extension = f.name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
                record(
                    "Doc",
                    &[
                        ("DocID", f.id.as_str()),
                        ("DocName", f.name.as_str()),
                        ("DocType", f.doc_type.as_str()),
                        ("Version", latest.map(|v| v.number.as_str()).unwrap_or_default()),
                        ("FolderID", folder.id.as_str()),
                        ("FolderName", folder.name.as_str()),
                        ("Location", folder.location.as_str()),
                        ("ModifiedDate", f.modified.as_str()),
                        ("CreatedDate", f.created.as_str()),
                        ("Size", latest.map(|v| v.size.as_str()).unwrap_or_default()),
                        ("Extension", extension),
                        ("Pages", f.pages.as_str()),
                        ("OwnerID", f.owner_id.as_str()),
                        ("OwnerName", db.user_name(&f.owner_id)),
                    ],
                )
            })
            .collect();
        Ok(format!("<RelatedDocs>{docs}</RelatedDocs>"))
    });
    respond(reply)
}

// --- fixtures ---

fn s(value: &str) -> String {
    value.to_string()
}

impl Db {
    /// Three users, three groups, two folders and two files.
    ///
    /// - `admin` / `admin` (ID 1): Administrators and Everyone.
    /// - `alee` / `s3cret` (ID 2): read-only, web access, Everyone.
    /// - `bkim` / `pass` (ID 3): Finance and Everyone, no web access.
    /// - `Finance` (ID 1) contains `Invoices` (ID 10).
    /// - `invoice.pdf` (ID 101, two versions, checked out by `alee`) and
    ///   `contract.docx` (ID 102), both in `Finance\Invoices`.
    pub fn seeded() -> Self {
        let users = vec![
            User {
                id: s("1"),
                name: s("admin"),
                password: s("admin"),
                full_name: s("Administrator"),
                description: s("Built-in administrator"),
                email: s("admin@example.com"),
                dv_authentication: true,
                web_access: true,
                read_only: false,
                license_type: s("Full"),
                group_ids: vec![s("1"), s("2")],
            },
            User {
                id: s("2"),
                name: s("alee"),
                password: s("s3cret"),
                full_name: s("Ann Lee"),
                description: s(""),
                email: s("ann@example.com"),
                dv_authentication: true,
                web_access: true,
                read_only: true,
                license_type: s("ReadOnly"),
                group_ids: vec![s("2")],
            },
            User {
                id: s("3"),
                name: s("bkim"),
                password: s("pass"),
                full_name: s("Bo Kim"),
                description: s("Accounts payable"),
                email: s("bo@example.com"),
                dv_authentication: false,
                web_access: false,
                read_only: false,
                license_type: s("Full"),
                group_ids: vec![s("3"), s("2")],
            },
        ];
        let groups = vec![
            Group {
                id: s("1"),
                name: s("Administrators"),
                description: s("Full control"),
            },
            Group {
                id: s("2"),
                name: s("Everyone"),
                description: s(""),
            },
            Group {
                id: s("3"),
                name: s("Finance"),
                description: s("Finance department"),
            },
        ];
        let folders = vec![
            Folder {
                id: s("1"),
                parent_id: s("0"),
                name: s("Finance"),
                location: s("Finance"),
                description: s("Finance cabinet"),
                owner_id: s("1"),
                profile: None,
                indexes: Vec::new(),
                created: s("2023-01-02"),
                modified: s("2023-01-02"),
            },
            Folder {
                id: s("10"),
                parent_id: s("1"),
                name: s("Invoices"),
                location: s("Finance\\Invoices"),
                description: s("Supplier invoices"),
                owner_id: s("3"),
                profile: Some((s("4"), s("Yearly"))),
                indexes: vec![(s("Year"), s("2023"))],
                created: s("2023-01-03"),
                modified: s("2023-03-02"),
            },
        ];
        let files = vec![
            File {
                id: s("101"),
                folder_id: s("10"),
                name: s("invoice.pdf"),
                description: s("March invoice"),
                doc_type: s("PDF"),
                pages: s("3"),
                owner_id: s("3"),
                checked_out_by: Some(s("2")),
                profile: Some((s("3"), s("Invoice"))),
                indexes: vec![(s("Vendor"), s("Acme & Sons")), (s("Amount"), s("120.00"))],
                versions: vec![
                    Version {
                        number: s("1"),
                        size: s("1024"),
                        note: s("initial scan"),
                        owner_id: s("3"),
                        created: s("2023-03-01"),
                    },
                    Version {
                        number: s("2"),
                        size: s("2048"),
                        note: s("fixed total"),
                        owner_id: s("3"),
                        created: s("2023-03-02"),
                    },
                ],
                related: vec![s("102")],
                notes: s(""),
                created: s("2023-03-01"),
                modified: s("2023-03-02"),
            },
            File {
                id: s("102"),
                folder_id: s("10"),
                name: s("contract.docx"),
                description: s("Supply contract"),
                doc_type: s("Word"),
                pages: s("12"),
                owner_id: s("1"),
                checked_out_by: None,
                profile: None,
                indexes: Vec::new(),
                versions: vec![Version {
                    number: s("1"),
                    size: s("40960"),
                    note: s(""),
                    owner_id: s("1"),
                    created: s("2023-02-10"),
                }],
                related: Vec::new(),
                notes: s("Renewal due in December"),
                created: s("2023-02-10"),
                modified: s("2023-02-10"),
            },
        ];
        Self {
            users,
            groups,
            files,
            folders,
            sessions: HashMap::new(),
        }
    }

    /// Seeded data with one session already open for `user_id`.
    pub fn with_session(mut self, token: &str, user_id: &str) -> Self {
        self.sessions.insert(token.to_string(), user_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_render_as_empty_elements() {
        assert_eq!(element("FlagName", ""), "<FlagName/>");
        assert_eq!(element("Index", "A & B"), "<Index>A &amp; B</Index>");
    }

    #[test]
    fn failure_envelope_escapes_message() {
        let xml = failure_envelope("bad <creds>");
        assert!(xml.contains("<StatusCode>1</StatusCode>"));
        assert!(xml.contains("<Message>bad &lt;creds&gt;</Message>"));
        assert!(!xml.contains("<Result>"));
    }

    #[test]
    fn authorize_requires_open_session() {
        let db = Db::seeded().with_session("tok", "2");
        let ok = Params {
            token_id: Some(s("tok")),
            ..Params::default()
        };
        assert_eq!(db.authorize(&ok).unwrap().name, "alee");

        let bad = Params {
            token_id: Some(s("nope")),
            ..Params::default()
        };
        assert_eq!(db.authorize(&bad).unwrap_err(), INVALID_TOKEN);
        assert!(db.authorize(&Params::default()).is_err());
    }

    #[test]
    fn file_xml_with_profile_lists_indexes_last() {
        let db = Db::seeded();
        let xml = db.file_xml(db.file("101").unwrap(), true);
        assert!(xml.starts_with("<FileDetail><FileID>101</FileID>"));
        assert!(xml.contains("<CheckedOut>true</CheckedOut><CheckedOutBy>2</CheckedOutBy>"));
        assert!(xml.contains("<Index>Vendor</Index><IndexValue>Acme &amp; Sons</IndexValue>"));
        assert!(xml.ends_with("</ListOfIndexes></FileDetail>"));
    }

    #[test]
    fn file_xml_without_profile_stops_at_location() {
        let db = Db::seeded();
        let xml = db.file_xml(db.file("101").unwrap(), false);
        assert!(xml.ends_with("<Location>Finance\\Invoices</Location></FileDetail>"));
        assert!(!xml.contains("ListOfIndexes"));
    }

    #[test]
    fn folder_has_child_reflects_tree() {
        let db = Db::seeded();
        assert!(db.folder_xml(db.folder("1").unwrap()).contains("<HasChild>true</HasChild>"));
        assert!(db.folder_xml(db.folder("10").unwrap()).contains("<HasChild>false</HasChild>"));
    }
}
