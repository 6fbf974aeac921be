//! Static descriptors for every Docsvault endpoint.
//!
//! An `Operation` is everything `DocsvaultClient::invoke` needs to know about
//! an endpoint apart from its parameters: where it lives, which verb it uses,
//! how its failures are labelled, and how its status code is read.

use crate::http::HttpMethod;

/// How an operation reads `Response/StatusCode`.
///
/// The session endpoints treat only `"1"` as failure, so an envelope with no
/// status at all passes. The detail endpoints treat only `"0"` as success, so
/// a missing status fails. Both readings are kept per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    FailsOnOne,
    SucceedsOnZero,
}

impl StatusCheck {
    pub fn is_success(self, status_code: Option<&str>) -> bool {
        match self {
            StatusCheck::FailsOnOne => status_code != Some("1"),
            StatusCheck::SucceedsOnZero => status_code == Some("0"),
        }
    }
}

/// One remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Path under `/DocsvaultAPI/`, e.g. `UserDetails/GetUserDetailsByID`.
    pub action: String,
    pub method: HttpMethod,
    /// Sentence prefixed to application errors, e.g. `Login failed.`.
    pub label: String,
    pub status_check: StatusCheck,
}

impl Operation {
    /// Descriptor for an endpoint without a typed wrapper. Failures are
    /// labelled `"<action> failed."` and only status `"1"` counts as failure.
    pub fn custom(action: &str, method: HttpMethod) -> Self {
        Self {
            action: action.to_string(),
            method,
            label: format!("{action} failed."),
            status_check: StatusCheck::FailsOnOne,
        }
    }

    /// Last path segment of the action, used in transport error messages.
    pub fn name(&self) -> &str {
        self.action.rsplit('/').next().unwrap_or(&self.action)
    }
}

macro_rules! operations {
    ($($ident:ident => ($action:literal, $method:ident, $label:literal, $check:ident);)*) => {
        /// Every endpoint with a typed wrapper on `DocsvaultClient`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Endpoint {
            $($ident,)*
        }

        impl Endpoint {
            pub const ALL: &'static [Endpoint] = &[$(Endpoint::$ident,)*];

            pub fn action(self) -> &'static str {
                match self {
                    $(Endpoint::$ident => $action,)*
                }
            }

            pub fn method(self) -> HttpMethod {
                match self {
                    $(Endpoint::$ident => HttpMethod::$method,)*
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Endpoint::$ident => $label,)*
                }
            }

            pub fn status_check(self) -> StatusCheck {
                match self {
                    $(Endpoint::$ident => StatusCheck::$check,)*
                }
            }

            pub fn operation(self) -> Operation {
                Operation {
                    action: self.action().to_string(),
                    method: self.method(),
                    label: self.label().to_string(),
                    status_check: self.status_check(),
                }
            }

            /// Look an endpoint up by its action path.
            pub fn from_action(action: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|e| e.action() == action)
            }
        }
    };
}

operations! {
    Login => ("Login", Get, "Login failed.", FailsOnOne);
    LoginPost => ("LoginPost", Post, "Login failed.", FailsOnOne);
    Logout => ("Logout", Get, "Logout failed.", FailsOnOne);
    GetLoginUserId => ("GetLoginUserID", Get, "GetLoginUserID failed.", FailsOnOne);

    GetUserDetailsByName => ("UserDetails/GetUserDetailsByName", Get, "Could not get user details.", SucceedsOnZero);
    GetUserDetailsById => ("UserDetails/GetUserDetailsByID", Get, "Could not get user details.", SucceedsOnZero);
    GetUserDetailsByEmail => ("UserDetails/GetUserDetailsByEmailID", Get, "Could not get user details.", SucceedsOnZero);
    GetReadonlyUsers => ("UserDetails/GetReadonlyUsers", Get, "Could not get readonly users.", SucceedsOnZero);
    GetWebAccessUsers => ("UserDetails/GetWebAccessUsers", Get, "Could not get Web Access users.", SucceedsOnZero);
    GetUserGroups => ("UserDetails/GetUserGroup", Get, "Could not get user groups.", SucceedsOnZero);
    GetConnectedUsers => ("UserDetails/GetConnectedUsers", Get, "Could not get connected users.", SucceedsOnZero);

    GetFileDetailsById => ("FileDetails/GetFileDetailsByID", Get, "Could not get file details.", SucceedsOnZero);
    GetFileDetailsByLocation => ("FileDetails/GetFileDetailsByLocation", Get, "Could not get file details.", SucceedsOnZero);
    GetFileProfile => ("FileDetails/GetFileProfile", Get, "Could not get file profile.", SucceedsOnZero);
    GetCheckedOutFilesByUser => ("FileDetails/GetCheckedoutFilesByUser", Get, "Could not get checked out files.", SucceedsOnZero);
    GetFileVersions => ("FileDetails/GetFileVersion", Get, "Could not get file versions.", SucceedsOnZero);
    GetFileRelations => ("FileDetails/GetFileRelations", Get, "Could not get related documents.", SucceedsOnZero);

    GetFolderDetailsById => ("FolderDetails/GetFolderDetailsByID", Get, "Could not get folder details.", SucceedsOnZero);
    GetFolderDetailsByLocation => ("FolderDetails/GetFolderDetailsByLocation", Get, "Could not get folder details.", SucceedsOnZero);
    GetFolderProfile => ("FolderDetails/GetFolderProfile", Get, "Could not get folder profile.", SucceedsOnZero);
    GetFolderRelations => ("FolderDetails/GetFolderRelations", Get, "Could not get related documents.", SucceedsOnZero);
}

impl From<Endpoint> for Operation {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.operation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_differs_on_missing_status() {
        assert!(StatusCheck::FailsOnOne.is_success(None));
        assert!(StatusCheck::FailsOnOne.is_success(Some("0")));
        assert!(!StatusCheck::FailsOnOne.is_success(Some("1")));

        assert!(!StatusCheck::SucceedsOnZero.is_success(None));
        assert!(StatusCheck::SucceedsOnZero.is_success(Some("0")));
        assert!(!StatusCheck::SucceedsOnZero.is_success(Some("1")));
        assert!(!StatusCheck::SucceedsOnZero.is_success(Some("2")));
    }

    #[test]
    fn custom_operation_labels_with_action() {
        let op = Operation::custom("Login", HttpMethod::Get);
        assert_eq!(op.label, "Login failed.");
        assert_eq!(op.name(), "Login");
        assert_eq!(op, Endpoint::Login.operation());
    }

    #[test]
    fn name_is_last_action_segment() {
        assert_eq!(Endpoint::GetUserGroups.operation().name(), "GetUserGroup");
    }

    #[test]
    fn only_login_post_uses_post() {
        let posts: Vec<_> = Endpoint::ALL
            .iter()
            .filter(|e| e.method() == HttpMethod::Post)
            .collect();
        assert_eq!(posts, vec![&Endpoint::LoginPost]);
    }

    #[test]
    fn actions_are_unique_and_resolvable() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_action(endpoint.action()), Some(*endpoint));
        }
        assert_eq!(Endpoint::from_action("Nope"), None);
    }
}
