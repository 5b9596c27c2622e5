use crate::config::Config;
use crate::core_network::ControlChannel;
use crate::users::Permission;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Login progress of one control connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AwaitingPassword {
        username: String,
    },
    Authenticated {
        username: String,
        permission: Permission,
    },
}

/// Per-connection server state.
///
/// Owned by the task serving the connection and never shared, so none of
/// these fields need a lock.
#[derive(Debug)]
pub struct Session {
    pub control: ControlChannel,
    pub config: Arc<Config>,
    pub auth: AuthState,
    pub current_dir: String,             // Virtual path, always rooted at "/"
    pub rename_from: Option<PathBuf>,    // Real path recorded by RNFR
    pub pasv_listener: Option<TcpListener>, // Bound but not yet accepted
    pub type_: String,
}

impl Session {
    pub fn new(control: ControlChannel, config: Arc<Config>) -> Self {
        Self {
            control,
            config,
            auth: AuthState::Unauthenticated,
            current_dir: String::from("/"),
            rename_from: None,
            pasv_listener: None,
            type_: "I".to_string(), // Only binary transfers exist
        }
    }

    pub fn root(&self) -> &Path {
        &self.config.server.root_dir
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.auth {
            AuthState::Unauthenticated => None,
            AuthState::AwaitingPassword { username }
            | AuthState::Authenticated { username, .. } => Some(username),
        }
    }

    pub fn permission(&self) -> Option<Permission> {
        match self.auth {
            AuthState::Authenticated { permission, .. } => Some(permission),
            _ => None,
        }
    }
}
