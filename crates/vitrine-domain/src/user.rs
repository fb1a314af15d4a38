//! User roles, permissions, and identity providers.

use serde::{Deserialize, Serialize};

/// User access level.
///
/// Wire format: `u8` (0 = User, 1 = Admin). Admin is the only elevated role;
/// there is no moderator tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The static permission set granted to this role.
    ///
    /// The mapping is exact: admin permissions cover the management surface,
    /// user permissions cover the self-service surface. Membership is checked
    /// with [`UserRole::has_permission`]; there is no inheritance between roles.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Self::Admin => &[
                Permission::ManageUsers,
                Permission::ManageContent,
                Permission::ViewAnalytics,
                Permission::SystemSettings,
                Permission::DeleteContent,
            ],
            Self::User => &[
                Permission::ViewDashboard,
                Permission::ViewProfile,
                Permission::EditProfile,
            ],
        }
    }

    pub fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

/// A single grantable capability. Pure data; enforcement happens in handlers
/// and the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ManageContent,
    ViewAnalytics,
    SystemSettings,
    DeleteContent,
    ViewDashboard,
    ViewProfile,
    EditProfile,
}

/// Identity source for a user account.
///
/// `Credentials` accounts carry a password hash; OAuth accounts never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Credentials,
    Google,
    Github,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Google => "google",
            Self::Github => "github",
        }
    }

    /// Parse a stored provider tag. Returns `None` for unknown tags.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        match s {
            "credentials" => Some(Self::Credentials),
            "google" => Some(Self::Google),
            "github" => Some(Self::Github),
            _ => None,
        }
    }
}
