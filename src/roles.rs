//! Roles and the static role→permission table.
//!
//! The portal has a fixed, small set of roles. Each role maps to an
//! immutable permission set baked in at compile time; a user's effective
//! permissions are always exactly the set for their role, never a
//! customized subset or superset.

use serde::{Deserialize, Serialize};

/// A role assignable to a portal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Owner,
    User,
}

/// An atomic named capability checked before allowing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageSystem,
    ManageOrganizations,
    ManageOrganization,
    ManageAdmins,
    ManageUsers,
    CreateSurveys,
    EditSurveys,
    DeleteSurveys,
    ViewSurveys,
    PublishSurveys,
    SubmitResponses,
    ViewResponses,
    DeleteResponses,
    ViewAnalytics,
    ExportData,
    SendInvites,
    ManageClients,
    ViewClients,
    ManageProjects,
    ViewProjects,
}

const SUPER_ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ManageSystem,
    Permission::ManageOrganizations,
    Permission::ManageAdmins,
    Permission::ManageUsers,
    Permission::CreateSurveys,
    Permission::EditSurveys,
    Permission::DeleteSurveys,
    Permission::ViewSurveys,
    Permission::PublishSurveys,
    Permission::ViewResponses,
    Permission::DeleteResponses,
    Permission::ViewAnalytics,
    Permission::ExportData,
    Permission::SendInvites,
    Permission::ManageClients,
    Permission::ViewClients,
    Permission::ManageProjects,
    Permission::ViewProjects,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ManageOrganization,
    Permission::ManageUsers,
    Permission::CreateSurveys,
    Permission::EditSurveys,
    Permission::DeleteSurveys,
    Permission::ViewSurveys,
    Permission::PublishSurveys,
    Permission::ViewResponses,
    Permission::ViewAnalytics,
    Permission::ExportData,
    Permission::SendInvites,
    Permission::ManageClients,
    Permission::ViewClients,
    Permission::ManageProjects,
    Permission::ViewProjects,
];

const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::CreateSurveys,
    Permission::EditSurveys,
    Permission::ViewSurveys,
    Permission::PublishSurveys,
    Permission::ViewResponses,
    Permission::ViewAnalytics,
    Permission::ExportData,
    Permission::ViewClients,
    Permission::ViewProjects,
];

const USER_PERMISSIONS: &[Permission] = &[Permission::ViewSurveys, Permission::SubmitResponses];

impl Role {
    /// The fixed permission set for this role.
    ///
    /// There is no inheritance logic; each role's set is enumerated
    /// explicitly and never mutated at runtime.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
            Self::Admin => ADMIN_PERMISSIONS,
            Self::Owner => OWNER_PERMISSIONS,
            Self::User => USER_PERMISSIONS,
        }
    }

    /// Whether this role's set contains `permission`.
    #[must_use]
    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// Convert to string for database storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::User => "user",
        }
    }

    /// Parse from database string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// All roles, most to least privileged.
    pub const ALL: [Role; 4] = [Self::SuperAdmin, Self::Admin, Self::Owner, Self::User];
}

impl Permission {
    /// Convert to string for database storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManageSystem => "manage_system",
            Self::ManageOrganizations => "manage_organizations",
            Self::ManageOrganization => "manage_organization",
            Self::ManageAdmins => "manage_admins",
            Self::ManageUsers => "manage_users",
            Self::CreateSurveys => "create_surveys",
            Self::EditSurveys => "edit_surveys",
            Self::DeleteSurveys => "delete_surveys",
            Self::ViewSurveys => "view_surveys",
            Self::PublishSurveys => "publish_surveys",
            Self::SubmitResponses => "submit_responses",
            Self::ViewResponses => "view_responses",
            Self::DeleteResponses => "delete_responses",
            Self::ViewAnalytics => "view_analytics",
            Self::ExportData => "export_data",
            Self::SendInvites => "send_invites",
            Self::ManageClients => "manage_clients",
            Self::ViewClients => "view_clients",
            Self::ManageProjects => "manage_projects",
            Self::ViewProjects => "view_projects",
        }
    }

    /// Parse from database string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manage_system" => Some(Self::ManageSystem),
            "manage_organizations" => Some(Self::ManageOrganizations),
            "manage_organization" => Some(Self::ManageOrganization),
            "manage_admins" => Some(Self::ManageAdmins),
            "manage_users" => Some(Self::ManageUsers),
            "create_surveys" => Some(Self::CreateSurveys),
            "edit_surveys" => Some(Self::EditSurveys),
            "delete_surveys" => Some(Self::DeleteSurveys),
            "view_surveys" => Some(Self::ViewSurveys),
            "publish_surveys" => Some(Self::PublishSurveys),
            "submit_responses" => Some(Self::SubmitResponses),
            "view_responses" => Some(Self::ViewResponses),
            "delete_responses" => Some(Self::DeleteResponses),
            "view_analytics" => Some(Self::ViewAnalytics),
            "export_data" => Some(Self::ExportData),
            "send_invites" => Some(Self::SendInvites),
            "manage_clients" => Some(Self::ManageClients),
            "view_clients" => Some(Self::ViewClients),
            "manage_projects" => Some(Self::ManageProjects),
            "view_projects" => Some(Self::ViewProjects),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert!(Role::from_str("moderator").is_none());
        assert!(Role::from_str("").is_none());
    }

    #[test]
    fn test_permission_roundtrip() {
        for role in Role::ALL {
            for &perm in role.permissions() {
                assert_eq!(Permission::from_str(perm.as_str()), Some(perm));
            }
        }
        assert!(Permission::from_str("fly_to_the_moon").is_none());
    }

    #[test]
    fn test_super_admin_table() {
        let role = Role::SuperAdmin;
        assert!(role.grants(Permission::ManageSystem));
        assert!(role.grants(Permission::ManageOrganizations));
        assert!(role.grants(Permission::ManageAdmins));
        assert!(role.grants(Permission::DeleteResponses));
        assert!(role.grants(Permission::SendInvites));
        // org-scoped management belongs to admin, system-wide to super_admin
        assert!(!role.grants(Permission::ManageOrganization));
        assert!(!role.grants(Permission::SubmitResponses));
    }

    #[test]
    fn test_admin_table() {
        let role = Role::Admin;
        assert!(role.grants(Permission::ManageOrganization));
        assert!(role.grants(Permission::ManageUsers));
        assert!(role.grants(Permission::DeleteSurveys));
        assert!(role.grants(Permission::SendInvites));
        assert!(role.grants(Permission::ManageClients));
        assert!(!role.grants(Permission::ManageSystem));
        assert!(!role.grants(Permission::DeleteResponses));
    }

    #[test]
    fn test_owner_table() {
        let role = Role::Owner;
        assert!(role.grants(Permission::CreateSurveys));
        assert!(role.grants(Permission::PublishSurveys));
        assert!(role.grants(Permission::ViewAnalytics));
        assert!(role.grants(Permission::ExportData));
        assert!(role.grants(Permission::ViewClients));
        assert!(!role.grants(Permission::DeleteSurveys));
        assert!(!role.grants(Permission::ManageUsers));
        assert!(!role.grants(Permission::SendInvites));
        assert!(!role.grants(Permission::ManageClients));
    }

    #[test]
    fn test_user_table() {
        let role = Role::User;
        assert_eq!(
            role.permissions(),
            &[Permission::ViewSurveys, Permission::SubmitResponses]
        );
        assert!(!role.grants(Permission::ViewResponses));
        assert!(!role.grants(Permission::ViewAnalytics));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
        let json = serde_json::to_string(&Permission::ViewAnalytics).unwrap();
        assert_eq!(json, "\"view_analytics\"");

        let role: Role = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, Role::Owner);
    }
}
