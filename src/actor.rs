//! The caller identity and its capability queries.
//!
//! An [`Actor`] is the value an authentication layer hands to the
//! authorization checks. Absent sessions and anonymous sign-ins both map
//! to [`Actor::Anonymous`], so every query below is an exhaustive match
//! with deny as the anonymous arm — there is no null-guard chain to get
//! wrong, and no query ever errors.

use serde::{Deserialize, Serialize};

use crate::roles::{Permission, Role};

/// The identity a request acts as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// No session, or an anonymous (guest) session. Always denied.
    Anonymous,
    /// A signed-in portal user.
    Authenticated {
        /// Stable user identifier from the authentication collaborator.
        uid: String,
        /// The user's email address.
        email: String,
        /// The user's role; the permission set derives from this alone.
        role: Role,
        /// The organization the user belongs to, if any.
        organization_id: Option<String>,
    },
}

/// One entry in the portal navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const NAV_PUBLIC_SURVEYS: NavItem = NavItem {
    label: "Surveys",
    path: "/surveys",
};
const NAV_DASHBOARD: NavItem = NavItem {
    label: "Dashboard",
    path: "/dashboard",
};
const NAV_MANAGE_SURVEYS: NavItem = NavItem {
    label: "Manage Surveys",
    path: "/surveys/manage",
};
const NAV_ANALYTICS: NavItem = NavItem {
    label: "Analytics",
    path: "/analytics",
};
const NAV_USERS: NavItem = NavItem {
    label: "Users",
    path: "/users",
};
const NAV_CLIENTS: NavItem = NavItem {
    label: "Clients",
    path: "/clients",
};
const NAV_PROJECTS: NavItem = NavItem {
    label: "Projects",
    path: "/projects",
};
const NAV_SYSTEM: NavItem = NavItem {
    label: "System",
    path: "/system",
};

impl Actor {
    /// Builds an authenticated actor.
    #[must_use]
    pub fn authenticated(
        uid: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        organization_id: Option<&str>,
    ) -> Self {
        Self::Authenticated {
            uid: uid.into(),
            email: email.into(),
            role,
            organization_id: organization_id.map(str::to_owned),
        }
    }

    /// The actor's role, if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { role, .. } => Some(*role),
        }
    }

    /// The actor's organization, if authenticated and assigned to one.
    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated {
                organization_id, ..
            } => organization_id.as_deref(),
        }
    }

    /// True iff the actor's role grants `permission`. Anonymous actors are
    /// always denied.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Authenticated { role, .. } => role.grants(permission),
        }
    }

    /// True iff at least one of `permissions` is granted.
    #[must_use]
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|&p| self.has_permission(p))
    }

    /// True iff every permission in `permissions` is granted.
    ///
    /// An empty list is vacuously satisfied, but only for authenticated
    /// actors; anonymous actors stay denied.
    #[must_use]
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Authenticated { .. } => permissions.iter().all(|&p| self.has_permission(p)),
        }
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role() == Some(Role::SuperAdmin)
    }

    /// True for `admin` and `super_admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some(Role::Admin | Role::SuperAdmin))
    }

    /// True for `owner` and anyone satisfying [`is_admin`](Self::is_admin).
    #[must_use]
    pub fn is_owner(&self) -> bool {
        matches!(self.role(), Some(Role::Owner)) || self.is_admin()
    }

    #[must_use]
    pub fn can_access_admin_panel(&self) -> bool {
        self.is_owner()
    }

    #[must_use]
    pub fn can_manage_users(&self) -> bool {
        self.has_permission(Permission::ManageUsers)
    }

    /// True if the actor can create, edit or delete surveys.
    #[must_use]
    pub fn can_manage_surveys(&self) -> bool {
        self.has_any_permission(&[
            Permission::CreateSurveys,
            Permission::EditSurveys,
            Permission::DeleteSurveys,
        ])
    }

    #[must_use]
    pub fn can_view_analytics(&self) -> bool {
        self.has_permission(Permission::ViewAnalytics)
    }

    #[must_use]
    pub fn can_send_invites(&self) -> bool {
        self.has_permission(Permission::SendInvites)
    }

    /// Navigation entries this actor may see, in fixed priority order.
    ///
    /// Anonymous actors get exactly the one public entry. Authenticated
    /// actors get the dashboard plus entries gated by the capability
    /// predicates above.
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        if matches!(self, Self::Anonymous) {
            return vec![NAV_PUBLIC_SURVEYS];
        }

        let mut items = vec![NAV_DASHBOARD];
        if self.can_manage_surveys() {
            items.push(NAV_MANAGE_SURVEYS);
        }
        if self.can_view_analytics() {
            items.push(NAV_ANALYTICS);
        }
        if self.can_manage_users() {
            items.push(NAV_USERS);
        }
        if self.is_admin() {
            items.push(NAV_CLIENTS);
            items.push(NAV_PROJECTS);
        }
        if self.is_super_admin() {
            items.push(NAV_SYSTEM);
        }
        items
    }
}
