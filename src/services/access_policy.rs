// src/services/access_policy.rs

//! Role-based access decisions.
//!
//! Every handler reaches this module through the extractors in
//! `middleware::access`; no other code compares roles.

use crate::models::auth::{Role, User};

/// What the caller is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Platform scope
    ListOrganizations,
    CreateOrganization,
    ViewPlatformAnalytics,

    // Organization scope
    ReadOrganization,
    UpdateOrganization,
    ReadTenantData,
    WriteTenantData,
}

impl Action {
    pub fn is_platform_scoped(self) -> bool {
        matches!(
            self,
            Action::ListOrganizations | Action::CreateOrganization | Action::ViewPlatformAnalytics
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Decides whether `role`, belonging to `caller_org`, may perform `action`
/// on `target_org` (`None` for platform-scoped actions).
pub fn evaluate(
    role: Role,
    caller_org: Option<i64>,
    target_org: Option<i64>,
    action: Action,
) -> Decision {
    // 1. The platform owner administers every tenant.
    if role == Role::PlatformOwner {
        return Decision::Allow;
    }

    // 2. Platform-wide actions belong to the platform owner alone.
    if action.is_platform_scoped() {
        return Decision::Deny;
    }

    // 3. Tenant roles never cross organization boundaries.
    match (caller_org, target_org) {
        (Some(own), Some(target)) if own == target => {}
        _ => return Decision::Deny,
    }

    // 4. Only the org admin edits the organization record itself.
    if action == Action::UpdateOrganization && role != Role::OrgAdmin {
        return Decision::Deny;
    }

    Decision::Allow
}

/// Convenience wrapper over [`evaluate`] for a loaded user.
pub fn authorize(user: &User, target_org: Option<i64>, action: Action) -> Decision {
    evaluate(user.role, user.organization_id, target_org, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENANT_ROLES: [Role; 3] = [Role::OrgAdmin, Role::OrgManager, Role::OrgSupport];
    const ORG_ACTIONS: [Action; 4] = [
        Action::ReadOrganization,
        Action::UpdateOrganization,
        Action::ReadTenantData,
        Action::WriteTenantData,
    ];
    const PLATFORM_ACTIONS: [Action; 3] = [
        Action::ListOrganizations,
        Action::CreateOrganization,
        Action::ViewPlatformAnalytics,
    ];

    #[test]
    fn platform_owner_is_allowed_everything() {
        for action in ORG_ACTIONS {
            assert_eq!(evaluate(Role::PlatformOwner, None, Some(42), action), Decision::Allow);
        }
        for action in PLATFORM_ACTIONS {
            assert_eq!(evaluate(Role::PlatformOwner, None, None, action), Decision::Allow);
        }
    }

    #[test]
    fn tenant_roles_are_denied_on_other_organizations() {
        for role in TENANT_ROLES {
            for action in ORG_ACTIONS {
                assert_eq!(
                    evaluate(role, Some(1), Some(2), action),
                    Decision::Deny,
                    "{role:?} on foreign org for {action:?}"
                );
            }
        }
    }

    #[test]
    fn tenant_roles_are_denied_platform_actions_even_on_own_org() {
        for role in TENANT_ROLES {
            for action in PLATFORM_ACTIONS {
                assert_eq!(evaluate(role, Some(1), None, action), Decision::Deny);
                assert_eq!(evaluate(role, Some(1), Some(1), action), Decision::Deny);
            }
        }
    }

    #[test]
    fn tenant_roles_read_and_write_their_own_data() {
        for role in TENANT_ROLES {
            for action in [Action::ReadOrganization, Action::ReadTenantData, Action::WriteTenantData] {
                assert_eq!(evaluate(role, Some(7), Some(7), action), Decision::Allow);
            }
        }
    }

    #[test]
    fn only_org_admin_updates_the_organization_record() {
        assert_eq!(
            evaluate(Role::OrgAdmin, Some(7), Some(7), Action::UpdateOrganization),
            Decision::Allow
        );
        assert_eq!(
            evaluate(Role::OrgManager, Some(7), Some(7), Action::UpdateOrganization),
            Decision::Deny
        );
        assert_eq!(
            evaluate(Role::OrgSupport, Some(7), Some(7), Action::UpdateOrganization),
            Decision::Deny
        );
    }

    #[test]
    fn tenant_role_without_organization_is_denied() {
        for role in TENANT_ROLES {
            assert_eq!(evaluate(role, None, Some(1), Action::ReadTenantData), Decision::Deny);
        }
    }
}
