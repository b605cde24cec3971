//! Platform totals for the administrator dashboards.

use serde::Serialize;

use crate::roles::Role;

/// Headline counts shown to administrators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformMetrics {
    pub total_users: i64,
    pub total_schools: i64,
    pub approved_schools: i64,
    pub pending_schools: i64,
    /// Promotions that are active and not yet ended.
    pub active_promotions: i64,
}

/// Account counts per role, shown to super administrators.
///
/// Suspended accounts are counted under their stored role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleBreakdown {
    pub parent: i64,
    pub school: i64,
    pub admin: i64,
    pub super_admin: i64,
}

impl RoleBreakdown {
    /// Fold `(stored role, count)` pairs. Rows with a role name outside the
    /// known set are skipped and logged.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut breakdown = Self::default();
        for (stored_role, count) in counts {
            match stored_role.parse::<Role>() {
                Ok(role) => *breakdown.slot(role) += count,
                Err(_) => {
                    tracing::warn!(stored_role = %stored_role, count, "Skipping unrecognised role in breakdown");
                }
            }
        }
        breakdown
    }

    fn slot(&mut self, role: Role) -> &mut i64 {
        match role {
            Role::Parent => &mut self.parent,
            Role::School => &mut self.school,
            Role::Admin => &mut self.admin,
            Role::SuperAdmin => &mut self.super_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_land_in_their_role() {
        let breakdown = RoleBreakdown::from_counts([
            ("parent".to_string(), 40),
            ("school".to_string(), 7),
            ("super_admin".to_string(), 1),
        ]);
        assert_eq!(
            breakdown,
            RoleBreakdown {
                parent: 40,
                school: 7,
                admin: 0,
                super_admin: 1,
            }
        );
    }

    #[test]
    fn unknown_roles_are_skipped() {
        let breakdown = RoleBreakdown::from_counts([
            ("admin".to_string(), 2),
            ("moderator".to_string(), 9),
        ]);
        assert_eq!(breakdown.admin, 2);
        assert_eq!(breakdown.parent + breakdown.school + breakdown.super_admin, 0);
    }

    #[test]
    fn breakdown_serializes_with_role_names() {
        let json = serde_json::to_value(RoleBreakdown::default()).unwrap();
        for role in crate::roles::VALID_ROLES {
            assert_eq!(json[*role], 0, "{role}");
        }
    }
}
