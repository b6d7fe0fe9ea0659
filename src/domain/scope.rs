//! Visibility scope - the authorization core.
//!
//! Every "responsible manager" field on an entity is an ACL marker. Given the
//! requester's role and id, [`Scope::compute`] produces the set of manager ids
//! whose records the requester may see; entity-specific predicates then apply
//! that set to each ownership shape.
//!
//! Subordinate visibility is one hop: a head sees direct reports only. The
//! subordinate list is supplied by the caller, so a transitive policy would be
//! a call-site change, not a change here.

use std::collections::HashSet;

use crate::domain::manager::Role;

/// The set of manager ids a requester is permitted to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Admin: no restriction, no scope computation needed.
    Unrestricted,
    /// Everyone else: a concrete id set.
    Ids(HashSet<i32>),
}

impl Scope {
    /// Compute the visibility scope for a requester.
    ///
    /// `subordinate_ids` are the managers whose supervisor set contains the
    /// requester (direct reports); it is only consulted for heads.
    pub fn compute(role: Role, manager_id: i32, subordinate_ids: &[i32]) -> Self {
        match role {
            Role::Admin => Scope::Unrestricted,
            Role::Head => {
                let mut ids: HashSet<i32> = subordinate_ids.iter().copied().collect();
                ids.insert(manager_id);
                Scope::Ids(ids)
            }
            Role::Manager => Scope::Ids(HashSet::from([manager_id])),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Scope::Unrestricted)
    }

    /// The concrete id set, or `None` when unrestricted.
    pub fn ids(&self) -> Option<&HashSet<i32>> {
        match self {
            Scope::Unrestricted => None,
            Scope::Ids(ids) => Some(ids),
        }
    }

    /// Whether an owner field permits visibility.
    ///
    /// A record with no owner at all (`None`) is invisible to every
    /// non-admin requester.
    pub fn includes(&self, owner: Option<i32>) -> bool {
        match self {
            Scope::Unrestricted => true,
            Scope::Ids(ids) => owner.is_some_and(|id| ids.contains(&id)),
        }
    }

    /// Whether any of several owner ids falls inside the scope.
    pub fn includes_any<I: IntoIterator<Item = i32>>(&self, owners: I) -> bool {
        match self {
            Scope::Unrestricted => true,
            Scope::Ids(ids) => owners.into_iter().any(|id| ids.contains(&id)),
        }
    }

    /// Ownership test for projects: main responsible OR any secondary.
    pub fn includes_project(&self, main: Option<i32>, secondaries: &[i32]) -> bool {
        match self {
            Scope::Unrestricted => true,
            Scope::Ids(ids) => {
                main.is_some_and(|id| ids.contains(&id))
                    || secondaries.iter().any(|id| ids.contains(id))
            }
        }
    }

    /// Ownership test for tasks: assignee OR creator. Either side may be
    /// null after the referenced manager was deleted.
    pub fn includes_task(&self, responsible: Option<i32>, creator: Option<i32>) -> bool {
        self.includes(responsible) || self.includes(creator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_unrestricted() {
        let scope = Scope::compute(Role::Admin, 1, &[2, 3]);
        assert!(scope.is_unrestricted());
        assert!(scope.includes(None));
        assert!(scope.includes(Some(999)));
    }

    #[test]
    fn manager_sees_only_self() {
        let scope = Scope::compute(Role::Manager, 3, &[]);
        assert!(scope.includes(Some(3)));
        assert!(!scope.includes(Some(2)));
        assert!(!scope.includes(None));
    }

    #[test]
    fn head_sees_self_and_direct_reports() {
        let scope = Scope::compute(Role::Head, 2, &[3, 5]);
        assert!(scope.includes(Some(2)));
        assert!(scope.includes(Some(3)));
        assert!(scope.includes(Some(5)));
        assert!(!scope.includes(Some(4)));
    }

    #[test]
    fn ownerless_record_hidden_from_non_admins() {
        let head = Scope::compute(Role::Head, 2, &[3]);
        assert!(!head.includes(None));
        assert!(!head.includes_project(None, &[]));
    }

    #[test]
    fn project_visible_through_secondary_responsible() {
        let scope = Scope::compute(Role::Manager, 7, &[]);
        assert!(scope.includes_project(Some(1), &[7, 9]));
        assert!(!scope.includes_project(Some(1), &[9]));
    }

    #[test]
    fn task_visible_to_creator_and_assignee() {
        let scope = Scope::compute(Role::Manager, 4, &[]);
        assert!(scope.includes_task(Some(4), Some(9)));
        assert!(scope.includes_task(Some(9), Some(4)));
        assert!(!scope.includes_task(Some(9), Some(9)));
    }

    #[test]
    fn task_with_deleted_creator_still_follows_assignee() {
        let scope = Scope::compute(Role::Manager, 4, &[]);
        assert!(scope.includes_task(Some(4), None));
        assert!(!scope.includes_task(None, None));
        assert!(Scope::compute(Role::Admin, 1, &[]).includes_task(None, None));
    }

    /// Scope monotonicity: manager ⊆ head ⊆ admin for a fixed supervisor graph.
    #[test]
    fn scope_monotonicity() {
        let manager = Scope::compute(Role::Manager, 3, &[]);
        let head = Scope::compute(Role::Head, 2, &[3]);
        let admin = Scope::compute(Role::Admin, 1, &[]);

        for owner in [Some(2), Some(3), Some(4), None] {
            if manager.includes(owner) {
                assert!(head.includes(owner) || owner != Some(3));
            }
            if head.includes(owner) {
                assert!(admin.includes(owner));
            }
        }
        // The manager's own records are inside the head's scope
        assert!(head.includes(Some(3)));
    }

    /// The worked scenario: manager 3 owns a project, head 2 supervises 3,
    /// manager 4 is unrelated.
    #[test]
    fn supervisor_scenario() {
        let main = Some(3);
        let secondaries: [i32; 0] = [];

        let head = Scope::compute(Role::Head, 2, &[3]);
        assert!(head.includes_project(main, &secondaries));

        let stranger = Scope::compute(Role::Manager, 4, &[]);
        assert!(!stranger.includes_project(main, &secondaries));
    }

    #[test]
    fn head_without_reports_behaves_like_manager_plus_self() {
        let scope = Scope::compute(Role::Head, 8, &[]);
        assert_eq!(scope, Scope::Ids(HashSet::from([8])));
    }
}
