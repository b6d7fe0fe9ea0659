//! End-to-end walkthrough of the visibility rules as a client would see
//! them, expressed on the scope type every service consults.
//!
//! Cast: admin 1, head 2 with direct report 3, manager 3, manager 4 (no
//! relation to 3). Manager 3 owns a counterparty and co-owns a project.

use crm_backend::domain::{Role, Scope};

fn admin() -> Scope {
    Scope::compute(Role::Admin, 1, &[])
}

fn head() -> Scope {
    Scope::compute(Role::Head, 2, &[3])
}

fn manager() -> Scope {
    Scope::compute(Role::Manager, 3, &[])
}

fn stranger() -> Scope {
    Scope::compute(Role::Manager, 4, &[])
}

#[test]
fn owner_sees_own_record() {
    assert!(manager().includes(Some(3)));
}

#[test]
fn head_sees_direct_reports_record() {
    assert!(head().includes(Some(3)));
    assert!(head().includes(Some(2)));
}

#[test]
fn stranger_does_not_see_it() {
    assert!(!stranger().includes(Some(3)));
}

#[test]
fn admin_sees_everything() {
    assert!(admin().includes(Some(3)));
    assert!(admin().includes(None));
}

#[test]
fn unowned_record_hidden_from_non_admins() {
    assert!(!manager().includes(None));
    assert!(!head().includes(None));
}

#[test]
fn subordinate_visibility_is_one_hop() {
    // 3 reports to 2; if 5 reported to 3, the head of 2 still would not
    // see 5 because only direct reports enter the scope
    let scope = Scope::compute(Role::Head, 2, &[3]);
    assert!(!scope.includes(Some(5)));
}

#[test]
fn project_visible_through_secondary_ownership() {
    // Project owned by 7, co-owned by 3
    assert!(manager().includes_project(Some(7), &[3]));
    assert!(head().includes_project(Some(7), &[3]));
    assert!(!stranger().includes_project(Some(7), &[3]));
}

#[test]
fn project_without_any_owner_is_admin_only() {
    assert!(!manager().includes_project(None, &[]));
    assert!(admin().includes_project(None, &[]));
}

#[test]
fn task_visible_to_creator_and_assignee() {
    // Task created by 3, assigned to 4
    assert!(manager().includes_task(Some(4), Some(3)));
    assert!(stranger().includes_task(Some(4), Some(3)));
    assert!(!Scope::compute(Role::Manager, 6, &[]).includes_task(Some(4), Some(3)));
}

#[test]
fn head_sees_reports_tasks() {
    // Task created by 3, unassigned
    assert!(head().includes_task(None, Some(3)));
    assert!(!stranger().includes_task(None, Some(3)));
}

#[test]
fn task_orphaned_by_creator_deletion_keeps_assignee_visibility() {
    // Creator account deleted; assignee 3 still sees the task
    assert!(manager().includes_task(Some(3), None));
    assert!(head().includes_task(Some(3), None));
    assert!(!stranger().includes_task(Some(3), None));
    // Fully orphaned tasks stay admin-only
    assert!(admin().includes_task(None, None));
    assert!(!manager().includes_task(None, None));
}
