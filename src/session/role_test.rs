use super::*;

fn user(role: &str) -> User {
    User {
        id: 1,
        name: "Teste".to_owned(),
        email: "teste@example.com".to_owned(),
        role: role.to_owned(),
    }
}

#[test]
fn parse_recognizes_exactly_three_roles() {
    assert_eq!(Role::parse("admin"), Some(Role::Admin));
    assert_eq!(Role::parse("manager"), Some(Role::Manager));
    assert_eq!(Role::parse("operator"), Some(Role::Operator));
    assert_eq!(Role::parse("Admin"), None); // case-sensitive
    assert_eq!(Role::parse("superuser"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn ordering_is_the_privilege_hierarchy() {
    assert!(Role::Operator < Role::Manager);
    assert!(Role::Manager < Role::Admin);
}

// Privileges nest: is_admin implies is_manager implies is_operator.
#[test]
fn meets_minimum_is_monotone() {
    for role in [Role::Operator, Role::Manager, Role::Admin] {
        if role.meets_minimum(Role::Admin) {
            assert!(role.meets_minimum(Role::Manager));
        }
        if role.meets_minimum(Role::Manager) {
            assert!(role.meets_minimum(Role::Operator));
        }
        assert!(role.meets_minimum(Role::Operator));
    }
}

#[test]
fn has_role_fails_without_user() {
    assert!(!has_role(None, &[Role::Admin, Role::Manager, Role::Operator]));
}

#[test]
fn has_role_is_set_containment() {
    let manager = user("manager");
    assert!(has_role(Some(&manager), &[Role::Admin, Role::Manager]));
    assert!(!has_role(Some(&manager), &[Role::Admin]));
}

#[test]
fn unrecognized_role_fails_every_check() {
    let ghost = user("auditor");
    assert!(!has_role(
        Some(&ghost),
        &[Role::Admin, Role::Manager, Role::Operator]
    ));
    assert_eq!(user_role(&ghost), None);
}
