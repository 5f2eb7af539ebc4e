use pretty_assertions::assert_eq;
use rosteria_api::middleware::auth::{
    generate_token, hash_password, verify_password, Principal,
};
use uuid::Uuid;

#[test]
fn password_round_trips_through_the_hash() {
    let hash = hash_password("correct horse battery staple").unwrap();

    assert!(verify_password("correct horse battery staple", &hash).unwrap());
    assert!(!verify_password("wrong password", &hash).unwrap());
}

#[test]
fn hashes_are_salted() {
    let first = hash_password("same password").unwrap();
    let second = hash_password("same password").unwrap();

    // Different salts give different PHC strings for the same password
    assert_ne!(first, second);
}

#[test]
fn tokens_are_long_and_unique() {
    let a = generate_token();
    let b = generate_token();

    assert_eq!(a.len(), 48);
    assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(a, b);
}

#[test]
fn only_admins_pass_the_admin_gate() {
    let admin = Principal {
        account_id: Uuid::new_v4(),
        is_admin: true,
    };
    let musician = Principal {
        account_id: Uuid::new_v4(),
        is_admin: false,
    };

    assert!(admin.require_admin().is_ok());
    assert!(musician.require_admin().is_err());
}
