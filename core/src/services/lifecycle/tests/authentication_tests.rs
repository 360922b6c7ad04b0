//! Unit tests for credential login

use crate::domain::entities::{AccountRole, ApprovalState};
use crate::errors::{AuthError, DomainError};

use super::mocks::{harness, new_admin, new_client, seed_client, CLIENT_EMAIL, CLIENT_PASSWORD};

fn auth_error<T: std::fmt::Debug>(result: Result<T, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("Expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_login_and_wrong_password_look_the_same() {
    let (h, repo) = harness("123456");
    seed_client(repo.as_ref()).await;

    let unknown = h
        .service
        .authenticate("ghost@nowhere.io", CLIENT_PASSWORD, AccountRole::Client)
        .await;
    let wrong = h
        .service
        .authenticate(CLIENT_EMAIL, "wrong-password", AccountRole::Client)
        .await;

    let unknown = auth_error(unknown);
    let wrong = auth_error(wrong);
    assert_eq!(unknown, AuthError::InvalidCredentials);
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_unverified_client_cannot_log_in() {
    let (h, repo) = harness("123456");
    seed_client(repo.as_ref()).await;

    let result = h
        .service
        .authenticate(CLIENT_EMAIL, CLIENT_PASSWORD, AccountRole::Client)
        .await;
    assert_eq!(auth_error(result), AuthError::AccountNotVerified);
}

#[tokio::test]
async fn test_verified_client_logs_in_before_approval() {
    let (h, _) = harness("123456");
    let account = h.service.register_client(new_client()).await.unwrap();
    h.service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();

    let session = h
        .service
        .authenticate("OPS@ACME.NG", CLIENT_PASSWORD, AccountRole::Client)
        .await
        .unwrap();
    assert_eq!(session.account_id, account.id);
    assert_eq!(session.role, AccountRole::Client);
    assert_eq!(session.approval, ApprovalState::Pending);
}

#[tokio::test]
async fn test_admin_logs_in_by_user_name_or_email() {
    let (h, _) = harness("123456");
    let admin = h.service.create_admin(new_admin()).await.unwrap();
    let password = new_admin().password;

    let by_name = h
        .service
        .authenticate("opslead", &password, AccountRole::Admin)
        .await
        .unwrap();
    assert_eq!(by_name.account_id, admin.id);

    let by_email = h
        .service
        .authenticate("opslead@e-biding.ng", &password, AccountRole::Admin)
        .await
        .unwrap();
    assert_eq!(by_email.role, AccountRole::Admin);
}

#[tokio::test]
async fn test_role_mismatch_is_invalid_credentials() {
    let (h, _) = harness("123456");
    h.service.create_admin(new_admin()).await.unwrap();
    let password = new_admin().password;

    let as_client = h
        .service
        .authenticate("opslead@e-biding.ng", &password, AccountRole::Client)
        .await;
    assert_eq!(auth_error(as_client), AuthError::InvalidCredentials);
}
