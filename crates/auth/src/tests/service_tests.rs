use super::*;
use crate::jwt::verify_token;
use storage::Storage;

async fn service() -> AuthService {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    AuthService::new(
        storage,
        TokenConfig {
            secret: "service-test-secret".to_string(),
            ttl_seconds: 3600,
        },
    )
}

fn registration(email: &str) -> RegisterInput {
    RegisterInput {
        first_name: "Luis".to_string(),
        last_name: "Moreno".to_string(),
        email: email.to_string(),
        password: "correcthorse".to_string(),
        phone: "555-0150".to_string(),
        phone_alt: None,
    }
}

#[tokio::test]
async fn register_then_login_yields_a_verifiable_token() {
    let service = service().await;
    let profile = service
        .register(registration("luis@example.com"))
        .await
        .expect("register");
    assert_eq!(profile.email, "luis@example.com");

    let (user, token) = service
        .login("luis@example.com", "correcthorse")
        .await
        .expect("login");
    assert_eq!(user.id, profile.id);
    assert_eq!(
        verify_token(service.tokens(), &token).expect("token"),
        profile.id
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let service = service().await;
    service
        .register(registration("luis@example.com"))
        .await
        .expect("first");
    let second = service.register(registration("luis@example.com")).await;
    assert!(matches!(second, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn login_distinguishes_unknown_email_from_bad_password() {
    let service = service().await;
    service
        .register(registration("luis@example.com"))
        .await
        .expect("register");

    assert!(matches!(
        service.login("nobody@example.com", "correcthorse").await,
        Err(AuthError::UnknownEmail)
    ));
    assert!(matches!(
        service.login("luis@example.com", "wrong").await,
        Err(AuthError::WrongPassword)
    ));
}

#[tokio::test]
async fn update_redigests_a_new_password() {
    let service = service().await;
    let profile = service
        .register(registration("luis@example.com"))
        .await
        .expect("register");

    service
        .update(
            profile.id,
            UpdateInput {
                password: Some("batterystaple".to_string()),
                ..UpdateInput::default()
            },
        )
        .await
        .expect("update");

    assert!(matches!(
        service.login("luis@example.com", "correcthorse").await,
        Err(AuthError::WrongPassword)
    ));
    service
        .login("luis@example.com", "batterystaple")
        .await
        .expect("new password works");
}

#[tokio::test]
async fn missing_users_surface_not_found() {
    let service = service().await;
    assert!(matches!(
        service.get(UserId(42)).await,
        Err(AuthError::UserNotFound)
    ));
    assert!(matches!(
        service.update(UserId(42), UpdateInput::default()).await,
        Err(AuthError::UserNotFound)
    ));
    assert!(matches!(
        service.delete(UserId(42)).await,
        Err(AuthError::UserNotFound)
    ));
}
