use chrono::{Duration, Utc};

use vitrine_site::domain::types::{RESET_TOKEN_LEN, User};
use vitrine_site::error::SiteServiceError;
use vitrine_site::password::verify_password;
use vitrine_site::usecase::account::{LoginInput, LoginUseCase};
use vitrine_site::usecase::password_reset::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::{MockUserRepo, TEST_PASSWORD, test_oauth_user, test_user};

const BASE_URL: &str = "https://example.com";

fn forgot_usecase(repo: MockUserRepo) -> ForgotPasswordUseCase<MockUserRepo> {
    ForgotPasswordUseCase {
        users: repo,
        public_base_url: BASE_URL.to_owned(),
    }
}

fn with_reset_token(token: &str, ttl_secs: i64) -> User {
    let mut user = test_user();
    user.reset_token = Some(token.to_owned());
    user.reset_token_expires_at = Some(Utc::now() + Duration::seconds(ttl_secs));
    user
}

// ── ForgotPasswordUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_and_outbox_event_for_known_email() {
    let repo = MockUserRepo::new(vec![test_user()]);
    let users_handle = repo.users_handle();
    let events_handle = repo.events_handle();

    let output = forgot_usecase(repo)
        .execute(ForgotPasswordInput {
            email: "User@Example.COM".to_owned(),
        })
        .await
        .unwrap();

    let reset_url = output.reset_url.expect("known email should yield a link");

    let users = users_handle.lock().unwrap();
    let token = users[0].reset_token.as_deref().unwrap();
    assert_eq!(token.len(), RESET_TOKEN_LEN);
    assert_eq!(reset_url, format!("{BASE_URL}/reset-password?token={token}"));

    let expires_at = users[0].reset_token_expires_at.unwrap();
    let ttl = (expires_at - Utc::now()).num_seconds();
    assert!((3590..=3600).contains(&ttl), "unexpected token ttl {ttl}s");

    // The notification event is recorded in the same repository call.
    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "password_reset_requested");
    assert_eq!(
        events[0].idempotency_key,
        format!("password_reset_requested:{token}")
    );
    assert_eq!(events[0].payload["email"].as_str(), Some("user@example.com"));
    assert_eq!(
        events[0].payload["reset_url"].as_str(),
        Some(reset_url.as_str())
    );
}

#[tokio::test]
async fn should_answer_identically_for_unknown_email() {
    let repo = MockUserRepo::empty();
    let events_handle = repo.events_handle();

    let output = forgot_usecase(repo)
        .execute(ForgotPasswordInput {
            email: "nobody@example.com".to_owned(),
        })
        .await
        .unwrap();

    assert!(output.reset_url.is_none());
    assert!(events_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_issue_token_for_oauth_account() {
    let repo = MockUserRepo::new(vec![test_oauth_user()]);
    let users_handle = repo.users_handle();
    let events_handle = repo.events_handle();

    let output = forgot_usecase(repo)
        .execute(ForgotPasswordInput {
            email: "oauth@example.com".to_owned(),
        })
        .await
        .unwrap();

    // Outwardly identical to a miss: no link, no token, no event.
    assert!(output.reset_url.is_none());
    assert!(users_handle.lock().unwrap()[0].reset_token.is_none());
    assert!(events_handle.lock().unwrap().is_empty());
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_with_valid_token() {
    let token = "a".repeat(RESET_TOKEN_LEN);
    let repo = MockUserRepo::new(vec![with_reset_token(&token, 600)]);
    let users_handle = repo.users_handle();

    let usecase = ResetPasswordUseCase { users: repo };
    usecase
        .execute(ResetPasswordInput {
            token,
            password: "NewSup3rsecret".to_owned(),
        })
        .await
        .unwrap();

    let users = users_handle.lock().unwrap();
    assert!(users[0].reset_token.is_none(), "token must be consumed");
    assert!(users[0].reset_token_expires_at.is_none());
    let hash = users[0].password_hash.as_deref().unwrap();
    assert!(verify_password("NewSup3rsecret", hash).unwrap());
    assert!(!verify_password(TEST_PASSWORD, hash).unwrap());
}

#[tokio::test]
async fn should_reject_expired_token() {
    let token = "b".repeat(RESET_TOKEN_LEN);
    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![with_reset_token(&token, -1)]),
    };

    let result = usecase
        .execute(ResetPasswordInput {
            token,
            password: "NewSup3rsecret".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::InvalidResetToken)),
        "expected InvalidResetToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![test_user()]),
    };

    let result = usecase
        .execute(ResetPasswordInput {
            token: "c".repeat(RESET_TOKEN_LEN),
            password: "NewSup3rsecret".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::InvalidResetToken)),
        "expected InvalidResetToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_reused_token() {
    let token = "d".repeat(RESET_TOKEN_LEN);
    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![with_reset_token(&token, 600)]),
    };

    usecase
        .execute(ResetPasswordInput {
            token: token.clone(),
            password: "NewSup3rsecret".to_owned(),
        })
        .await
        .unwrap();

    let result = usecase
        .execute(ResetPasswordInput {
            token,
            password: "An0therSecret".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::InvalidResetToken)),
        "expected InvalidResetToken on reuse, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_token_when_new_password_violates_policy() {
    let token = "e".repeat(RESET_TOKEN_LEN);
    let repo = MockUserRepo::new(vec![with_reset_token(&token, 600)]);
    let users_handle = repo.users_handle();

    let usecase = ResetPasswordUseCase { users: repo };
    let result = usecase
        .execute(ResetPasswordInput {
            token: token.clone(),
            password: "weak".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
    // A failed attempt must not burn the token.
    let users = users_handle.lock().unwrap();
    assert_eq!(users[0].reset_token.as_deref(), Some(token.as_str()));
}

// ── End to end ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_complete_forgot_reset_login_flow() {
    let repo = MockUserRepo::new(vec![test_user()]);

    let output = forgot_usecase(repo.clone())
        .execute(ForgotPasswordInput {
            email: "user@example.com".to_owned(),
        })
        .await
        .unwrap();
    let reset_url = output.reset_url.unwrap();
    let token = reset_url.split("token=").nth(1).unwrap().to_owned();

    ResetPasswordUseCase {
        users: repo.clone(),
    }
    .execute(ResetPasswordInput {
        token,
        password: "Brand0NewSecret".to_owned(),
    })
    .await
    .unwrap();

    let login = LoginUseCase { users: repo };
    let user = login
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: "Brand0NewSecret".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(user.email, "user@example.com");

    let result = login
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(SiteServiceError::InvalidCredentials)),
        "old password should no longer work, got {result:?}"
    );
}
