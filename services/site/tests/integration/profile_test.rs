use chrono::{Duration, Utc};
use uuid::Uuid;

use vitrine_site::error::SiteServiceError;
use vitrine_site::password::verify_password;
use vitrine_site::usecase::profile::{UpdateProfileInput, UpdateProfileUseCase};

use crate::helpers::{MockUserRepo, TEST_PASSWORD, test_oauth_user, test_user};

fn no_changes() -> UpdateProfileInput {
    UpdateProfileInput {
        name: None,
        phone: None,
        current_password: None,
        new_password: None,
    }
}

fn password_change(current: &str, new: &str) -> UpdateProfileInput {
    UpdateProfileInput {
        current_password: Some(current.to_owned()),
        new_password: Some(new.to_owned()),
        ..no_changes()
    }
}

#[tokio::test]
async fn should_return_current_profile_when_no_fields_given() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let output = usecase.execute(user.id, no_changes()).await.unwrap();

    assert_eq!(output.name, user.name);
    assert_eq!(output.email, user.email);
    assert_eq!(output.phone, None);
}

#[tokio::test]
async fn should_update_name_and_phone() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let output = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("  New Name  ".to_owned()),
                phone: Some("+1 555 0100".to_owned()),
                ..no_changes()
            },
        )
        .await
        .unwrap();

    assert_eq!(output.name, "New Name");
    assert_eq!(output.email, user.email, "email is not editable here");
    assert_eq!(output.phone.as_deref(), Some("+1 555 0100"));
}

#[tokio::test]
async fn should_reject_blank_name() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("   ".to_owned()),
                ..no_changes()
            },
        )
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_change_password_with_current_password() {
    let user = test_user();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users_handle = repo.users_handle();

    let usecase = UpdateProfileUseCase { users: repo };
    usecase
        .execute(user.id, password_change(TEST_PASSWORD, "An0therSecret"))
        .await
        .unwrap();

    let users = users_handle.lock().unwrap();
    let hash = users[0].password_hash.as_deref().unwrap();
    assert!(verify_password("An0therSecret", hash).unwrap());
    assert!(!verify_password(TEST_PASSWORD, hash).unwrap());
}

#[tokio::test]
async fn should_clear_pending_reset_token_on_password_change() {
    let mut user = test_user();
    user.reset_token = Some("pending-token".to_owned());
    user.reset_token_expires_at = Some(Utc::now() + Duration::seconds(600));
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users_handle = repo.users_handle();

    let usecase = UpdateProfileUseCase { users: repo };
    usecase
        .execute(user.id, password_change(TEST_PASSWORD, "An0therSecret"))
        .await
        .unwrap();

    // A password change invalidates any outstanding reset link.
    let users = users_handle.lock().unwrap();
    assert!(users[0].reset_token.is_none());
    assert!(users[0].reset_token_expires_at.is_none());
}

#[tokio::test]
async fn should_require_current_password_for_password_change() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase
        .execute(
            user.id,
            UpdateProfileInput {
                new_password: Some("An0therSecret".to_owned()),
                ..no_changes()
            },
        )
        .await;

    assert!(
        matches!(
            result,
            Err(SiteServiceError::Validation(ref m)) if m == "current password is required"
        ),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_current_password() {
    let user = test_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase
        .execute(user.id, password_change("Wr0ngpassword", "An0therSecret"))
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_password_change_on_oauth_account() {
    let user = test_oauth_user();
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase
        .execute(user.id, password_change(TEST_PASSWORD, "An0therSecret"))
        .await;

    assert!(
        matches!(
            result,
            Err(SiteServiceError::Validation(ref m))
                if m == "password can only be changed on credentials accounts"
        ),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_weak_new_password() {
    let user = test_user();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users_handle = repo.users_handle();

    let usecase = UpdateProfileUseCase { users: repo };
    let result = usecase
        .execute(user.id, password_change(TEST_PASSWORD, "weak"))
        .await;

    assert!(
        matches!(result, Err(SiteServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
    // The stored hash is untouched.
    let users = users_handle.lock().unwrap();
    let hash = users[0].password_hash.as_deref().unwrap();
    assert!(verify_password(TEST_PASSWORD, hash).unwrap());
}

#[tokio::test]
async fn should_reject_unknown_user() {
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::empty(),
    };

    let result = usecase.execute(Uuid::new_v4(), no_changes()).await;

    assert!(
        matches!(result, Err(SiteServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_disabled_account() {
    let mut user = test_user();
    user.is_active = false;
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = usecase.execute(user.id, no_changes()).await;

    assert!(
        matches!(result, Err(SiteServiceError::AccountDisabled)),
        "expected AccountDisabled, got {result:?}"
    );
}
