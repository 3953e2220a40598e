use uuid::Uuid;

use tavola_domain::role::Role;
use tavola_profiles::error::ProfilesServiceError;
use tavola_profiles::usecase::profile::{
    EnsureProfileUseCase, GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

use crate::helpers::{MockProfileRepo, MockRestaurantRepo, test_profile, test_restaurant};

// ── GetProfile ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_profile_by_principal_id() {
    let user_id = Uuid::new_v4();
    let usecase = GetProfileUseCase {
        repo: MockProfileRepo::new(vec![test_profile(user_id, Role::Courier)]),
    };

    let profile = usecase.execute(user_id).await.unwrap();
    assert_eq!(profile.role, Role::Courier);
}

#[tokio::test]
async fn should_answer_not_found_for_unknown_principal() {
    let usecase = GetProfileUseCase {
        repo: MockProfileRepo::empty(),
    };

    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ProfilesServiceError::ProfileNotFound)));
}

// ── EnsureProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_customer_profile_with_email_local_part() {
    let usecase = EnsureProfileUseCase {
        repo: MockProfileRepo::empty(),
    };
    let user_id = Uuid::new_v4();

    let profile = usecase.execute(user_id, "pat@example.com").await.unwrap();

    assert_eq!(profile.role, Role::Customer);
    assert_eq!(profile.display_name, "pat");
    assert_eq!(profile.home_restaurant_id, None);
}

#[tokio::test]
async fn should_keep_existing_profile_untouched_on_repeat_ensure() {
    let user_id = Uuid::new_v4();
    let existing = test_profile(user_id, Role::RestaurantAdmin);
    let usecase = EnsureProfileUseCase {
        repo: MockProfileRepo::new(vec![existing]),
    };

    let profile = usecase.execute(user_id, "other@example.com").await.unwrap();

    // The upsert never downgrades an assigned role.
    assert_eq!(profile.role, Role::RestaurantAdmin);
    assert_eq!(usecase.repo.profiles.lock().unwrap().len(), 1);
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_display_name_and_home_restaurant() {
    let user_id = Uuid::new_v4();
    let restaurant = test_restaurant();
    let usecase = UpdateProfileUseCase {
        profiles: MockProfileRepo::new(vec![test_profile(user_id, Role::Customer)]),
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
    };

    usecase
        .execute(
            user_id,
            UpdateProfileInput {
                display_name: Some("Patricia".to_owned()),
                home_restaurant_id: Some(restaurant.id),
            },
        )
        .await
        .unwrap();

    let profiles = usecase.profiles.profiles.lock().unwrap();
    assert_eq!(profiles[0].display_name, "Patricia");
    assert_eq!(profiles[0].home_restaurant_id, Some(restaurant.id));
}

#[tokio::test]
async fn should_reject_empty_update() {
    let usecase = UpdateProfileUseCase {
        profiles: MockProfileRepo::empty(),
        restaurants: MockRestaurantRepo::empty(),
    };

    let result = usecase
        .execute(
            Uuid::new_v4(),
            UpdateProfileInput {
                display_name: None,
                home_restaurant_id: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::MissingData)));
}

#[tokio::test]
async fn should_reject_invalid_display_name() {
    let user_id = Uuid::new_v4();
    let usecase = UpdateProfileUseCase {
        profiles: MockProfileRepo::new(vec![test_profile(user_id, Role::Customer)]),
        restaurants: MockRestaurantRepo::empty(),
    };

    let result = usecase
        .execute(
            user_id,
            UpdateProfileInput {
                display_name: Some("  ".to_owned()),
                home_restaurant_id: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ProfilesServiceError::InvalidDisplayName)
    ));
}

#[tokio::test]
async fn should_reject_update_for_missing_profile() {
    let restaurant = test_restaurant();
    let usecase = UpdateProfileUseCase {
        profiles: MockProfileRepo::empty(),
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
    };

    let result = usecase
        .execute(
            Uuid::new_v4(),
            UpdateProfileInput {
                display_name: Some("Pat".to_owned()),
                home_restaurant_id: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::ProfileNotFound)));
}
