use uuid::Uuid;

use tavola_domain::role::Role;
use tavola_profiles::error::ProfilesServiceError;
use tavola_profiles::usecase::restaurant::{
    CreateRestaurantInput, CreateRestaurantUseCase, GetRestaurantUseCase,
    ListUserRestaurantsUseCase,
};

use crate::helpers::{MockRestaurantRepo, test_membership, test_restaurant};

// ── CreateRestaurant ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_restaurant_with_owner_as_restaurant_admin() {
    let owner_id = Uuid::new_v4();
    let usecase = CreateRestaurantUseCase {
        repo: MockRestaurantRepo::empty(),
    };

    let restaurant = usecase
        .execute(CreateRestaurantInput {
            name: "Trattoria da Pat".to_owned(),
            slug: "trattoria-da-pat".to_owned(),
            owner_id,
        })
        .await
        .unwrap();

    let memberships = usecase.repo.memberships.lock().unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].restaurant_id, restaurant.id);
    assert_eq!(memberships[0].user_id, owner_id);
    assert_eq!(memberships[0].member_role, Role::RestaurantAdmin);
}

#[tokio::test]
async fn should_reject_malformed_slug() {
    let usecase = CreateRestaurantUseCase {
        repo: MockRestaurantRepo::empty(),
    };

    let result = usecase
        .execute(CreateRestaurantInput {
            name: "Trattoria".to_owned(),
            slug: "Not A Slug".to_owned(),
            owner_id: Uuid::new_v4(),
        })
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::InvalidSlug)));
}

#[tokio::test]
async fn should_reject_duplicate_restaurant() {
    let existing = test_restaurant();
    let usecase = CreateRestaurantUseCase {
        repo: MockRestaurantRepo::new(vec![existing.clone()], vec![]),
    };

    let result = usecase
        .execute(CreateRestaurantInput {
            name: existing.name,
            slug: "other-slug".to_owned(),
            owner_id: Uuid::new_v4(),
        })
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::RestaurantExists)));
}

// ── GetRestaurant / ListUserRestaurants ──────────────────────────────────────

#[tokio::test]
async fn should_answer_not_found_for_unknown_restaurant() {
    let usecase = GetRestaurantUseCase {
        repo: MockRestaurantRepo::empty(),
    };

    let result = usecase.execute(Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(ProfilesServiceError::RestaurantNotFound)
    ));
}

#[tokio::test]
async fn should_list_only_the_users_memberships() {
    let user_id = Uuid::new_v4();
    let mine = test_restaurant();
    let mut other = test_restaurant();
    other.name = "Osteria Altrove".to_owned();
    other.slug = "osteria-altrove".to_owned();

    let usecase = ListUserRestaurantsUseCase {
        repo: MockRestaurantRepo::new(
            vec![mine.clone(), other.clone()],
            vec![
                test_membership(mine.id, user_id, Role::RestaurantStaff),
                test_membership(other.id, Uuid::new_v4(), Role::RestaurantAdmin),
            ],
        ),
    };

    let memberships = usecase.execute(user_id).await.unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].0.id, mine.id);
    assert_eq!(memberships[0].1, Role::RestaurantStaff);
}
