use uuid::Uuid;

use tavola_domain::order::OrderStatus;
use tavola_domain::page::PageQuery;
use tavola_domain::role::Role;
use tavola_profiles::error::ProfilesServiceError;
use tavola_profiles::usecase::order::{
    ListOrdersUseCase, PlaceOrderInput, PlaceOrderUseCase, Requester, UpdateOrderStatusUseCase,
};

use crate::helpers::{
    MockOrderRepo, MockRestaurantRepo, test_membership, test_order, test_restaurant,
};

fn staff(user_id: Uuid) -> Requester {
    Requester {
        user_id,
        role: Role::RestaurantStaff,
    }
}

// ── PlaceOrder ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_place_order_in_received_state() {
    let restaurant = test_restaurant();
    let customer = Uuid::new_v4();
    let usecase = PlaceOrderUseCase {
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
        orders: MockOrderRepo::empty(),
    };

    let order = usecase
        .execute(PlaceOrderInput {
            restaurant_id: restaurant.id,
            placed_by: customer,
            total_cents: 2450,
            note: Some("no onions".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.restaurant_id, restaurant.id);
    assert_eq!(order.placed_by, customer);
    assert_eq!(usecase.orders.orders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_order_with_non_positive_total() {
    let restaurant = test_restaurant();
    let usecase = PlaceOrderUseCase {
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
        orders: MockOrderRepo::empty(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            restaurant_id: restaurant.id,
            placed_by: Uuid::new_v4(),
            total_cents: 0,
            note: None,
        })
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::InvalidOrder)));
}

#[tokio::test]
async fn should_reject_order_for_unknown_restaurant() {
    let usecase = PlaceOrderUseCase {
        restaurants: MockRestaurantRepo::empty(),
        orders: MockOrderRepo::empty(),
    };

    let result = usecase
        .execute(PlaceOrderInput {
            restaurant_id: Uuid::new_v4(),
            placed_by: Uuid::new_v4(),
            total_cents: 1000,
            note: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(ProfilesServiceError::RestaurantNotFound)
    ));
}

// ── ListOrders ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_orders_for_a_member() {
    let restaurant = test_restaurant();
    let staff_id = Uuid::new_v4();
    let orders = vec![
        test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Received),
        test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Preparing),
        test_order(Uuid::new_v4(), Uuid::new_v4(), OrderStatus::Received),
    ];
    let usecase = ListOrdersUseCase {
        restaurants: MockRestaurantRepo::new(
            vec![restaurant.clone()],
            vec![test_membership(restaurant.id, staff_id, Role::RestaurantStaff)],
        ),
        orders: MockOrderRepo::new(orders),
    };

    let listed = usecase
        .execute(restaurant.id, staff(staff_id), PageQuery::default())
        .await
        .unwrap();

    // Only this restaurant's orders.
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|o| o.restaurant_id == restaurant.id));
}

#[tokio::test]
async fn should_reject_listing_for_a_non_member() {
    let restaurant = test_restaurant();
    let usecase = ListOrdersUseCase {
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
        orders: MockOrderRepo::empty(),
    };

    let result = usecase
        .execute(restaurant.id, staff(Uuid::new_v4()), PageQuery::default())
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::NotAMember)));
}

#[tokio::test]
async fn should_let_platform_admin_list_without_membership() {
    let restaurant = test_restaurant();
    let usecase = ListOrdersUseCase {
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
        orders: MockOrderRepo::empty(),
    };

    let listed = usecase
        .execute(
            restaurant.id,
            Requester {
                user_id: Uuid::new_v4(),
                role: Role::PlatformAdmin,
            },
            PageQuery::default(),
        )
        .await
        .unwrap();

    assert!(listed.is_empty());
}

#[tokio::test]
async fn should_page_orders_newest_first() {
    let restaurant = test_restaurant();
    let staff_id = Uuid::new_v4();
    let mut orders = Vec::new();
    for i in 0..3 {
        let mut order = test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Received);
        order.created_at += chrono::Duration::seconds(i);
        orders.push(order);
    }
    let newest = orders.last().unwrap().id;
    let usecase = ListOrdersUseCase {
        restaurants: MockRestaurantRepo::new(
            vec![restaurant.clone()],
            vec![test_membership(restaurant.id, staff_id, Role::RestaurantStaff)],
        ),
        orders: MockOrderRepo::new(orders),
    };

    let page = PageQuery {
        per_page: 2,
        page: 1,
    };
    let listed = usecase
        .execute(restaurant.id, staff(staff_id), page)
        .await
        .unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newest);
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_advance_order_through_its_lifecycle() {
    let restaurant = test_restaurant();
    let staff_id = Uuid::new_v4();
    let order = test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Received);
    let order_id = order.id;

    let order_repo = MockOrderRepo::new(vec![order]);
    let orders_handle = order_repo.orders_handle();
    let usecase = UpdateOrderStatusUseCase {
        restaurants: MockRestaurantRepo::new(
            vec![restaurant.clone()],
            vec![test_membership(restaurant.id, staff_id, Role::RestaurantStaff)],
        ),
        orders: order_repo,
    };

    for next in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        usecase.execute(order_id, next, staff(staff_id)).await.unwrap();
    }

    let orders = orders_handle.lock().unwrap();
    assert_eq!(orders[0].status, OrderStatus::Completed);
}

#[tokio::test]
async fn should_reject_skipping_a_lifecycle_step() {
    let restaurant = test_restaurant();
    let staff_id = Uuid::new_v4();
    let order = test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Received);
    let order_id = order.id;

    let usecase = UpdateOrderStatusUseCase {
        restaurants: MockRestaurantRepo::new(
            vec![restaurant.clone()],
            vec![test_membership(restaurant.id, staff_id, Role::RestaurantStaff)],
        ),
        orders: MockOrderRepo::new(vec![order]),
    };

    let result = usecase
        .execute(order_id, OrderStatus::Completed, staff(staff_id))
        .await;

    assert!(matches!(
        result,
        Err(ProfilesServiceError::InvalidStatusChange)
    ));
}

#[tokio::test]
async fn should_reject_cancelling_a_ready_order() {
    let restaurant = test_restaurant();
    let staff_id = Uuid::new_v4();
    let order = test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Ready);
    let order_id = order.id;

    let usecase = UpdateOrderStatusUseCase {
        restaurants: MockRestaurantRepo::new(
            vec![restaurant.clone()],
            vec![test_membership(restaurant.id, staff_id, Role::RestaurantStaff)],
        ),
        orders: MockOrderRepo::new(vec![order]),
    };

    let result = usecase
        .execute(order_id, OrderStatus::Cancelled, staff(staff_id))
        .await;

    assert!(matches!(
        result,
        Err(ProfilesServiceError::InvalidStatusChange)
    ));
}

#[tokio::test]
async fn should_reject_status_change_from_non_member() {
    let restaurant = test_restaurant();
    let order = test_order(restaurant.id, Uuid::new_v4(), OrderStatus::Received);
    let order_id = order.id;

    let usecase = UpdateOrderStatusUseCase {
        restaurants: MockRestaurantRepo::new(vec![restaurant.clone()], vec![]),
        orders: MockOrderRepo::new(vec![order]),
    };

    let result = usecase
        .execute(order_id, OrderStatus::Preparing, staff(Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::NotAMember)));
}

#[tokio::test]
async fn should_answer_not_found_for_unknown_order() {
    let usecase = UpdateOrderStatusUseCase {
        restaurants: MockRestaurantRepo::empty(),
        orders: MockOrderRepo::empty(),
    };

    let result = usecase
        .execute(Uuid::new_v4(), OrderStatus::Preparing, staff(Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(ProfilesServiceError::OrderNotFound)));
}
