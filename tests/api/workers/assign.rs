use crate::helpers::{
    add_camp, add_room, add_worker, assign, get_json_response_body, TestApp,
};
use camp_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_update_both_sides(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let worker_id = add_worker(app, &camp_id, "Ted", "A", None).await;

    let response = app
        .post_workers_assign(&json!({"roomId": room_id, "workerId": worker_id}))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["room"]["workers"], json!([worker_id]));
    assert_eq!(body["room"]["occupiedBeds"], 1);
    assert_eq!(body["room"]["availableBeds"], 1);
    assert_eq!(body["worker"]["roomId"], room_id.as_str());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_room_full(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let room_id = add_room(app, &camp_id, "101", 1, "A").await;
    add_worker(app, &camp_id, "Ted", "A", Some(&room_id)).await;
    let worker_id = add_worker(app, &camp_id, "Dougal", "A", None).await;

    let response = app
        .post_workers_assign(&json!({"roomId": room_id, "workerId": worker_id}))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let body = get_json_response_body(app.get_worker(&worker_id).await).await;
    assert_eq!(body["roomId"], json!(null));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_already_assigned(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let first_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let second_room_id = add_room(app, &camp_id, "102", 2, "A").await;
    let worker_id = add_worker(app, &camp_id, "Ted", "A", None).await;
    assign(app, &first_room_id, &worker_id).await;

    for room_id in [&first_room_id, &second_room_id] {
        let response = app
            .post_workers_assign(&json!({"roomId": room_id, "workerId": worker_id}))
            .await;
        assert_eq!(response.status().as_u16(), 409);
        assert_eq!(
            response.json::<ErrorResponse>().await.unwrap().error,
            format!("Worker {worker_id} is already assigned to a room")
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_ids(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let worker_id = add_worker(app, &camp_id, "Ted", "A", None).await;
    let unknown = "60d8e457-8934-48ce-9d16-f503bd7ef085";

    let test_cases = [
        json!({"roomId": unknown, "workerId": worker_id}),
        json!({"roomId": room_id, "workerId": unknown}),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_workers_assign(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            404,
            "Should fail with HTTP404 for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_worker_of_other_camp(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let other_camp_id = add_camp(app).await;
    let room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let worker_id = add_worker(app, &other_camp_id, "Ted", "A", None).await;

    let response = app
        .post_workers_assign(&json!({"roomId": room_id, "workerId": worker_id}))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_ids(app: &mut TestApp) {
    let response = app
        .post_workers_assign(&json!({"roomId": "101", "workerId": "ted"}))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
