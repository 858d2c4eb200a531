use crate::helpers::{
    add_camp, add_room, add_worker, get_json_response_body, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_move_worker_between_rooms(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let from_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let to_room_id = add_room(app, &camp_id, "102", 1, "A").await;
    let worker_id =
        add_worker(app, &camp_id, "Ted", "A", Some(&from_room_id)).await;

    let response = app
        .post_workers_move(&json!({
            "workerId": worker_id,
            "fromRoomId": from_room_id,
            "toRoomId": to_room_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["fromRoom"]["workers"], json!([]));
    assert_eq!(body["toRoom"]["workers"], json!([worker_id]));
    assert_eq!(body["toRoom"]["availableBeds"], 0);
    assert_eq!(body["worker"]["roomId"], to_room_id.as_str());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_keep_worker_in_place_if_target_full(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let from_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let to_room_id = add_room(app, &camp_id, "102", 1, "A").await;
    let worker_id =
        add_worker(app, &camp_id, "Ted", "A", Some(&from_room_id)).await;
    add_worker(app, &camp_id, "Dougal", "A", Some(&to_room_id)).await;

    let response = app
        .post_workers_move(&json!({
            "workerId": worker_id,
            "fromRoomId": from_room_id,
            "toRoomId": to_room_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let body = get_json_response_body(app.get_worker(&worker_id).await).await;
    assert_eq!(body["roomId"], from_room_id.as_str());

    let body = get_json_response_body(app.get_rooms_list(&camp_id, None).await).await;
    assert_eq!(body["rooms"][0]["workers"], json!([worker_id]));
    assert_eq!(body["rooms"][1]["occupiedBeds"], 1);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_not_in_source_room(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let from_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let to_room_id = add_room(app, &camp_id, "102", 2, "A").await;
    let worker_id = add_worker(app, &camp_id, "Ted", "A", None).await;

    let response = app
        .post_workers_move(&json!({
            "workerId": worker_id,
            "fromRoomId": from_room_id,
            "toRoomId": to_room_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_target_room(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let from_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let worker_id =
        add_worker(app, &camp_id, "Ted", "A", Some(&from_room_id)).await;

    let response = app
        .post_workers_move(&json!({
            "workerId": worker_id,
            "fromRoomId": from_room_id,
            "toRoomId": "60d8e457-8934-48ce-9d16-f503bd7ef085"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let body = get_json_response_body(app.get_worker(&worker_id).await).await;
    assert_eq!(body["roomId"], from_room_id.as_str());
}
