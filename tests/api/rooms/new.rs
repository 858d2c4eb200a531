use crate::helpers::{add_camp, add_room, get_json_response_body, TestApp};
use camp_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_requests(app: &mut TestApp) {
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "campId": { "type": "string", "minLength": 36, "maxLength": 36 },
        "number": { "type": "string", "minLength": 1, "maxLength": 32 },
        "capacity": { "type": "integer", "minimum": 1, "maximum": 100 },
        "project": { "type": "string", "minLength": 1 },
        "workers": { "type": "array", "items": { "type": "string" } },
        "occupiedBeds": { "type": "integer", "minimum": 0 },
        "availableBeds": { "type": "integer", "minimum": 0 }
      },
      "required": [
        "id",
        "campId",
        "number",
        "capacity",
        "project",
        "workers",
        "occupiedBeds",
        "availableBeds"
      ]
    });

    let camp_id = add_camp(app).await;
    let response = app
        .post_rooms_new(&json!({
            "campId": camp_id,
            "number": " 101 ",
            "capacity": 4,
            "project": "Slava 2-3"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &body),
        "response does not match schema"
    );
    assert_eq!(body["number"], "101");
    assert_eq!(body["workers"], json!([]));
    assert_eq!(body["availableBeds"], 4);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_duplicate_number(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let other_camp_id = add_camp(app).await;
    add_room(app, &camp_id, "101", 2, "A").await;
    add_room(app, &other_camp_id, "101", 2, "A").await;

    let response = app
        .post_rooms_new(&json!({
            "campId": camp_id,
            "number": "101",
            "capacity": 3,
            "project": "B"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response.json::<ErrorResponse>().await.unwrap().error,
        "Room number already in use: 101"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let test_cases = [
        json!({"campId": camp_id, "number": "", "capacity": 2, "project": "A"}),
        json!({"campId": camp_id, "number": "101", "capacity": 0, "project": "A"}),
        json!({"campId": camp_id, "number": "101", "capacity": 101, "project": "A"}),
        json!({"campId": camp_id, "number": "101", "capacity": 2, "project": " "}),
        json!({"campId": "not-a-uuid", "number": "101", "capacity": 2, "project": "A"}),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_rooms_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_request(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let test_cases = [
        json!({"campId": camp_id, "number": "101", "capacity": "two", "project": "A"}),
        json!({"campId": camp_id, "number": "101", "project": "A"}),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_rooms_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_camp(app: &mut TestApp) {
    let response = app
        .post_rooms_new(&json!({
            "campId": "60d8e457-8934-48ce-9d16-f503bd7ef085",
            "number": "101",
            "capacity": 2,
            "project": "A"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
