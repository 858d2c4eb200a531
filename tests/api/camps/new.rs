use crate::helpers::{get_json_response_body, get_random_email, TestApp};
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
        "id": {
          "type": "string",
          "minLength": 36,
          "maxLength": 36
        },
        "name": {
          "type": "string",
          "minLength": 1,
          "maxLength": 255
        },
        "ownerEmail": { "type": "string" },
        "sharedWith": {
          "type": "array",
          "items": { "type": "string" }
        },
        "code": {
          "type": "string",
          "pattern": "^[A-Z0-9]{6}$"
        }
      },
      "required": ["id", "name", "ownerEmail", "sharedWith", "code"]
    });

    let email = get_random_email();
    let test_cases = [
        json!({"name": "Slava 4", "ownerEmail": email}),
        json!({
            "name": "Craggy Island",
            "description": "Parochial house annex",
            "ownerEmail": email
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_camps_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed to create camp for input: {}",
            test_case
        );

        let response_body = get_json_response_body(response).await;
        assert!(
            jsonschema::is_valid(&schema, &response_body),
            "response does not match schema"
        );
        assert_eq!(response_body.get("name"), test_case.get("name"));
        assert_eq!(
            response_body.get("description"),
            test_case.get("description")
        );
        assert_eq!(response_body["sharedWith"], json!([]));
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_give_each_camp_its_own_code(app: &mut TestApp) {
    let email = get_random_email();
    let mut codes = Vec::new();
    for name in ["North", "South", "East"] {
        let response = app
            .post_camps_new(&json!({"name": name, "ownerEmail": email}))
            .await;
        let body = get_json_response_body(response).await;
        codes.push(body["code"].as_str().unwrap().to_owned());
    }

    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 3, "Camp codes should be unique");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_request(app: &mut TestApp) {
    let test_cases = [
        json!({"name": true, "ownerEmail": get_random_email()}),
        json!({"name": "Slava 4"}),
        json!({"foo": "bar"}),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_camps_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
        let error = response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error;
        assert!(
            error.starts_with(
                "Failed to deserialize the JSON body into the target type"
            ),
            "Unexpected error for input {:?}: {}",
            test_case,
            error
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_json_error_if_body_is_not_json(app: &mut TestApp) {
    let response = app
        .http_client
        .post(format!("{}/camps/new", &app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let error = response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialise response body to ErrorResponse")
        .error;
    assert!(error.starts_with("Failed to parse the request body as JSON"));

    let response = app
        .http_client
        .post(format!("{}/camps/new", &app.address))
        .body("name=Slava")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 415);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Expected request with `Content-Type: application/json`"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let test_cases = [
        (
            json!({"name": "", "ownerEmail": get_random_email()}),
            "Validation error: Camp name cannot be empty",
        ),
        (
            json!({"name": "a".repeat(256), "ownerEmail": get_random_email()}),
            "Validation error: Max name length is 255 characters",
        ),
        (
            json!({"name": "Slava 4", "ownerEmail": "not-an-email"}),
            "Validation error: Invalid email address: not-an-email",
        ),
    ];

    for (test_case, expected_error) in test_cases.iter() {
        let response = app.post_camps_new(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
        assert_eq!(
            response
                .json::<ErrorResponse>()
                .await
                .expect("Could not deserialise response body to ErrorResponse")
                .error,
            *expected_error
        );
    }
}
