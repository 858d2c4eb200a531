use crate::helpers::{
    add_new_camp, get_json_response_body, get_random_email, TestApp,
};
use camp_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_owned_and_shared_camps(app: &mut TestApp) {
    let owner = get_random_email();
    let member = get_random_email();

    let own = add_new_camp(app, &owner, "Own camp").await;
    let shared = add_new_camp(app, &get_random_email(), "Shared camp").await;
    let _other = add_new_camp(app, &get_random_email(), "Other camp").await;

    let response = app
        .post_camps_join(&json!({"code": shared["code"], "email": member}))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_camps_list(&owner).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["camps"].as_array().unwrap().len(), 1);
    assert_eq!(body["camps"][0]["id"], own["id"]);

    let response = app.get_camps_list(&member).await;
    let body = get_json_response_body(response).await;
    assert_eq!(body["camps"].as_array().unwrap().len(), 1);
    assert_eq!(body["camps"][0]["id"], shared["id"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_empty_list_for_unknown_email(app: &mut TestApp) {
    let response = app.get_camps_list(&get_random_email()).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(response).await,
        json!({"camps": []})
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_no_query_param(app: &mut TestApp) {
    let response = app
        .http_client
        .get(format!("{}/camps/list", &app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Failed to deserialize query string: missing field `email`"
    );
}
