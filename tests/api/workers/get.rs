use crate::helpers::{add_camp, add_worker, get_json_response_body, TestApp};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_for_existing_worker(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let worker_id = add_worker(app, &camp_id, "Ted", "A", None).await;

    let response = app.get_worker(&worker_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["id"], worker_id.as_str());
    assert_eq!(body["campId"], camp_id.as_str());
    assert_eq!(body["registrationNumber"], "REG-Ted");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_worker(app: &mut TestApp) {
    let response = app
        .get_worker("60d8e457-8934-48ce-9d16-f503bd7ef085")
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_query_param(app: &mut TestApp) {
    let response = app.get_worker("ted").await;
    assert_eq!(response.status().as_u16(), 400);
}
