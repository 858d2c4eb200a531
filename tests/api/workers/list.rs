use crate::helpers::{
    add_camp, add_room, add_worker, get_json_response_body, TestApp,
};
use serde_json::{json, Value};
use test_context::test_context;

fn names(body: &Value) -> Vec<&str> {
    body["workers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect()
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_workers_in_creation_order(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    let other_camp_id = add_camp(app).await;

    let response = app.get_workers_list(&camp_id, None).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(response).await,
        json!({"campId": camp_id, "workers": []})
    );

    let room_id = add_room(app, &camp_id, "101", 2, "A").await;
    add_worker(app, &camp_id, "Ted", "A", None).await;
    add_worker(app, &camp_id, "Dougal", "A", Some(&room_id)).await;
    add_worker(app, &camp_id, "Jack", "B", None).await;
    add_worker(app, &other_camp_id, "Mrs Doyle", "B", None).await;

    let body = get_json_response_body(app.get_workers_list(&camp_id, None).await).await;
    assert_eq!(names(&body), vec!["Ted", "Dougal", "Jack"]);
    assert_eq!(body["workers"][1]["roomId"], room_id.as_str());
    assert_eq!(body["workers"][0]["roomId"], json!(null));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_filter_by_name_or_registration_number(app: &mut TestApp) {
    let camp_id = add_camp(app).await;
    add_worker(app, &camp_id, "Ted", "A", None).await;
    add_worker(app, &camp_id, "Dougal", "A", None).await;
    add_worker(app, &camp_id, "Father Ted", "B", None).await;

    let body =
        get_json_response_body(app.get_workers_list(&camp_id, Some("TED")).await)
            .await;
    assert_eq!(names(&body), vec!["Ted", "Father Ted"]);

    let body = get_json_response_body(
        app.get_workers_list(&camp_id, Some("reg-doug")).await,
    )
    .await;
    assert_eq!(names(&body), vec!["Dougal"]);

    let body =
        get_json_response_body(app.get_workers_list(&camp_id, Some("bishop")).await)
            .await;
    assert_eq!(body["workers"], json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_camp(app: &mut TestApp) {
    let response = app
        .get_workers_list("60d8e457-8934-48ce-9d16-f503bd7ef085", None)
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
