//! Runs against the PostgreSQL stores. Each test creates its own database on
//! the server at `DATABASE_URL`, so they only run with `--ignored`.

use crate::helpers::{
    add_camp, add_new_camp, add_room, add_worker, get_json_response_body,
    get_random_email, PostgresTestApp,
};
use camp_manager::{
    domain::{
        parse_entry_date, Camp, CampCode, CampFilter, CampId, CampName,
        CampStore, Capacity, Email, ProjectTag, RegistrationNumber, Room,
        RoomNumber, RoomStore, StoreError, Worker, WorkerName, WorkerStore,
    },
    services::data_stores::{
        PostgresCampStore, PostgresRoomStore, PostgresWorkerStore,
    },
};
use serde_json::json;
use test_context::test_context;

fn get_test_room(camp_id: CampId, number: &str, capacity: i64) -> Room {
    Room::new(
        camp_id,
        RoomNumber::parse(number).unwrap(),
        Capacity::parse(capacity).unwrap(),
        ProjectTag::parse("Slava 4").unwrap(),
    )
}

fn get_test_worker(camp_id: CampId, name: &str) -> Worker {
    Worker::new(
        camp_id,
        WorkerName::parse(name).unwrap(),
        RegistrationNumber::parse(&format!("REG-{name}")).unwrap(),
        ProjectTag::parse("Slava 4").unwrap(),
        parse_entry_date("2024-03-01").unwrap(),
    )
}

fn numbers(rooms: &[Room]) -> Vec<&str> {
    rooms.iter().map(|room| room.number.as_ref().as_str()).collect()
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_move_worker_and_report(ctx: &mut PostgresTestApp) {
    let app = &ctx.app;
    let camp_id = add_camp(app).await;
    let from_room_id = add_room(app, &camp_id, "101", 2, "A").await;
    let to_room_id = add_room(app, &camp_id, "102", 1, "B").await;
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

    let body =
        get_json_response_body(app.get_rooms_list(&camp_id, None).await).await;
    assert_eq!(body["rooms"][0]["id"], from_room_id.as_str());
    assert_eq!(body["rooms"][0]["workers"], json!([]));
    assert_eq!(body["rooms"][1]["id"], to_room_id.as_str());
    assert_eq!(body["rooms"][1]["workers"], json!([worker_id]));

    let body = get_json_response_body(app.get_worker(&worker_id).await).await;
    assert_eq!(body["roomId"], to_room_id.as_str());

    let body = get_json_response_body(app.get_camp_report(&camp_id).await).await;
    assert_eq!(body["occupiedBeds"], 1);
    assert_eq!(body["mostOccupiedRoom"], "102");
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_delete_camp_with_rooms_and_workers(ctx: &mut PostgresTestApp) {
    let owner = get_random_email();
    let camp = add_new_camp(&ctx.app, &owner, "Slava 4").await;
    let camp_id = camp["id"].as_str().unwrap();
    let room_id = add_room(&ctx.app, camp_id, "101", 2, "A").await;
    add_worker(&ctx.app, camp_id, "Ted", "A", Some(&room_id)).await;

    let response = ctx.app.delete_camp(camp_id, &owner).await;
    assert_eq!(response.status().as_u16(), 200);

    let camp_id = CampId::parse(camp_id).unwrap();
    let rooms = PostgresRoomStore::new(ctx.pg_pool.clone());
    let workers = PostgresWorkerStore::new(ctx.pg_pool.clone());
    assert_eq!(rooms.list_rooms(&camp_id).await, Ok(vec![]));
    assert_eq!(workers.list_workers(&camp_id).await, Ok(vec![]));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_keep_room_order_across_updates(ctx: &mut PostgresTestApp) {
    let mut store = PostgresRoomStore::new(ctx.pg_pool.clone());
    let camp_id = CampId::default();
    let mut rooms: Vec<Room> = ["103", "101", "102"]
        .iter()
        .map(|number| get_test_room(camp_id, number, 2))
        .collect();
    for room in rooms.iter() {
        store.put_room(room.clone()).await.unwrap();
    }
    store
        .put_room(get_test_room(CampId::default(), "201", 2))
        .await
        .unwrap();

    rooms[1].capacity = Capacity::parse(3).unwrap();
    rooms[1].workers = vec![
        get_test_worker(camp_id, "Ted").id,
        get_test_worker(camp_id, "Dougal").id,
    ];
    store.put_room(rooms[1].clone()).await.unwrap();

    let listed = store.list_rooms(&camp_id).await.unwrap();
    assert_eq!(numbers(&listed), vec!["103", "101", "102"]);
    assert_eq!(listed, rooms);
    assert_eq!(store.get_room(&rooms[1].id).await, Ok(rooms[1].clone()));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_restore_deleted_rooms_in_place(ctx: &mut PostgresTestApp) {
    let mut store = PostgresRoomStore::new(ctx.pg_pool.clone());
    let camp_id = CampId::default();
    let rooms: Vec<Room> = ["101", "102", "103"]
        .iter()
        .map(|number| get_test_room(camp_id, number, 2))
        .collect();
    for room in rooms.iter() {
        store.put_room(room.clone()).await.unwrap();
    }

    let first = store.delete_room(&rooms[0].id).await.unwrap();
    let second = store.delete_room(&rooms[1].id).await.unwrap();
    assert_eq!(store.delete_room(&rooms[1].id).await, Err(StoreError::NotFound));
    assert_eq!(store.get_room(&rooms[0].id).await, Err(StoreError::NotFound));

    store.restore_room(rooms[1].clone(), second).await.unwrap();
    store.restore_room(rooms[0].clone(), first).await.unwrap();
    store.put_room(get_test_room(camp_id, "104", 2)).await.unwrap();

    let listed = store.list_rooms(&camp_id).await.unwrap();
    assert_eq!(numbers(&listed), vec!["101", "102", "103", "104"]);
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_store_and_restore_workers(ctx: &mut PostgresTestApp) {
    let mut store = PostgresWorkerStore::new(ctx.pg_pool.clone());
    let camp_id = CampId::default();
    let room = get_test_room(camp_id, "101", 2);
    let mut workers: Vec<Worker> = ["Ted", "Dougal", "Jack"]
        .iter()
        .map(|name| get_test_worker(camp_id, name))
        .collect();
    workers[0].room_id = Some(room.id);
    for worker in workers.iter() {
        store.put_worker(worker.clone()).await.unwrap();
    }

    assert_eq!(store.get_worker(&workers[0].id).await, Ok(workers[0].clone()));
    assert_eq!(store.get_worker(&workers[1].id).await, Ok(workers[1].clone()));

    let position = store.delete_worker(&workers[0].id).await.unwrap();
    assert_eq!(
        store.delete_worker(&workers[0].id).await,
        Err(StoreError::NotFound)
    );
    store
        .restore_worker(workers[0].clone(), position)
        .await
        .unwrap();

    assert_eq!(store.list_workers(&camp_id).await, Ok(workers));
    assert_eq!(store.list_workers(&CampId::default()).await, Ok(vec![]));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "needs a PostgreSQL server at DATABASE_URL"]
async fn should_filter_and_delete_camps(ctx: &mut PostgresTestApp) {
    let mut store = PostgresCampStore::new(ctx.pg_pool.clone());
    let owner = Email::parse("owner@example.com").unwrap();
    let member = Email::parse("member@example.com").unwrap();
    let mut shared = Camp::new(
        CampName::parse("Slava 4").unwrap(),
        Some("Main site".to_string()),
        owner.clone(),
        CampCode::generate(),
    );
    shared.share_with(member.clone());
    let private = Camp::new(
        CampName::parse("Slava 2-3").unwrap(),
        None,
        owner.clone(),
        CampCode::generate(),
    );
    store.put_camp(shared.clone()).await.unwrap();
    store.put_camp(private.clone()).await.unwrap();

    assert_eq!(store.get_camp(&shared.id).await, Ok(shared.clone()));
    assert_eq!(
        store.list_camps(&CampFilter::AccessibleBy(owner)).await,
        Ok(vec![shared.clone(), private.clone()])
    );
    assert_eq!(
        store.list_camps(&CampFilter::AccessibleBy(member)).await,
        Ok(vec![shared.clone()])
    );
    assert_eq!(
        store
            .list_camps(&CampFilter::Code(private.code.clone()))
            .await,
        Ok(vec![private.clone()])
    );

    assert_eq!(store.delete_camp(&shared.id).await, Ok(()));
    assert_eq!(store.delete_camp(&shared.id).await, Err(StoreError::NotFound));
    assert_eq!(
        store.list_camps(&CampFilter::All).await,
        Ok(vec![private])
    );
}
