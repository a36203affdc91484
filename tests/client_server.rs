use axum::Router;
use squares::{KeyRequest, MemoryStore, SquaresClient, SquaresError, SquaresServer, UpsertRequest};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// starts a server with a memory engine on an ephemeral port and returns a client for it
fn start_server(rt: &Runtime) -> SquaresClient {
    let listener = rt
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    rt.spawn(SquaresServer::new(MemoryStore::new()).serve(listener));
    SquaresClient::new(addr)
}

#[test]
fn client_round_trip() {
    let rt = Runtime::new().unwrap();
    let client = start_server(&rt);
    let target = KeyRequest::new("infinityOne", "a@b.com");

    let msg = client
        .set(&UpsertRequest::new(
            target.clone(),
            "1001",
            "financial",
            Some("test".to_string()),
        ))
        .unwrap();
    assert_eq!(msg, "Entity infinityOne/a@b.com saved.");

    let entity = client.get(&target).unwrap();
    assert_eq!(entity.squareid, "1001");
    assert_eq!(entity.description.as_deref(), Some("test"));

    assert_eq!(
        client.remove(&target).unwrap(),
        "Entity infinityOne/a@b.com deleted."
    );

    match client.get(&target) {
        Err(SquaresError::Remote(msg)) => {
            assert_eq!(msg, "No entity found for key infinityOne/a@b.com.")
        }
        other => panic!("expected a remote not-found error, got {:?}", other),
    }
}

#[test]
fn client_reports_validation_errors() {
    let rt = Runtime::new().unwrap();
    let client = start_server(&rt);

    let err = client.get(&KeyRequest::default()).unwrap_err();
    assert!(err.to_string().starts_with("Key not provided"));
}

#[test]
fn client_reports_status_of_foreign_error_bodies() {
    let rt = Runtime::new().unwrap();
    let listener = rt
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    // a server without any of the squares routes answers every request with an empty 404
    rt.spawn(async move { axum::serve(listener, Router::new()).await });

    match SquaresClient::new(addr).get(&KeyRequest::new("infinityOne", "a@b.com")) {
        Err(SquaresError::Remote(msg)) => assert!(msg.starts_with("404"), "got {}", msg),
        other => panic!("expected a remote error, got {:?}", other),
    }
}
