use squares::{KeyRequest, RecordAdapter, SledStore, UpsertRequest};
use tempfile::TempDir;

fn target() -> KeyRequest {
    KeyRequest::new("infinityOne", "a@b.com")
}

#[test]
fn upserts_overwrite_on_disk() {
    let dir = TempDir::new().unwrap();
    let adapter = RecordAdapter::new(SledStore::open(dir.path()).unwrap());

    adapter
        .upsert(UpsertRequest::new(target(), "1001", "financial", Some("test".into())))
        .unwrap();
    adapter
        .upsert(UpsertRequest::new(target(), "2002", "financial", None))
        .unwrap();

    let entity = adapter.get(&target()).unwrap();
    assert_eq!(entity.squareid, "2002");
    assert_eq!(entity.description, None);
}

#[test]
fn entities_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let adapter = RecordAdapter::new(SledStore::open(dir.path()).unwrap());
        adapter
            .upsert(UpsertRequest::new(target(), "1001", "financial", Some("test".into())))
            .unwrap();
    }

    let adapter = RecordAdapter::new(SledStore::open(dir.path()).unwrap());
    let entity = adapter.get(&target()).unwrap();
    assert_eq!(entity.squareid, "1001");
    assert_eq!(entity.description.as_deref(), Some("test"));

    adapter.delete(&target()).unwrap();
    assert!(adapter.get(&target()).is_err());
}
