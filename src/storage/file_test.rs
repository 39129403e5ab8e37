use super::*;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("portal-file-storage-{}", uuid::Uuid::new_v4()))
}

#[test]
fn missing_directory_reads_as_absent() {
    let storage = FileStorage::new(scratch_dir());
    assert_eq!(storage.get_item("websiteSettings").unwrap(), None);
    assert!(!storage.dir().exists());
}

#[test]
fn set_creates_directory_and_round_trips() {
    let dir = scratch_dir();
    let storage = FileStorage::new(&dir);
    storage.set_item("leaveRequests", "[1,2]").unwrap();

    assert!(dir.join("leaveRequests.json").is_file());
    assert!(!dir.join("leaveRequests.json.tmp").exists());
    assert_eq!(storage.get_item("leaveRequests").unwrap().as_deref(), Some("[1,2]"));

    storage.remove_item("leaveRequests").unwrap();
    storage.remove_item("leaveRequests").unwrap();
    assert_eq!(storage.get_item("leaveRequests").unwrap(), None);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn path_like_keys_are_rejected() {
    let storage = FileStorage::new(scratch_dir());
    for key in ["", "../etc", "a/b", "a.b"] {
        let err = storage.set_item(key, "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
    }
}
