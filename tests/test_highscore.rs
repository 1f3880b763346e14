use space_shooter::highscore::{FileHighScore, HighScoreStore};

fn store_in(dir: &tempfile::TempDir) -> FileHighScore {
    FileHighScore::new(dir.path().join("highscore.txt"))
}

#[test]
fn missing_file_reads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(store_in(&dir).load(), 0);
}

#[test]
fn garbage_reads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "not a number").unwrap();
    assert_eq!(store.load(), 0);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "  1250\n").unwrap();
    assert_eq!(store.load(), 1250);
}

#[test]
fn only_a_better_score_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);

    assert!(store.save(300).unwrap());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "300");

    assert!(!store.save(300).unwrap());
    assert!(!store.save(120).unwrap());
    assert_eq!(store.load(), 300);

    assert!(store.save(301).unwrap());
    assert_eq!(store.load(), 301);
}

#[test]
fn zero_never_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    assert!(!store.save(0).unwrap());
    assert!(!store.path().exists());
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHighScore::new(dir.path().join("missing").join("highscore.txt"));
    assert!(store.save(10).is_err());
}
