use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("factreel_naming_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(p: &Path) {
    std::fs::write(p, b"").unwrap();
}

#[test]
fn free_path_is_returned_unchanged() {
    let dir = scratch_dir("free");
    let p = dir.join("2024-01-01_daily_fact.mp4");
    assert_eq!(unique_path(&p), p);
}

#[test]
fn existing_path_gets_first_suffix() {
    let dir = scratch_dir("first");
    let videos = dir.join("videos");
    std::fs::create_dir_all(&videos).unwrap();
    let p = videos.join("2024-01-01_daily_fact.mp4");
    touch(&p);
    assert_eq!(unique_path(&p), videos.join("2024-01-01_daily_fact_1.mp4"));
}

#[test]
fn repeated_calls_on_static_fs_agree() {
    let dir = scratch_dir("idem");
    let p = dir.join("clip.mp4");
    touch(&p);
    touch(&dir.join("clip_1.mp4"));
    let a = unique_path(&p);
    let b = unique_path(&p);
    assert_eq!(a, b);
    assert_eq!(a, dir.join("clip_2.mp4"));
}

#[test]
fn creating_the_result_moves_to_higher_suffix() {
    let dir = scratch_dir("advance");
    let p = dir.join("clip.mp4");
    touch(&p);
    let first = unique_path(&p);
    touch(&first);
    let second = unique_path(&p);
    assert_eq!(first, dir.join("clip_1.mp4"));
    assert_eq!(second, dir.join("clip_2.mp4"));
}

#[test]
fn gaps_are_filled_from_the_initial_number() {
    let dir = scratch_dir("gaps");
    let p = dir.join("clip.mp4");
    touch(&p);
    touch(&dir.join("clip_1.mp4"));
    touch(&dir.join("clip_3.mp4"));
    assert_eq!(unique_path(&p), dir.join("clip_2.mp4"));
    assert_eq!(unique_path_from(&p, 3), dir.join("clip_4.mp4"));
}

#[test]
fn extensionless_names_get_plain_suffix() {
    let dir = scratch_dir("noext");
    let p = dir.join("README");
    touch(&p);
    assert_eq!(unique_path(&p), dir.join("README_1"));
}

#[test]
fn only_last_extension_is_split() {
    let dir = scratch_dir("multi");
    let p = dir.join("archive.tar.gz");
    touch(&p);
    assert_eq!(unique_path(&p), dir.join("archive.tar_1.gz"));
}
