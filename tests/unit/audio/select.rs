use super::*;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("factreel_select_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn listing_keeps_only_mp3_and_wav() {
    let dir = scratch_dir("list");
    for name in ["b.mp3", "a.wav", "notes.txt", "cover.jpg", "c.MP3"] {
        std::fs::write(dir.join(name), b"").unwrap();
    }
    std::fs::create_dir_all(dir.join("folder.mp3")).unwrap();

    let files = list_audio_files(&dir).unwrap();
    assert_eq!(files, vec![dir.join("a.wav"), dir.join("b.mp3")]);
}

#[test]
fn listing_a_missing_directory_fails() {
    let dir = scratch_dir("missing").join("nope");
    assert!(list_audio_files(&dir).is_err());
}

#[test]
fn choosing_from_text_only_directory_fails() {
    let dir = scratch_dir("txt");
    std::fs::write(dir.join("readme.txt"), b"").unwrap();
    let files = list_audio_files(&dir).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let err = choose_audio_file(&files, &mut rng).unwrap_err();
    assert!(matches!(err, FactReelError::Validation(_)));
}

#[test]
fn choice_is_one_of_the_candidates() {
    let files = vec![PathBuf::from("a.mp3"), PathBuf::from("b.wav")];
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..32 {
        let p = choose_audio_file(&files, &mut rng).unwrap();
        assert!(files.iter().any(|f| f == p));
    }
}

#[test]
fn seeded_choice_is_reproducible() {
    let files: Vec<PathBuf> = (0..10).map(|i| PathBuf::from(format!("{i}.mp3"))).collect();
    let a = choose_audio_file(&files, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = choose_audio_file(&files, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn random_offset_stays_within_slack() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..1000 {
        let off = pick_start_offset(183.5, 10.0, AudioPlacement::RandomOffset, &mut rng);
        assert!((0.0..=173.5).contains(&off), "{off}");
    }
}

#[test]
fn short_or_equal_tracks_start_at_zero() {
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(
        pick_start_offset(4.0, 10.0, AudioPlacement::RandomOffset, &mut rng),
        0.0
    );
    assert_eq!(
        pick_start_offset(10.0, 10.0, AudioPlacement::RandomOffset, &mut rng),
        0.0
    );
}

#[test]
fn from_start_placement_ignores_slack() {
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(
        pick_start_offset(300.0, 10.0, AudioPlacement::FromStart, &mut rng),
        0.0
    );
}
