use std::fs;
use std::path::PathBuf;

use blockfall::ranking::{Ranking, RankingStore, SCORE_PATH_ENV};
use blockfall::types::GameMode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ScoreFile {
    normal_high_score: u32,
    normal_ranking: Vec<u32>,
    time_attack_high_score: u32,
    time_attack_ranking: Vec<u32>,
}

fn temp_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("blockfall-it-{}-{}", std::process::id(), name));
    path
}

#[test]
fn saved_file_uses_documented_fields() {
    let path = temp_file("fields.json");
    let store = RankingStore::new(&path);

    let mut ranking = Ranking::default();
    for score in [120, 4000, 860] {
        ranking.record(GameMode::Normal, score);
    }
    ranking.record(GameMode::TimeAttack, 75);
    store.save(&ranking).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let file: ScoreFile = serde_json::from_str(&text).unwrap();
    assert_eq!(file.normal_high_score, 4000);
    assert_eq!(file.normal_ranking, vec![4000, 860, 120]);
    assert_eq!(file.time_attack_high_score, 75);
    assert_eq!(file.time_attack_ranking, vec![75]);

    let _ = fs::remove_file(&path);
}

#[test]
fn load_sorts_and_truncates_hand_edited_file() {
    let path = temp_file("edited.json");
    fs::write(
        &path,
        r#"{"normal_high_score":1,"normal_ranking":[5,60,7,80,9,100,1]}"#,
    )
    .unwrap();

    let ranking = RankingStore::new(&path).load();
    assert_eq!(ranking.scores(GameMode::Normal), &[100, 80, 60, 9, 7]);
    assert_eq!(ranking.high_score(GameMode::Normal), 100);
    assert!(ranking.scores(GameMode::TimeAttack).is_empty());

    let _ = fs::remove_file(&path);
}

#[test]
fn from_env_honors_override() {
    let path = temp_file("env.json");
    std::env::set_var(SCORE_PATH_ENV, &path);
    let store = RankingStore::from_env();
    std::env::remove_var(SCORE_PATH_ENV);
    assert_eq!(store.path(), path.as_path());
}
