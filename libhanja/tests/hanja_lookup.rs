use libhanja::{HanjaTable, MatchKind};
use std::sync::Arc;
use std::thread;

const TABLE: &str = "\
# 한자 사전
가:家:집 가
가:歌:노래 가
가수:歌手:singer
수:手:손 수
수:水:물 수
대학:大學:university
학:學:배울 학
";

#[test]
fn lookup_kinds_agree_with_named_methods() {
    let table = HanjaTable::from_text(TABLE).unwrap();
    assert_eq!(table.lookup("가수", MatchKind::Exact), table.match_exact("가수"));
    assert_eq!(table.lookup("가수", MatchKind::Prefix), table.match_prefix("가수"));
    assert_eq!(table.lookup("가수", MatchKind::Suffix), table.match_suffix("가수"));
}

#[test]
fn prefix_and_suffix_order_longest_first() {
    let table = HanjaTable::from_text(TABLE).unwrap();

    let prefix: Vec<String> = table.match_prefix("가수").into_iter().map(|h| h.value).collect();
    assert_eq!(prefix, vec!["歌手", "家", "歌"]);

    let suffix: Vec<String> = table.match_suffix("가수").into_iter().map(|h| h.value).collect();
    assert_eq!(suffix, vec!["歌手", "手", "水"]);
}

#[test]
fn no_match_gives_empty_list_with_key() {
    let table = HanjaTable::from_text(TABLE).unwrap();
    let list = table.match_prefix("없다");
    assert!(list.is_empty());
    assert_eq!(list.key(), "없다");
}

#[test]
fn completion_walks_the_index() {
    let table = HanjaTable::from_text(TABLE).unwrap();
    assert_eq!(table.complete("가"), vec!["가", "가수"]);
    assert_eq!(table.complete("").len(), table.len());
}

#[test]
fn load_text_from_file() {
    let path = std::env::temp_dir().join(format!("hanja_lookup_{}.txt", std::process::id()));
    std::fs::write(&path, TABLE).unwrap();
    let table = HanjaTable::load_text(&path).unwrap();
    assert_eq!(table.len(), 5);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_artifacts_are_errors() {
    let dir = std::env::temp_dir();
    let result = HanjaTable::load(dir.join("no_such.fst"), dir.join("no_such.bincode"));
    assert!(result.is_err());
}

#[test]
fn table_is_shared_across_threads() {
    let table = Arc::new(HanjaTable::from_text(TABLE).unwrap().with_cache_size(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || table.match_exact("학").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    let (hits, misses) = table.cache_stats();
    assert_eq!(hits + misses, 4);
}
