use projfind_core::config::BANNER_KEY;
use projfind_core::predicate::{MatchPredicate, WordGroup};
use projfind_core::traits::{CorpusStore, SettingsStore};
use projfind_core::types::ProjectRecord;
use projfind_store::sqlite::{compile_predicate, MAX_BOUND_PARAMS};
use projfind_store::{MemoryCorpusStore, SqliteCorpusStore};

const BANNER: &str = "Data updated up to Sesi Jun 2025";

fn record(title: &str, year: &str, abstract_text: &str) -> ProjectRecord {
    ProjectRecord {
        title: title.to_string(),
        year: year.to_string(),
        abstract_text: abstract_text.to_string(),
        supervisor: "Dr. A".to_string(),
        student: "B".to_string(),
    }
}

fn corpus() -> Vec<ProjectRecord> {
    vec![
        record("Car Detection System", "2023", "A system to detect vehicles using cameras."),
        record("Library Booking App", "2022", "Mobile app for booking study rooms."),
        record("Smart Parking", "2023", "Detects free AUTOMOBILE bays with sensors."),
        record("ÉCOLE Portal", "2021", "Student portal"),
    ]
}

fn words(groups: &[&[&str]], year: Option<&str>) -> MatchPredicate {
    let groups = groups
        .iter()
        .map(|cands| WordGroup::new(cands[0], cands.iter().map(|c| c.to_string()).collect()))
        .collect();
    MatchPredicate::new(groups, year.map(ToString::to_string))
}

fn titles(rows: &[ProjectRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn sqlite_query_full_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SqliteCorpusStore::open(tmp.path().join("projfind.db"), BANNER).expect("open");
    assert_eq!(store.insert(&corpus()).expect("insert"), 4);
    assert_eq!(store.count().unwrap(), 4);

    let rows = store.query(&words(&[&["car"]], None)).unwrap();
    assert_eq!(titles(&rows), vec!["Car Detection System"]);

    let rows = store.query(&words(&[&["car", "automobile"]], None)).unwrap();
    assert_eq!(titles(&rows), vec!["Car Detection System", "Smart Parking"]);

    let rows = store.query(&words(&[&["car", "automobile"], &["sensors"]], None)).unwrap();
    assert_eq!(titles(&rows), vec!["Smart Parking"]);

    let rows = store.query(&words(&[&["system"]], Some("2023"))).unwrap();
    assert_eq!(titles(&rows), vec!["Car Detection System"]);

    let rows = store.query(&words(&[&["system"]], Some("1999"))).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn sqlite_folds_unicode_case() {
    let store = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    store.insert(&corpus()).unwrap();
    let rows = store.query(&words(&[&["école"]], None)).unwrap();
    assert_eq!(titles(&rows), vec!["ÉCOLE Portal"]);
}

#[test]
fn sqlite_treats_like_wildcards_literally() {
    let store = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    store.insert(&[record("100% Coverage", "2024", ""), record("Plain", "2024", "")]).unwrap();
    let rows = store.query(&words(&[&["%"]], None)).unwrap();
    assert_eq!(titles(&rows), vec!["100% Coverage"]);
    let rows = store.query(&words(&[&["_"]], None)).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn sqlite_matches_memory_store() {
    let sqlite = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    sqlite.insert(&corpus()).unwrap();
    let memory = MemoryCorpusStore::with_records(corpus());

    let predicates = [
        MatchPredicate::match_all(),
        words(&[&["detect"]], None),
        words(&[&["APP", "portal"]], None),
        words(&[&["s"], &["a"]], Some("2023")),
        MatchPredicate::new(vec![WordGroup::new("x", vec![])], Some("2022".into())),
    ];
    for p in &predicates {
        assert_eq!(sqlite.query(p).unwrap(), memory.query(p).unwrap(), "predicate {:?}", p);
    }
    assert_eq!(sqlite.years().unwrap(), memory.years().unwrap());
}

#[test]
fn compile_predicate_binds_candidates_and_year() {
    let (sql, params) = compile_predicate(&words(&[&["Car", "auto"], &["x"]], Some("2023")));
    assert_eq!(sql.matches('?').count(), params.len());
    assert_eq!(params, vec!["car", "car", "auto", "auto", "x", "x", "2023"]);
    assert!(sql.ends_with("AND year = ?"));

    let (sql, params) = compile_predicate(&MatchPredicate::match_all());
    assert_eq!(sql, "1=1");
    assert!(params.is_empty());
}

#[test]
fn years_are_distinct_and_newest_first() {
    let store = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    store.insert(&corpus()).unwrap();
    assert_eq!(store.years().unwrap(), vec!["2023", "2022", "2021"]);
}

#[test]
fn banner_is_seeded_once_and_can_be_replaced() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("projfind.db");
    {
        let store = SqliteCorpusStore::open(&path, BANNER).unwrap();
        assert_eq!(store.get(BANNER_KEY).unwrap().as_deref(), Some(BANNER));
        store.set(BANNER_KEY, "Data updated up to Sesi Dec 2025").unwrap();
    }
    let reopened = SqliteCorpusStore::open(&path, BANNER).unwrap();
    assert_eq!(reopened.get(BANNER_KEY).unwrap().as_deref(), Some("Data updated up to Sesi Dec 2025"));
    assert_eq!(reopened.get("missing").unwrap(), None);
}

#[test]
fn long_queries_match_the_memory_store() {
    let rows = vec![record("a", "2024", "a"), record("b", "2024", "b")];
    let sqlite = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    sqlite.insert(&rows).unwrap();
    let memory = MemoryCorpusStore::with_records(rows);

    let repeated = MatchPredicate::new(vec![WordGroup::new("a", vec!["a".to_string()]); 1200], None);
    let many_words: Vec<WordGroup> =
        (0..1200).map(|i| WordGroup::new(format!("w{i}"), vec!["a".to_string(), format!("w{i}")])).collect();
    let many_words = MatchPredicate::new(many_words, Some("2024".into()));
    let wide_group = MatchPredicate::new(
        vec![WordGroup::new("x", (0..1500).map(|i| format!("zz{i}")).chain(["b".to_string()]).collect())],
        None,
    );

    for p in [&repeated, &many_words, &wide_group] {
        let got = sqlite.query(p).expect("long predicate");
        assert_eq!(got, memory.query(p).unwrap());
        assert_eq!(got.len(), 1);
    }
}

#[test]
fn predicates_past_the_bind_limit_are_filtered_in_process() {
    let sqlite = SqliteCorpusStore::open_in_memory(BANNER).unwrap();
    sqlite.insert(&[record("needle", "2024", ""), record("needle", "2023", ""), record("hay", "2024", "")]).unwrap();
    let candidates: Vec<String> = (0..MAX_BOUND_PARAMS).map(|i| format!("q{i}")).chain(["NEEDLE".to_string()]).collect();
    let p = MatchPredicate::new(vec![WordGroup::new("needle", candidates)], Some("2024".into()));
    assert!(p.check_count() > MAX_BOUND_PARAMS);

    let rows = sqlite.query(&p).expect("oversized predicate");
    assert_eq!(titles(&rows), vec!["needle"]);
    assert_eq!(rows[0].year, "2024");
}

#[test]
fn compiled_trees_stay_shallow() {
    let groups = (0..1024).map(|i| WordGroup::new(format!("w{i}"), vec![format!("w{i}")])).collect();
    let (sql, params) = compile_predicate(&MatchPredicate::new(groups, None));
    assert_eq!(params.len(), 2048);
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for c in sql.chars() {
        match c {
            '(' => { depth += 1; deepest = deepest.max(depth); }
            ')' => depth -= 1,
            _ => {}
        }
    }
    assert!(deepest < 20, "nesting depth {deepest}");
}
