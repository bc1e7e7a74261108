use projfind_core::predicate::{MatchPredicate, WordGroup};
use projfind_core::types::{ProjectRecord, SearchMode, SearchRequest};

fn record(title: &str, year: &str, abstract_text: &str) -> ProjectRecord {
    ProjectRecord {
        title: title.to_string(),
        year: year.to_string(),
        abstract_text: abstract_text.to_string(),
        supervisor: "Dr. A".to_string(),
        student: "B".to_string(),
    }
}

#[test]
fn groups_are_anded_and_candidates_ored() {
    let r = record("Car Detection System", "2023", "A system to detect vehicles using cameras.");
    let both = MatchPredicate::new(
        vec![
            WordGroup::new("car", vec!["car".into()]),
            WordGroup::new("auto", vec!["auto".into(), "camera".into()]),
        ],
        None,
    );
    assert!(both.matches(&r));

    let missing = MatchPredicate::new(
        vec![WordGroup::new("car", vec!["car".into()]), WordGroup::new("boat", vec!["boat".into()])],
        None,
    );
    assert!(!missing.matches(&r));
}

#[test]
fn containment_is_case_insensitive_over_title_and_abstract() {
    let r = record("Data Structures", "2022", "TREES and graphs");
    let p = MatchPredicate::new(vec![WordGroup::new("trees", vec!["trees".into()])], None);
    assert!(p.matches(&r));
    let p = MatchPredicate::new(vec![WordGroup::new("DATA", vec!["DATA".into()])], None);
    assert!(p.matches(&r));
}

#[test]
fn year_filter_is_exact_equality() {
    let r = record("Car Detection System", "2023", "");
    let p = MatchPredicate::new(vec![], Some("2023".into()));
    assert!(p.matches(&r));
    let p = MatchPredicate::new(vec![], Some("202".into()));
    assert!(!p.matches(&r));
    let blank = MatchPredicate::new(vec![], Some("  ".into()));
    assert_eq!(blank.year, None);
}

#[test]
fn empty_candidate_group_matches_everything() {
    let r = record("Anything", "2020", "");
    let p = MatchPredicate::new(vec![WordGroup::new("x", vec![])], None);
    assert!(p.matches(&r));
    assert!(MatchPredicate::match_all().matches(&r));
}

#[test]
fn request_tokenizes_on_whitespace_and_drops_blank_year() {
    let req = SearchRequest::new("  smart   parking\tsystem ", Some(" "), SearchMode::Exact);
    assert_eq!(req.words(), vec!["smart", "parking", "system"]);
    assert_eq!(req.year, None);
    assert!(SearchRequest::new("   ", None, SearchMode::Smart).words().is_empty());
}

#[test]
fn search_mode_parses_known_names_only() {
    assert_eq!("Exact".parse::<SearchMode>().unwrap(), SearchMode::Exact);
    assert_eq!("smart".parse::<SearchMode>().unwrap(), SearchMode::Smart);
    assert!("fuzzy".parse::<SearchMode>().is_err());
    assert_eq!(SearchMode::default(), SearchMode::Smart);
}
