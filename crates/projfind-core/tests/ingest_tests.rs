use std::fs;
use tempfile::TempDir;

use projfind_core::ingest::{allowed_file, CsvIngestor};

#[test]
fn process_file_reads_named_columns() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("projects.csv");
    fs::write(
        &file_path,
        "title,year,abstract,supervisor,student\nCar Detection System,2023,\"A system to detect vehicles, using cameras.\",Dr. A,B\n",
    )
    .unwrap();

    let records = CsvIngestor::new().process_file(&file_path).expect("process");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Car Detection System");
    assert_eq!(records[0].year, "2023");
    assert_eq!(records[0].abstract_text, "A system to detect vehicles, using cameras.");
    assert_eq!(records[0].supervisor, "Dr. A");
    assert_eq!(records[0].student, "B");
}

#[test]
fn missing_columns_become_empty_and_extra_columns_are_ignored() {
    let csv = "student,title,notes\nAli,Library Kiosk,ignored\n";
    let records = CsvIngestor::new().process_reader(csv.as_bytes()).expect("process");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Library Kiosk");
    assert_eq!(records[0].student, "Ali");
    assert_eq!(records[0].year, "");
    assert_eq!(records[0].abstract_text, "");
}

#[test]
fn process_path_rejects_non_csv_files() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("projects.txt");
    fs::write(&file_path, "title\nx\n").unwrap();

    assert!(CsvIngestor::new().process_path(&file_path).is_err());
}

#[test]
fn process_directory_reads_every_csv_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b.csv"), "title,year\nSecond,2024\n").unwrap();
    fs::write(dir.join("a.csv"), "title,year\nFirst,2023\n").unwrap();
    fs::write(dir.join("readme.md"), "not data").unwrap();

    let records = CsvIngestor::new().process_path(dir).expect("process dir");

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[test]
fn allowed_file_checks_extension_case_insensitively() {
    assert!(allowed_file("upload.CSV"));
    assert!(allowed_file("a.b.csv"));
    assert!(!allowed_file("csv"));
    assert!(!allowed_file("data.xlsx"));
}
