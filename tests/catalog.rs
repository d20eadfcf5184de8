//! Catalog loading tests over files on disk.

mod common;

use bibdex::catalog::marc::{encode_record, encode_record_bytes, Reader};
use bibdex::{
    check_engine, Catalog, CatalogConfig, InputFormat, LoadSummary, QueryRequest, TextEncoding,
};
use common::{make_book, marc_book, sub_a};
use std::fs::{self, File};
use std::io::BufReader;
use tempfile::TempDir;

fn write_marc(dir: &TempDir, records: &[Vec<u8>], padding: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("books.mrc");
    let mut bytes = Vec::new();
    for record in records {
        bytes.extend_from_slice(record);
        bytes.extend_from_slice(padding);
    }
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_load_marc_file_and_search() {
    let dir = TempDir::new().unwrap();
    let path = write_marc(
        &dir,
        &[
            marc_book("1990", "Ancient Rome", "history"),
            marc_book("1991", "Modern Europe", "history"),
            marc_book("1990", "Renaissance Painting", "art"),
        ],
        b"",
    );

    let mut catalog = Catalog::new(CatalogConfig::default());
    let summary = catalog
        .load(BufReader::new(File::open(&path).unwrap()))
        .unwrap();
    assert_eq!(summary, LoadSummary { loaded: 3, skipped: 0 });

    let response = catalog.find(&QueryRequest::new(Some("history"), Some("1990")));
    assert_eq!(response.total, 1);
    assert_eq!(response.docs[0].name, "Ancient Rome");
    assert_eq!(response.docs[0].id, 1);
}

#[test]
fn test_padded_records_with_skip() {
    let dir = TempDir::new().unwrap();
    let path = write_marc(
        &dir,
        &[marc_book("2001", "A", "law"), marc_book("2002", "B", "law")],
        b"\r\n",
    );

    let config = CatalogConfig {
        skip: 2,
        ..CatalogConfig::default()
    };
    let mut catalog = Catalog::new(config);
    catalog
        .load(BufReader::new(File::open(&path).unwrap()))
        .unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(check_engine(catalog.engine()).is_ok());
}

#[test]
fn test_incomplete_records_are_skipped() {
    let dir = TempDir::new().unwrap();
    let no_subject = encode_record(&[
        (100, &sub_a("20050101d1999")),
        (200, &sub_a("Untitled subject")),
    ]);
    let path = write_marc(&dir, &[no_subject, marc_book("1999", "Kept", "music")], b"");

    let mut catalog = Catalog::new(CatalogConfig::default());
    let reader = Reader::new(BufReader::new(File::open(&path).unwrap()));
    let summary = catalog.load_marc(reader).unwrap();
    assert_eq!(summary, LoadSummary { loaded: 1, skipped: 1 });
    assert_eq!(catalog.record(1).map(|b| b.name.as_str()), Some("Kept"));
}

#[test]
fn test_truncated_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut record = marc_book("1990", "Cut off", "history");
    record.truncate(record.len() - 5);
    let path = write_marc(&dir, &[record], b"");

    let mut catalog = Catalog::new(CatalogConfig::default());
    let result = catalog.load(BufReader::new(File::open(&path).unwrap()));
    assert!(result.is_err());
}

#[test]
fn test_json_catalog_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bibdex.json");
    fs::write(&config_path, r#"{"inputFormat": "json", "keywordLimit": 1}"#).unwrap();
    let config = CatalogConfig::from_file(&config_path).unwrap();
    assert_eq!(config.input_format, InputFormat::Json);

    let books = vec![
        make_book(1990, "A", &["history", "art"]),
        make_book(1990, "B", &["history"]),
    ];
    let data_path = dir.path().join("books.json");
    fs::write(&data_path, serde_json::to_string(&books).unwrap()).unwrap();

    let mut catalog = Catalog::new(config);
    catalog
        .load(BufReader::new(File::open(&data_path).unwrap()))
        .unwrap();

    let report = catalog.year_report();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].quantity, 2);
    assert_eq!(report[0].keywords.len(), 1);
    assert_eq!(report[0].keywords[0].value, "history");
    assert_eq!(report[0].keywords[0].count, 2);
}

#[test]
fn test_gb18030_file_is_searchable() {
    let dir = TempDir::new().unwrap();
    // "  $a中国" and "  $a历史" in GB18030
    let china = [b' ', b' ', 0x1F, b'a', 0xD6, 0xD0, 0xB9, 0xFA];
    let history = [b' ', b' ', 0x1F, b'a', 0xC0, 0xFA, 0xCA, 0xB7];
    let year = sub_a("20050101d1990");
    let title = sub_a("Title");
    let records: Vec<Vec<u8>> = [&china[..], &history[..]]
        .iter()
        .map(|subject| {
            encode_record_bytes(&[
                (100, year.as_bytes()),
                (200, title.as_bytes()),
                (606, *subject),
            ])
        })
        .collect();
    let path = write_marc(&dir, &records, b"");

    let mut catalog = Catalog::new(CatalogConfig::default());
    catalog
        .load(BufReader::new(File::open(&path).unwrap()))
        .unwrap();
    assert_eq!(catalog.engine().dictionary().len(), 5); // 2 ids, 1 year, 2 terms

    let response = catalog.find(&QueryRequest::new(Some("中国"), None));
    assert_eq!(response.total, 1);
    assert_eq!(response.docs[0].terms, vec!["中国"]);
    let response = catalog.find(&QueryRequest::new(Some("历史"), Some("1990")));
    assert_eq!(response.total, 1);
    assert_eq!(response.docs[0].id, 2);
}

#[test]
fn test_utf8_encoding_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write_marc(&dir, &[marc_book("1990", "书名", "历史")], b"");

    let config = CatalogConfig {
        encoding: TextEncoding::Utf8,
        ..CatalogConfig::default()
    };
    let mut catalog = Catalog::new(config);
    catalog
        .load(BufReader::new(File::open(&path).unwrap()))
        .unwrap();
    let response = catalog.find(&QueryRequest::new(Some("历史"), None));
    assert_eq!(response.total, 1);
    assert_eq!(response.docs[0].name, "书名");
}
