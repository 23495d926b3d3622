use geodns_atlas::domain::model::DatasetFiles;
use geodns_atlas::{AtlasEngine, AtlasError, DatasetStore, LocalDataSource};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_load_real_directory_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "country_code_map.json", r#"{"us": "United States", "de": "Germany"}"#);
    write(root, "01-05-2016/country-country.json", r#"{"a.com": {"US": {"DE": 1}}}"#);
    write(root, "12-30-2015/country-country.json", r#"{"a.com": {"US": {"DE": 2}}}"#);
    write(root, "12-30-2015/clusters.json", r#"[["a.com"]]"#);
    write(root, ".DS_Store", "not json");

    let store = DatasetStore::load(&LocalDataSource::new(root), &DatasetFiles::default())
        .await
        .unwrap();

    let days: Vec<&str> = store.days().iter().map(|d| d.key()).collect();
    assert_eq!(days, vec!["12-30-2015", "01-05-2016"]);
    assert!(store.has_day("01-05-2016"));
    assert_eq!(store.country_codes().name_of("us"), Some("United States"));
    assert!(store.clusters("12-30-2015").is_some());
}

#[tokio::test]
async fn test_malformed_day_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "06-29-2015/country-country.json", r#"{"a.com": {"US": {"DE": 1}}}"#);
    write(root, "06-30-2015/clusters.json", r#"[["a.com"],"#);

    let err = AtlasEngine::load(&LocalDataSource::new(root), &DatasetFiles::default())
        .await
        .unwrap_err();

    match err {
        AtlasError::JsonError { path, .. } => assert_eq!(path, "06-30-2015/clusters.json"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_global_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "country_code_map.json", "{");

    let err = DatasetStore::load(&LocalDataSource::new(root), &DatasetFiles::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AtlasError::JsonError { .. }));
}

#[tokio::test]
async fn test_shape_mismatch_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "06-29-2015/country-country.json", r#"{"a.com": {"US": {"DE": null}}}"#);

    let err = DatasetStore::load(&LocalDataSource::new(root), &DatasetFiles::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AtlasError::DatasetShapeError { .. }));
}

#[tokio::test]
async fn test_non_date_directory_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "backup/country-country.json", "{}");

    let err = DatasetStore::load(&LocalDataSource::new(root), &DatasetFiles::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AtlasError::InvalidDayError { .. }));
}

#[tokio::test]
async fn test_missing_data_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();

    let err = DatasetStore::load(
        &LocalDataSource::new(temp_dir.path().join("nope")),
        &DatasetFiles::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AtlasError::IoError(_)));
}

#[tokio::test]
async fn test_empty_root_loads_empty_store() {
    let temp_dir = TempDir::new().unwrap();

    let engine = AtlasEngine::load(&LocalDataSource::new(temp_dir.path()), &DatasetFiles::default())
        .await
        .unwrap();

    assert!(engine.list_days().is_empty());
    assert!(engine.country_code_map().is_empty());
    assert!(engine.chart_for_domain("all", None).is_empty());
}
