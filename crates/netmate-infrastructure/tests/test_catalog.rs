use netmate_core::catalog::CatalogSource;
use netmate_infrastructure::{CatalogCache, ConfigStorage, CsvCatalogSource};
use std::fs;
use tempfile::TempDir;

const CATALOG_CSV: &str = "\
Issue,Symptoms,Possible_Causes,Solution_1,Solution_2,Solution_3,Solution_4
No Internet,red light,ISP outage or line fault,restart router,check cables,reset router,contact technician
Slow Speed,pages load slowly,interference,move closer to router,change WiFi channel,limit connected devices,upgrade plan
";

#[test]
fn test_load_catalog_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wifi_solution.csv");
    fs::write(&path, CATALOG_CSV).unwrap();

    let catalog = CsvCatalogSource::new(&path).load().expect("Should load catalog");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].issue, "No Internet");
    assert_eq!(catalog[0].symptoms, "red light");
    assert_eq!(catalog[1].solution(2), Some("change WiFi channel"));
}

#[test]
fn test_cache_does_not_reread_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wifi_solution.csv");
    fs::write(&path, CATALOG_CSV).unwrap();

    let cache = CatalogCache::new(CsvCatalogSource::new(&path));
    let first = cache.get().expect("Should load catalog");

    // Source disappears; cached catalog is still served.
    fs::remove_file(&path).unwrap();
    let second = cache.get().expect("Should serve cached catalog");

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

#[test]
fn test_malformed_file_is_rejected_entirely() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wifi_solution.csv");
    fs::write(&path, format!("{CATALOG_CSV}Broken row,only three,fields\n")).unwrap();

    let err = CsvCatalogSource::new(&path).load().unwrap_err();
    assert!(err.is_catalog_load());
    assert!(err.is_fatal());
}

#[test]
fn test_bundled_demo_files_load() {
    let catalog = CsvCatalogSource::parse(include_str!("../../../demos/wifi_solution.csv").as_bytes())
        .expect("Demo catalog should parse");
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog[0].issue, "No Internet");

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, include_str!("../../../demos/config.toml")).unwrap();
    let config = ConfigStorage::new(config_path).load().expect("Demo config should parse");
    assert_eq!(config.outage.timeout_secs, 10);
    assert_eq!(config.gemini.safety.len(), 4);
}
