use print_bridge::{BridgeConfig, BridgeError, ColorMode, DuplexMode, Orientation, ProductCatalog};
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bridge.json");
    std::fs::write(
        &path,
        r#"{ "sumatra_pdf": "C:\\Tools\\SumatraPDF.exe", "command_timeout_secs": 15 }"#,
    )
    .unwrap();

    let config = BridgeConfig::load(&path).await.unwrap();
    assert_eq!(config.command_timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.sumatra_pdf.to_string_lossy(), r"C:\Tools\SumatraPDF.exe");
    assert_eq!(config.lp, "lp");
    assert_eq!(config.temp_dir, None);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();

    let zero_timeout = dir.path().join("zero.json");
    std::fs::write(&zero_timeout, r#"{ "command_timeout_secs": 0 }"#).unwrap();
    assert!(matches!(
        BridgeConfig::load(&zero_timeout).await,
        Err(BridgeError::Config(_))
    ));

    let malformed = dir.path().join("malformed.json");
    std::fs::write(&malformed, "{ not json").unwrap();
    assert!(matches!(
        BridgeConfig::load(&malformed).await,
        Err(BridgeError::Config(_))
    ));

    assert!(matches!(
        BridgeConfig::load(dir.path().join("missing.json")).await,
        Err(BridgeError::Io(_))
    ));
}

#[test]
fn test_disabled_timeout() {
    let config: BridgeConfig = serde_json::from_str(r#"{ "command_timeout_secs": null }"#).unwrap();
    assert_eq!(config.command_timeout(), None);
    assert_eq!(BridgeConfig::default().command_timeout(), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_load_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(
        &path,
        r#"{
            "paperSizes": {
                "business_card": {
                    "width": 85,
                    "height": 55,
                    "orientation": "landscape",
                    "color": "grayscale",
                    "duplex": "short",
                    "copies": "10",
                    "mediaType": "Heavyweight",
                    "isCustom": true
                }
            },
            "defaultTrayMapping": { "85x55": "Manual Feed" },
            "unrelatedSetting": true
        }"#,
    )
    .unwrap();

    let catalog = ProductCatalog::load(&path).await.unwrap();
    let card = catalog.product("business_card").unwrap();

    assert_eq!(card.id, "business_card");
    assert_eq!(card.label(), "business card");
    assert_eq!(card.orientation, Orientation::Landscape);
    assert_eq!(card.color, ColorMode::Grayscale);
    assert_eq!(card.duplex, DuplexMode::ShortEdge);
    assert_eq!(card.copies, Some(10));
    assert!(card.is_custom);
    assert_eq!(card.margins(), print_bridge::Margins::zero());
    assert_eq!(
        catalog.tray_mapping().get("85x55").map(String::as_str),
        Some("Manual Feed")
    );
    assert_eq!(catalog.products().count(), 1);
}

#[tokio::test]
async fn test_malformed_catalog_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, r#"{ "paperSizes": { "a4": { "duplex": "sideways" } } }"#).unwrap();

    match ProductCatalog::load(&path).await {
        Err(BridgeError::Config(message)) => assert!(message.contains("products.json")),
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
}
