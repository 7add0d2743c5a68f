use super::*;

#[test]
fn default_matches_hard_coded_layers() {
    let cfg = ParallaxConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.scroll_container, ".wrapper");
    assert_eq!(cfg.layers.len(), 2);

    let bg = &cfg.layers[0];
    assert_eq!(bg.key, "background");
    assert_eq!(bg.selector, ".background");
    assert_eq!(bg.speed, 0.2);
    assert_eq!(bg.base_transform.to_string(), "translateZ(-10px) scale(2)");

    let fg = &cfg.layers[1];
    assert_eq!(fg.key, "foreground");
    assert_eq!(fg.speed, 0.5);
    assert_eq!(fg.base_transform.to_string(), "translateZ(-5px) scale(1.5)");
}

#[test]
fn parses_camel_case_json() {
    let cfg = ParallaxConfig::from_json_str(
        r##"{
            "scrollContainer": "#page",
            "layers": [
                { "key": "stars", "selector": ".stars", "speed": 0.1, "baseTransform": "scale(3)" },
                { "key": "dust", "selector": ".dust", "speed": 0.7 }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.scroll_container, "#page");
    assert_eq!(cfg.layers[0].base_transform.to_string(), "scale(3)");
    assert!(cfg.layers[1].base_transform.is_identity());
}

#[test]
fn json_roundtrip_preserves_default() {
    let cfg = ParallaxConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"baseTransform\":\"translateZ(-10px) scale(2)\""));
    assert_eq!(ParallaxConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn rejects_invalid_configs() {
    let mut cfg = ParallaxConfig::default();
    cfg.layers.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = ParallaxConfig::default();
    cfg.layers[1].key = "background".to_string();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate layer key 'background'"));

    let mut cfg = ParallaxConfig::default();
    cfg.layers[0].selector = " ".to_string();
    assert!(cfg.validate().is_err());

    let mut cfg = ParallaxConfig::default();
    cfg.layers[0].speed = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = ParallaxConfig::default();
    cfg.scroll_container.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn bad_base_transform_fails_to_parse() {
    let err = ParallaxConfig::from_json_str(
        r#"{ "scrollContainer": ".w", "layers": [
            { "key": "a", "selector": ".a", "speed": 1, "baseTransform": "perspective(3px)" }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SoleilError::Serde(_)));
}
