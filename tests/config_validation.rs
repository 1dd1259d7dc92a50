use bullet_core::selection::{BulletSelector, SelectionConfig, StrategyKind};
use bullet_core::types::SelectionError;

#[test]
fn v0_defaults() {
    let config = SelectionConfig::v0();
    assert_eq!(config.top_k, 5);
    assert_eq!(config.min_score, 0.0);
    assert_eq!(config.strategy, StrategyKind::Sort);
    assert_eq!(config, SelectionConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn from_params_rejects_non_positive_top_k() {
    for top_k in [0, -1, i64::MIN] {
        let err = SelectionConfig::from_params(top_k, 0.0, StrategyKind::Sort).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidTopK(k) if k == top_k));
    }
}

#[test]
fn from_params_rejects_nan_threshold() {
    let err = SelectionConfig::from_params(3, f64::NAN, StrategyKind::Heap).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidMinScore(s) if s.is_nan()));
}

#[test]
fn from_params_accepts_negative_thresholds() {
    let config = SelectionConfig::from_params(3, -250.0, StrategyKind::Heap).unwrap();
    assert_eq!(config.top_k, 3);
    assert_eq!(config.min_score, -250.0);
    assert_eq!(config.strategy, StrategyKind::Heap);
}

#[test]
fn infinite_thresholds_are_rejected() {
    for min_score in [f64::NEG_INFINITY, f64::INFINITY] {
        let err = SelectionConfig::from_params(2, min_score, StrategyKind::Sort).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidMinScore(s) if s == min_score));

        let config = SelectionConfig {
            min_score,
            ..SelectionConfig::v0()
        };
        assert!(matches!(
            BulletSelector::new(config),
            Err(SelectionError::InvalidMinScore(_))
        ));
    }
}

#[test]
fn accepted_config_reads_back_from_json() {
    for min_score in [-1.0e6, -250.0, 0.0, 87.5] {
        let config = SelectionConfig::from_params(2, min_score, StrategyKind::Heap).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SelectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config, "{json}");
    }
}

#[test]
fn selector_rejects_invalid_config() {
    let config = SelectionConfig {
        top_k: 0,
        ..SelectionConfig::v0()
    };
    assert!(matches!(
        BulletSelector::new(config),
        Err(SelectionError::InvalidTopK(0))
    ));
}

#[test]
fn deserialization_fills_defaults() {
    let config: SelectionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SelectionConfig::v0());

    let config: SelectionConfig =
        serde_json::from_str(r#"{"top_k": 2, "min_score": 60, "strategy": "heap"}"#).unwrap();
    assert_eq!(config.top_k, 2);
    assert_eq!(config.min_score, 60.0);
    assert_eq!(config.strategy, StrategyKind::Heap);
}

#[test]
fn deserialization_rejects_negative_top_k() {
    let result: Result<SelectionConfig, _> = serde_json::from_str(r#"{"top_k": -3}"#);
    assert!(result.is_err());
}

#[test]
fn config_serialization_is_stable() {
    let config = SelectionConfig::v0().with_strategy(StrategyKind::Heap);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"top_k":5,"min_score":0.0,"strategy":"heap"}"#);
}
