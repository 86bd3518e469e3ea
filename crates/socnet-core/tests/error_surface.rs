use socnet_core::errors::{ErrorInfo, NetError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "1")
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = NetError::Graph(sample_info("unknown-node", "node does not exist"));
    assert_eq!(err.code(), "unknown-node");
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn matrix_error_surface() {
    let err = NetError::Matrix(sample_info("not-square", "rows differ in length"));
    assert_eq!(err.info().code, "not-square");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn convert_error_surface() {
    let err = NetError::Convert(sample_info("label-mismatch", "labels differ"));
    assert_eq!(err.code(), "label-mismatch");
}

#[test]
fn generator_error_surface() {
    let err = NetError::Generator(sample_info("invalid-parameter", "nodes must be >= 2"));
    assert_eq!(err.code(), "invalid-parameter");
}

#[test]
fn analysis_error_surface() {
    let err = NetError::Analysis(sample_info("multiplex-graph", "parallel edges"));
    assert_eq!(err.code(), "multiplex-graph");
}

#[test]
fn rng_and_config_error_surface() {
    let rng = NetError::Rng(sample_info("invalid-distribution", "negative sd"));
    let config = NetError::Config(sample_info("parse-config", "bad json"));
    assert_eq!(rng.code(), "invalid-distribution");
    assert_eq!(config.code(), "parse-config");
}

#[test]
fn context_is_attached_across_families() {
    let err = NetError::Analysis(ErrorInfo::new("asymmetric-graph", "missing reverse"))
        .with_context("edge", 7);
    assert_eq!(err.info().context.get("edge"), Some(&"7".to_string()));
    let rendered = err.to_string();
    assert!(rendered.starts_with("analysis error: missing reverse (code: asymmetric-graph)"));
    assert!(rendered.contains("edge=7"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = NetError::Matrix(
        ErrorInfo::new("index-out-of-range", "row out of range").with_hint("check the size"),
    );
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Matrix\""));
    let decoded: NetError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn hint_is_attached_across_families() {
    let err = NetError::Convert(ErrorInfo::new("label-mismatch", "labels differ"))
        .with_context("matrix", 1)
        .with_hint("convert node sets separately");
    assert_eq!(err.code(), "label-mismatch");
    assert_eq!(err.info().hint.as_deref(), Some("convert node sets separately"));
    assert!(err.to_string().ends_with("| hint: convert node sets separately"));
}
