use schema_types_core::{SchemaError, Transformer};
use schema_types_formats::{FormatsConfig, FormatsError, builtin_registry};
use serde_json::json;

// ---------------------------------------------------------------------------
// Built-in formats through the transform engine
// ---------------------------------------------------------------------------

#[test]
fn test_builtin_formats_in_schema() {
    let formats = builtin_registry().unwrap();
    let ty = Transformer::new(&formats)
        .transform(&json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "email": { "type": "string", "format": "email", "maxLength": 20 },
                "created": { "type": "string", "format": "date-time" },
                "host": { "type": ["string", "null"], "format": "hostname" }
            },
            "required": ["id", "created"]
        }))
        .unwrap();

    let valid = json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "email": "ada@example.com",
        "created": "2024-01-15T10:30:00Z",
        "host": null
    });
    assert!(ty.accepts(&valid));

    let mut long_email = valid.clone();
    long_email["email"] = json!("a.very.long.name@example.com");
    assert!(!ty.accepts(&long_email));

    let mut bad_date = valid.clone();
    bad_date["created"] = json!("yesterday");
    assert!(!ty.accepts(&bad_date));

    let mut bad_host = valid;
    bad_host["host"] = json!("-nope-");
    assert!(!ty.accepts(&bad_host));
}

#[test]
fn test_format_missing_from_builtins() {
    let formats = builtin_registry().unwrap();
    let err = Transformer::new(&formats)
        .transform(&json!({"type": "string", "format": "phone"}))
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownFormat(ref name) if name == "phone"));
}

// ---------------------------------------------------------------------------
// Config files
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_drives_transform() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formats.yml");
    std::fs::write(
        &path,
        r#"
version: "1.0"
builtins: [ipv4]
patterns:
  zip-code: "^[0-9]{5}$"
"#,
    )
    .unwrap();

    let formats = FormatsConfig::load(&path).unwrap().build_registry().unwrap();
    let transformer = Transformer::new(&formats);

    let zip = transformer
        .transform(&json!({"type": "string", "format": "zip-code"}))
        .unwrap();
    assert!(zip.accepts(&json!("90210")));
    assert!(!zip.accepts(&json!("9021")));

    let ip = transformer
        .transform(&json!({"type": "array", "items": {"type": "string", "format": "ipv4"}}))
        .unwrap();
    assert!(ip.accepts(&json!(["10.0.0.1", "127.0.0.1"])));
    assert!(!ip.accepts(&json!(["10.0.0.256"])));
}

#[test]
fn test_malformed_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formats.yml");
    std::fs::write(&path, "version: [not, a, string]\n").unwrap();

    let err = FormatsConfig::load(&path).unwrap_err();
    assert!(matches!(err, FormatsError::YamlError(_)));
}
