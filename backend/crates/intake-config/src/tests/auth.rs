use crate::Config;
use crate::tests::setup_config_dir;

use serial_test::serial;

const TENANT_BLOCK: &str = r#"
[[tenants]]
id = "11111111-1111-1111-1111-111111111111"
name = "Acme"
"#;

#[test]
#[serial]
fn given_missing_internal_secret_when_validate_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), TENANT_BLOCK).unwrap();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let message = result.unwrap_err().to_string();
    assert!(message.contains("auth.internal.secret"));
}

#[test]
#[serial]
fn given_short_internal_secret_when_validate_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        &format!(
            r#"
[auth.internal]
secret = "too-short"
{}"#,
            TENANT_BLOCK
        ),
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn given_external_issuer_without_key_when_validate_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        &format!(
            r#"
[auth.internal]
secret = "0123456789abcdef0123456789abcdef"

[auth.external]
issuer = "https://idp.example.com/"
{}"#,
            TENANT_BLOCK
        ),
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    let message = result.unwrap_err().to_string();
    assert!(message.contains("auth.external.public_key_path"));
}

#[test]
#[serial]
fn given_external_issuer_with_existing_key_when_validate_then_ok() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("idp.pem"), "---").unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        &format!(
            r#"
[auth.internal]
secret = "0123456789abcdef0123456789abcdef"

[auth.external]
issuer = "https://idp.example.com/"
audience = "intake-api"
public_key_path = "idp.pem"
{}"#,
            TENANT_BLOCK
        ),
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert!(config.validate().is_ok());
}
