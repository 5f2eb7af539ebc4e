use pretty_assertions::assert_eq;
use rosteria_api::config::ApiConfig;

// Environment variables are process-global, so everything that touches
// them lives in one test to keep it race-free.
#[test]
fn config_comes_from_the_environment() {
    unsafe { std::env::set_var("API_HOST", "127.0.0.1") };
    unsafe { std::env::set_var("API_PORT", "8080") };
    unsafe { std::env::set_var("DATABASE_URL", "postgres://localhost/rosteria_test") };
    unsafe { std::env::set_var("MAIL_ENDPOINT_URL", "http://mail.internal/send") };
    unsafe { std::env::set_var("PUBLIC_ORIGIN", "https://roster.example.org") };
    unsafe { std::env::set_var("API_CORS_ORIGINS", "https://a.example.org, https://b.example.org") };
    unsafe { std::env::set_var("LOG_LEVEL", "debug") };

    let config = ApiConfig::from_env().unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url, "postgres://localhost/rosteria_test");
    assert_eq!(config.mail_endpoint_url, "http://mail.internal/send");
    assert_eq!(config.public_origin, "https://roster.example.org");
    assert_eq!(config.log_level, tracing::Level::DEBUG);
    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "https://a.example.org".to_string(),
            "https://b.example.org".to_string(),
        ])
    );

    // Required settings fail loudly when missing
    unsafe { std::env::remove_var("MAIL_ENDPOINT_URL") };
    assert!(ApiConfig::from_env().is_err());

    unsafe { std::env::set_var("MAIL_ENDPOINT_URL", "http://mail.internal/send") };
    unsafe { std::env::remove_var("DATABASE_URL") };
    assert!(ApiConfig::from_env().is_err());
}
