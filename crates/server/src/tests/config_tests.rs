use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_bind_locally_and_use_seed_data() {
    let settings = load_settings_from(None, no_env);
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
    assert!(settings.timeline_path.is_none());
    assert_eq!(settings.app_name, "Music Rewind API");
    assert_eq!(settings.env, "dev");
}

#[test]
fn service_identity_comes_from_file_then_env() {
    let settings = load_settings_from(Some("app_name = \"Rewind\"\nenv = \"staging\"\n"), |key| {
        match key {
            "APP__ENV" => Some("prod".into()),
            "APP_NAME" => Some(String::new()),
            _ => None,
        }
    });
    assert_eq!(settings.app_name, "Rewind");
    assert_eq!(settings.env, "prod");
}

#[test]
fn file_keys_are_applied() {
    let settings = load_settings_from(
        Some("bind_addr = \"0.0.0.0:9000\"\ntimeline_path = \"./data/timeline.json\"\n"),
        no_env,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(
        settings.timeline_path,
        Some(PathBuf::from("./data/timeline.json"))
    );
}

#[test]
fn app_prefixed_env_wins_over_plain_env_and_file() {
    let settings = load_settings_from(Some("bind_addr = \"0.0.0.0:9000\"\n"), |key| match key {
        "SERVER_BIND" => Some("127.0.0.1:1111".into()),
        "APP__BIND_ADDR" => Some("127.0.0.1:2222".into()),
        _ => None,
    });
    assert_eq!(settings.server_bind, "127.0.0.1:2222");
}

#[test]
fn blank_timeline_path_falls_back_to_seed() {
    let settings = load_settings_from(None, |key| {
        (key == "TIMELINE_PATH").then(String::new)
    });
    assert!(settings.timeline_path.is_none());
}

#[test]
fn unparsable_file_is_ignored() {
    let settings = load_settings_from(Some("bind_addr = [1, 2"), no_env);
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
}
