use script_telemetry::runtime::telemetry::{
    command_telemetry, create_page_profile, ArgValue, CallArgs, CommandCatalog, Installation, TrackedCommand,
};
use script_telemetry::runtime::telemetry::installation::machine_id_from;
use script_telemetry::{ScriptRunContext, TelemetryConfig};

fn dataframe_command() -> TrackedCommand {
    let catalog = CommandCatalog::builtin();
    command_telemetry(
        "dataframe",
        catalog.params("dataframe").unwrap(),
        &CallArgs::new().arg(ArgValue::DataFrame { rows: 0, columns: 0 }).kwarg("width", 250),
    )
    .unwrap()
}

#[test]
fn test_create_page_profile() {
    let ctx = ScriptRunContext::new(true);
    let profile = create_page_profile(&ctx, &[dataframe_command()], 1000, 2000);

    assert_eq!(profile.commands.len(), 1);
    assert_eq!(profile.exec_time, 1000);
    assert_eq!(profile.prep_time, 2000);
    assert_eq!(profile.commands[0].name, "dataframe");
    assert!(!profile.is_fragment_run);
    assert_eq!(profile.os, std::env::consts::OS);
}

#[test]
fn test_create_page_profile_is_fragment_run() {
    let mut ctx = ScriptRunContext::new(true);
    ctx.fragment_ids_this_run = vec!["some_fragment_id".to_string()];

    let profile = create_page_profile(&ctx, &[dataframe_command()], 1000, 2000);
    assert!(profile.is_fragment_run);
}

#[test]
fn test_page_profile_preserves_order() {
    let ctx = ScriptRunContext::new(true);
    let commands = vec![
        TrackedCommand::new("markdown", vec![]),
        dataframe_command(),
        TrackedCommand::new("external:helper", vec![]),
    ];

    let profile = create_page_profile(&ctx, &commands, 1, 2);
    let names: Vec<&str> = profile.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["markdown", "dataframe", "external:helper"]);
    assert_eq!(profile.commands[1].args[0].key, "data");
    assert_eq!(profile.commands[1].args[1].key, "width");
}

#[test]
fn test_page_profile_wire_shape() {
    let ctx = ScriptRunContext::new(true);
    let profile = create_page_profile(&ctx, &[dataframe_command()], 1000, 2000)
        .with_uncaught_exception("ValueError")
        .with_attributions(["polars", "not_a_tracked_lib", "duckdb", "polars"]);

    let json: serde_json::Value = serde_json::from_str(&profile.to_json().unwrap()).unwrap();
    assert_eq!(json["exec_time"], 1000);
    assert_eq!(json["prep_time"], 2000);
    assert_eq!(json["is_fragment_run"], false);
    assert_eq!(json["uncaught_exception"], "ValueError");
    assert_eq!(json["attributions"], serde_json::json!(["duckdb", "polars"]));
    assert_eq!(
        json["commands"][0]["args"][0],
        serde_json::json!({"k": "data", "t": "DataFrame", "m": "len:0", "p": 0})
    );
    // Keyword with no metadata: no `m` and no `p`
    assert_eq!(json["commands"][0]["args"][1], serde_json::json!({"k": "width", "t": "int"}));
}

#[test]
fn test_page_profile_timezone_is_utc_offset() {
    let ctx = ScriptRunContext::new(true);
    let profile = create_page_profile(&ctx, &[], 0, 0);

    // +HH:MM or -HH:MM
    let tz = profile.timezone.as_bytes();
    assert_eq!(tz.len(), 6, "Unexpected timezone {:?}", profile.timezone);
    assert!(tz[0] == b'+' || tz[0] == b'-');
    assert_eq!(tz[3], b':');
    assert!(tz[1..3].iter().chain(&tz[4..6]).all(u8::is_ascii_digit));
}

#[test]
fn test_page_profile_with_config() {
    let config = TelemetryConfig::from_json_str(r#"{"headless": true}"#).unwrap();
    let ctx = ScriptRunContext::from_config(&config);

    let profile = create_page_profile(&ctx, &[], 0, 0).with_config(&config);
    assert!(profile.headless);
    assert_eq!(profile.config, vec!["headless".to_string()]);
    assert!(profile.uncaught_exception.is_none());
}

#[test]
fn test_machine_id_lookup_order() {
    let dir = tempfile::tempdir().unwrap();
    let etc = dir.path().join("etc-machine-id");
    let dbus = dir.path().join("dbus-machine-id");

    // Nothing present
    assert_eq!(machine_id_from(&[etc.clone(), dbus.clone()]), None);

    std::fs::write(&dbus, "dbus\n").unwrap();
    assert_eq!(machine_id_from(&[etc.clone(), dbus.clone()]).as_deref(), Some("dbus"));

    std::fs::write(&etc, "etc").unwrap();
    assert_eq!(machine_id_from(&[etc, dbus]).as_deref(), Some("etc"));
}

#[test]
fn test_installation_id_is_stable() {
    let a = Installation::from_machine_id("etc");
    let b = Installation::from_machine_id("etc");
    let c = Installation::from_machine_id("dbus");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.installation_id_v3.get_version_num(), 5);
}
