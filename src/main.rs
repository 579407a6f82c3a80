use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Instant;

use script_telemetry::runtime::telemetry::{
    create_page_profile, gather_metrics, ArgValue, CallArgs, ColumnConfig, CommandCatalog, Installation,
};
use script_telemetry::{CacheStat, ScriptRunContext, StatsManager, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    tracing::info!("Script telemetry demo booting...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("telemetry.json"));
    let config = TelemetryConfig::load(&config_path)?;
    tracing::info!(
        "Config loaded: gather_usage_stats={}, headless={}",
        config.gather_usage_stats,
        config.headless
    );

    let installation = Installation::new();
    tracing::info!("Installation: {}", installation.installation_id_v3);

    let catalog = CommandCatalog::builtin();
    let markdown = gather_metrics(&catalog, "markdown", &[], |_ctx, args: CallArgs| {
        tracing::debug!("markdown called with {} args", args.positional().len());
    });
    let dataframe = gather_metrics(&catalog, "dataframe", &[], |_ctx, _args: CallArgs| ());
    let text_input = gather_metrics(&catalog, "text_input", &[], |_ctx, args: CallArgs| {
        match args.keywords().iter().find(|(k, _)| k == "value") {
            Some((_, ArgValue::Str(v))) => v.clone(),
            _ => String::new(),
        }
    });
    // Host-defined helper: recorded as external, and its inner markdown call is not tracked.
    let summary = gather_metrics(&catalog, "render_summary", &["title"], |ctx, args: CallArgs| {
        markdown.call(ctx, args);
    });

    let mut ctx = ScriptRunContext::from_config(&config);

    // Full run
    let started = Instant::now();
    markdown.call(&mut ctx, CallArgs::new().arg("# Sales"));
    dataframe.call(
        &mut ctx,
        CallArgs::new()
            .arg(ArgValue::DataFrame { rows: 120, columns: 4 })
            .kwarg("use_container_width", true)
            .kwarg(
                "column_config",
                ArgValue::Dict(vec![(
                    "price".to_string(),
                    ColumnConfig::new("NumberColumn").field("format", "$%d").into(),
                )]),
            ),
    );
    let name = text_input.call(&mut ctx, CallArgs::new().kwarg("label", "Your name").kwarg("value", "anon"));
    summary.call(&mut ctx, CallArgs::new().arg(format!("Hello {}", name)));
    let exec_time = started.elapsed().as_millis() as u64;

    let profile = create_page_profile(&ctx, ctx.tracked_commands(), exec_time, 0)
        .with_config(&config)
        .with_attributions(["polars", "left-pad"]);
    println!("{}", profile.to_json()?);

    // Fragment run
    ctx.reset();
    ctx.fragment_ids_this_run.push("sidebar_fragment".to_string());
    markdown.call(&mut ctx, CallArgs::new().arg("refreshed"));
    let profile = create_page_profile(&ctx, ctx.tracked_commands(), 0, 0);
    println!("{}", profile.to_json()?);

    let mut stats = StatsManager::new();
    stats.register_provider(Arc::new(|| {
        vec![
            CacheStat::new("st_cache_data", "load_sales", 4096),
            CacheStat::new("st_cache_data", "load_sales", 1024),
        ]
    }));
    stats.register_provider(Arc::new(|| vec![CacheStat::new("st_cache_resource", "db_conn", 512)]));
    print!("{}", stats.render_openmetrics());

    tracing::info!("Done. Tracked {} commands in the last run.", ctx.tracked_commands().len());
    Ok(())
}
