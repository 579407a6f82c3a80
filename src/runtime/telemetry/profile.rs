use serde::Serialize;

use super::command::TrackedCommand;
use crate::config::TelemetryConfig;
use crate::runtime::context::ScriptRunContext;

/// Third-party libraries whose presence in a session is worth attributing.
pub const ATTRIBUTIONS_TO_CHECK: &[&str] = &[
    "pymysql",
    "MySQLdb",
    "mysql",
    "pymongo",
    "ibis",
    "boto3",
    "psycopg2",
    "psycopg3",
    "sqlalchemy",
    "elasticsearch",
    "pyodbc",
    "pymssql",
    "cassandra",
    "azure",
    "redis",
    "sqlite3",
    "neo4j",
    "duckdb",
    "opensearchpy",
    "supabase",
    "polars",
    "dask",
    "vaex",
    "modin",
    "pyspark",
    "cudf",
    "xarray",
    "ray",
    "geopandas",
    "mars",
    "tables",
    "zarr",
    "h5py",
    "numba",
    "snowflake",
    "openai",
    "langchain",
    "llama_index",
    "transformers",
    "torch",
    "tensorflow",
];

/// Usage summary of one script run, handed to the transport layer as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageProfile {
    pub commands: Vec<TrackedCommand>,
    /// Milliseconds spent executing the script.
    pub exec_time: u64,
    /// Milliseconds spent preparing the run.
    pub prep_time: u64,
    pub config: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncaught_exception: Option<String>,
    pub attributions: Vec<String>,
    pub os: String,
    /// Local UTC offset, e.g. `+02:00`.
    pub timezone: String,
    pub headless: bool,
    pub is_fragment_run: bool,
}

pub fn create_page_profile(
    ctx: &ScriptRunContext,
    commands: &[TrackedCommand],
    exec_time: u64,
    prep_time: u64,
) -> PageProfile {
    PageProfile {
        commands: commands.to_vec(),
        exec_time,
        prep_time,
        config: Vec::new(),
        uncaught_exception: None,
        attributions: Vec::new(),
        os: std::env::consts::OS.to_string(),
        timezone: chrono::Local::now().format("%:z").to_string(),
        headless: false,
        is_fragment_run: ctx.is_fragment_run(),
    }
}

impl PageProfile {
    pub fn with_config(mut self, config: &TelemetryConfig) -> Self {
        self.headless = config.headless;
        self.config = config.config_options().to_vec();
        self.config.sort();
        self
    }

    /// Keeps only the loaded modules that are on the attribution list.
    pub fn with_attributions<'a>(mut self, loaded_modules: impl IntoIterator<Item = &'a str>) -> Self {
        let mut found: Vec<String> = loaded_modules
            .into_iter()
            .filter(|m| ATTRIBUTIONS_TO_CHECK.contains(m))
            .map(str::to_string)
            .collect();
        found.sort();
        found.dedup();
        self.attributions = found;
        self
    }

    pub fn with_uncaught_exception(mut self, exception_type: impl Into<String>) -> Self {
        self.uncaught_exception = Some(exception_type.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
