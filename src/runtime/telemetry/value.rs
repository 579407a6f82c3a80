use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Fully-qualified library paths mapped to the short names used in reports.
const OBJECT_NAME_MAPPING: &[(&str, &str)] = &[
    ("streamlit.delta_generator.DeltaGenerator", "DG"),
    ("pandas.core.frame.DataFrame", "DataFrame"),
    ("pandas.core.series.Series", "PandasSeries"),
    ("pandas.core.indexes.base.Index", "PandasIndex"),
    ("pandas.io.formats.style.Styler", "PandasStyler"),
    ("plotly.graph_objs._figure.Figure", "PlotlyFigure"),
    ("bokeh.plotting.figure.Figure", "BokehFigure"),
    ("matplotlib.figure.Figure", "MatplotlibFigure"),
    (
        "streamlit.connections.snowpark_connection.SnowparkConnection",
        "SnowparkConnection",
    ),
    (
        "streamlit.connections.sql_connection.SQLConnection",
        "SQLConnection",
    ),
];

/// Closed set of argument type categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Dict,
    Date,
    Time,
    DateTime,
    DataFrame,
    Series,
    /// A column config of the given kind, e.g. `NumberColumn`.
    ColumnConfig(String),
    /// Anything else, described by where its type is declared.
    Object { module: String, qualname: String },
}

impl ValueKind {
    pub fn object(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        ValueKind::Object {
            module: module.into(),
            qualname: qualname.into(),
        }
    }

    /// Short type tag used in tracked argument records.
    pub fn type_name(&self) -> String {
        match self {
            ValueKind::NoneType => "NoneType".to_string(),
            ValueKind::Bool => "bool".to_string(),
            ValueKind::Int => "int".to_string(),
            ValueKind::Float => "float".to_string(),
            ValueKind::Str => "str".to_string(),
            ValueKind::Bytes => "bytes".to_string(),
            ValueKind::List => "list".to_string(),
            ValueKind::Tuple => "tuple".to_string(),
            ValueKind::Dict => "dict".to_string(),
            ValueKind::Date => "datetime.date".to_string(),
            ValueKind::Time => "datetime.time".to_string(),
            ValueKind::DateTime => "datetime.datetime".to_string(),
            ValueKind::DataFrame => "DataFrame".to_string(),
            ValueKind::Series => "PandasSeries".to_string(),
            ValueKind::ColumnConfig(kind) => format!("column_config.{}", kind),
            ValueKind::Object { module, qualname } => {
                let qualified = if module.is_empty() || module == "builtins" {
                    qualname.clone()
                } else {
                    format!("{}.{}", module, qualname)
                };
                OBJECT_NAME_MAPPING
                    .iter()
                    .find(|(path, _)| *path == qualified)
                    .map(|(_, short)| short.to_string())
                    .unwrap_or(qualified)
            }
        }
    }
}

/// A column config argument, e.g. `NumberColumn(label="Price", format="$%d")`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConfig {
    pub kind: String,
    pub fields: Vec<(String, ArgValue)>,
}

impl ColumnConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// Describes one call argument. Only its shape survives into a tracked record.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<ArgValue>),
    Tuple(Vec<ArgValue>),
    Dict(Vec<(String, ArgValue)>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DataFrame { rows: usize, columns: usize },
    Series { len: usize },
    ColumnConfig(ColumnConfig),
    Object {
        module: String,
        qualname: String,
        len: Option<usize>,
    },
    /// The type itself rather than an instance of it.
    Type(ValueKind),
}

impl ArgValue {
    pub fn object(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        ArgValue::Object {
            module: module.into(),
            qualname: qualname.into(),
            len: None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ArgValue::None => ValueKind::NoneType,
            ArgValue::Bool(_) => ValueKind::Bool,
            ArgValue::Int(_) => ValueKind::Int,
            ArgValue::Float(_) => ValueKind::Float,
            ArgValue::Str(_) => ValueKind::Str,
            ArgValue::Bytes(_) => ValueKind::Bytes,
            ArgValue::List(_) => ValueKind::List,
            ArgValue::Tuple(_) => ValueKind::Tuple,
            ArgValue::Dict(_) => ValueKind::Dict,
            ArgValue::Date(_) => ValueKind::Date,
            ArgValue::Time(_) => ValueKind::Time,
            ArgValue::DateTime(_) => ValueKind::DateTime,
            ArgValue::DataFrame { .. } => ValueKind::DataFrame,
            ArgValue::Series { .. } => ValueKind::Series,
            ArgValue::ColumnConfig(config) => ValueKind::ColumnConfig(config.kind.clone()),
            ArgValue::Object {
                module, qualname, ..
            } => ValueKind::object(module.as_str(), qualname.as_str()),
            ArgValue::Type(kind) => kind.clone(),
        }
    }

    /// Element count for sized values. Strings count characters, tables count rows.
    pub fn len(&self) -> Option<usize> {
        match self {
            ArgValue::Str(s) => Some(s.chars().count()),
            ArgValue::Bytes(b) => Some(b.len()),
            ArgValue::List(items) | ArgValue::Tuple(items) => Some(items.len()),
            ArgValue::Dict(entries) => Some(entries.len()),
            ArgValue::DataFrame { rows, .. } => Some(*rows),
            ArgValue::Series { len } => Some(*len),
            ArgValue::Object { len, .. } => *len,
            _ => None,
        }
    }
}

/// Short type name of a value or of a type descriptor, symmetric for both.
pub fn resolve_type_name(value: &ArgValue) -> String {
    let kind = match value {
        ArgValue::Type(kind) => kind.clone(),
        other => other.kind(),
    };
    kind.type_name()
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v as i64)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        ArgValue::Int(v as i64)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<NaiveDate> for ArgValue {
    fn from(v: NaiveDate) -> Self {
        ArgValue::Date(v)
    }
}

impl From<NaiveTime> for ArgValue {
    fn from(v: NaiveTime) -> Self {
        ArgValue::Time(v)
    }
}

impl From<NaiveDateTime> for ArgValue {
    fn from(v: NaiveDateTime) -> Self {
        ArgValue::DateTime(v)
    }
}

impl From<ColumnConfig> for ArgValue {
    fn from(v: ColumnConfig) -> Self {
        ArgValue::ColumnConfig(v)
    }
}

impl From<ValueKind> for ArgValue {
    fn from(v: ValueKind) -> Self {
        ArgValue::Type(v)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ArgValue::None)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(v: Vec<T>) -> Self {
        ArgValue::List(v.into_iter().map(Into::into).collect())
    }
}
