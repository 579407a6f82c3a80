use std::collections::HashMap;

pub const EXTERNAL_PREFIX: &str = "external:";

// Public widget commands and their declared parameters.
const PUBLIC_COMMANDS: &[(&str, &[&str])] = &[
    ("markdown", &["body", "unsafe_allow_html", "help"]),
    ("text", &["body", "help"]),
    ("write", &["args", "unsafe_allow_html"]),
    (
        "dataframe",
        &[
            "data",
            "width",
            "height",
            "use_container_width",
            "hide_index",
            "column_order",
            "column_config",
            "key",
            "on_select",
            "selection_mode",
        ],
    ),
    (
        "data_editor",
        &[
            "data",
            "width",
            "height",
            "use_container_width",
            "hide_index",
            "column_order",
            "column_config",
            "num_rows",
            "disabled",
            "key",
        ],
    ),
    (
        "text_input",
        &[
            "label",
            "value",
            "max_chars",
            "key",
            "type",
            "help",
            "autocomplete",
            "on_change",
            "placeholder",
            "disabled",
            "label_visibility",
        ],
    ),
    (
        "text_area",
        &[
            "label",
            "value",
            "height",
            "max_chars",
            "key",
            "help",
            "on_change",
            "placeholder",
            "disabled",
            "label_visibility",
        ],
    ),
    (
        "chat_input",
        &["placeholder", "key", "max_chars", "disabled", "on_submit"],
    ),
    (
        "vega_lite_chart",
        &["data", "spec", "use_container_width", "theme", "key"],
    ),
    (
        "link_button",
        &["label", "url", "help", "type", "disabled", "use_container_width"],
    ),
    ("button", &["label", "key", "help", "on_click", "type", "disabled"]),
    ("date_input", &["label", "value", "min_value", "max_value", "key"]),
    ("time_input", &["label", "value", "key", "help", "step"]),
    ("line_chart", &["data", "x", "y", "color", "width", "height"]),
    ("sidebar", &[]),
];

// Internal entry points tracked under their own names.
const INTERNAL_COMMANDS: &[(&str, &[&str])] = &[
    ("magic", &["arg"]),
    ("clear_data_caches", &[]),
    ("clear_resource_caches", &[]),
    ("session_state.set_attr", &["key", "value"]),
    ("session_state.set_item", &["key", "value"]),
    ("query_params.get_attr", &["key"]),
    ("query_params.set_attr", &["key", "value"]),
    ("query_params.get_item", &["key"]),
    ("query_params.set_item", &["key", "value"]),
    ("_cache_data_object", &["value", "messages"]),
    ("_cache_resource_object", &["value", "messages"]),
    ("_html", &["html", "width", "height", "scrolling"]),
    ("_iframe", &["src", "width", "height", "scrolling"]),
];

const COLUMN_CONFIG_COMMANDS: &[&str] = &[
    "Column",
    "NumberColumn",
    "TextColumn",
    "CheckboxColumn",
    "SelectboxColumn",
    "ListColumn",
    "DatetimeColumn",
    "DateColumn",
    "TimeColumn",
    "LinkColumn",
    "ImageColumn",
    "LineChartColumn",
    "BarChartColumn",
    "ProgressColumn",
];

const COLUMN_CONFIG_PARAMS: &[&str] = &[
    "label", "width", "help", "disabled", "required", "default", "format",
];

/// Registry of operations whose names are recorded verbatim.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: HashMap<String, Vec<String>>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, params) in PUBLIC_COMMANDS.iter().chain(INTERNAL_COMMANDS) {
            catalog.register(*name, params);
        }
        for kind in COLUMN_CONFIG_COMMANDS {
            catalog.register(format!("column_config.{}", kind), COLUMN_CONFIG_PARAMS);
        }
        catalog
    }

    /// Re-registering a name replaces its parameter list.
    pub fn register(&mut self, name: impl Into<String>, params: &[&str]) {
        self.commands
            .insert(name.into(), params.iter().map(|p| p.to_string()).collect());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn params(&self, name: &str) -> Option<&[String]> {
        self.commands.get(name).map(Vec::as_slice)
    }

    /// Name under which calls to `name` are recorded.
    pub fn tracked_name(&self, name: &str) -> String {
        if self.contains(name) {
            name.to_string()
        } else {
            format!("{}{}", EXTERNAL_PREFIX, name)
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
