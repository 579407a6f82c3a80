//! Command telemetry: which operations a script run invoked, and how.
//!
//! # PRIVACY INVARIANT
//! Tracked records must **NEVER** contain argument content.
//! Only parameter names, short type names, lengths and allow-listed literals
//! (booleans) leave the call site.
//!
//! # SAFETY INVARIANT
//! Telemetry is a side-effect layer. A failure while describing a call is
//! logged and swallowed; it never changes what the wrapped operation returns.

pub mod catalog;
pub mod command;
pub mod installation;
pub mod profile;
pub mod recorder;
pub mod value;

pub use catalog::{CommandCatalog, EXTERNAL_PREFIX};
pub use command::{command_telemetry, ArgMetadata, ArgRecord, CallArgs, TrackedCommand};
pub use installation::{machine_id_v3, Installation};
pub use profile::{create_page_profile, PageProfile};
pub use recorder::{gather_metrics, Instrumented};
pub use value::{resolve_type_name, ArgValue, ColumnConfig, ValueKind};
