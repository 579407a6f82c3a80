use std::ops::{Deref, DerefMut};
use tracing::debug;

use super::catalog::CommandCatalog;
use super::command::{command_telemetry, CallArgs, TrackedCommand};
use crate::runtime::context::ScriptRunContext;

/// An operation wrapped so that each call is recorded before it runs.
#[derive(Debug, Clone)]
pub struct Instrumented<F> {
    name: String,
    params: Vec<String>,
    func: F,
}

/// Wraps `func` under `name`.
///
/// Catalog operations are recorded by their bare name with the catalog's
/// parameter list. Anything else is recorded as `external:<name>` using
/// `declared_params`.
pub fn gather_metrics<F, R>(
    catalog: &CommandCatalog,
    name: &str,
    declared_params: &[&str],
    func: F,
) -> Instrumented<F>
where
    F: Fn(&mut ScriptRunContext, CallArgs) -> R,
{
    let params = match catalog.params(name) {
        Some(params) => params.to_vec(),
        None => declared_params.iter().map(|p| p.to_string()).collect(),
    };

    Instrumented {
        name: catalog.tracked_name(name),
        params,
        func,
    }
}

impl<F> Instrumented<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn call<R>(&self, ctx: &mut ScriptRunContext, args: CallArgs) -> R
    where
        F: Fn(&mut ScriptRunContext, CallArgs) -> R,
    {
        if !ctx.gather_usage_stats || ctx.command_tracking_deactivated {
            return (self.func)(ctx, args);
        }

        let command = match command_telemetry(&self.name, &self.params, &args) {
            Ok(command) => command,
            Err(e) => {
                debug!("Failed to collect command telemetry: {}", e);
                TrackedCommand::new(self.name.clone(), Vec::new())
            }
        };
        ctx.track(command);

        let mut guard = SuppressTracking::new(ctx);
        (self.func)(&mut *guard, args)
    }
}

/// Keeps tracking off while held; lifted on drop, unwinding included.
struct SuppressTracking<'a> {
    ctx: &'a mut ScriptRunContext,
}

impl<'a> SuppressTracking<'a> {
    fn new(ctx: &'a mut ScriptRunContext) -> Self {
        ctx.command_tracking_deactivated = true;
        Self { ctx }
    }
}

impl Deref for SuppressTracking<'_> {
    type Target = ScriptRunContext;

    fn deref(&self) -> &ScriptRunContext {
        self.ctx
    }
}

impl DerefMut for SuppressTracking<'_> {
    fn deref_mut(&mut self) -> &mut ScriptRunContext {
        self.ctx
    }
}

impl Drop for SuppressTracking<'_> {
    fn drop(&mut self) {
        self.ctx.command_tracking_deactivated = false;
    }
}
