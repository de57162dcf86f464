//! Routes named invocations to a [`ToolSet`] and folds every outcome into a
//! [`ResponseEnvelope`].
//!
//! The dispatcher is the terminal sink for failures: validation errors,
//! operation errors and panics all come back as an error envelope, so the
//! transport loop never sees anything but a well-formed response.

use std::{any::Any, panic::AssertUnwindSafe};

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::{
    envelope::ResponseEnvelope,
    error::{ErrorKind, Result, ToolError},
    schema::{ArgumentBag, ToolDescriptor},
};

/// A fixed set of named operations.
#[async_trait]
pub trait ToolSet: Send + Sync {
    /// Discovery surface, in presentation order.
    fn descriptors(&self) -> &'static [ToolDescriptor];

    /// Run the tool called `name`. Required fields have already been checked
    /// against the descriptor.
    async fn invoke(&self, name: &'static str, args: ArgumentBag) -> Result<String>;
}

pub struct Dispatcher<T> {
    tools: T,
}

impl<T: ToolSet> Dispatcher<T> {
    pub fn new(tools: T) -> Self {
        Self { tools }
    }

    pub fn descriptors(&self) -> &'static [ToolDescriptor] {
        self.tools.descriptors()
    }

    /// Handle one invocation. Always returns exactly one envelope.
    pub async fn dispatch(&self, name: &str, args: Option<ArgumentBag>) -> ResponseEnvelope {
        let outcome = AssertUnwindSafe(self.resolve_and_execute(name, args))
            .catch_unwind()
            .await;

        match outcome {
            | Ok(Ok(text)) => {
                debug!(tool = %name, "tool call succeeded");
                ResponseEnvelope::success(text)
            },
            | Ok(Err(err)) => {
                match err.kind() {
                    | ErrorKind::Validation => info!(tool = %name, error = %err, "rejected tool call"),
                    | ErrorKind::Operation => warn!(tool = %name, error = %err, "tool call failed"),
                }
                ResponseEnvelope::error(err.to_string())
            },
            | Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(tool = %name, panic = %message, "tool call panicked");
                ResponseEnvelope::error(format!("Internal error: {message}"))
            },
        }
    }

    async fn resolve_and_execute(&self, name: &str, args: Option<ArgumentBag>) -> Result<String> {
        let args = args
            .filter(|bag| !bag.is_empty())
            .ok_or(ToolError::MissingArguments)?;

        let descriptor = self
            .descriptors()
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ToolError::UnknownTool { name: name.to_string() })?;

        if let Some(field) = descriptor.missing_required(&args) {
            return Err(ToolError::invalid(
                descriptor.name,
                format!("missing required field `{field}`"),
            ));
        }

        self.tools.invoke(descriptor.name, args).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
