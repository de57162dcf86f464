#![forbid(unsafe_code)]

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod schema;

pub use dispatch::{Dispatcher, ToolSet};
pub use envelope::ResponseEnvelope;
pub use error::{ErrorKind, ProviderError, Result, ToolError};
pub use schema::{ArgumentBag, FieldSpec, FieldType, ToolDescriptor};
