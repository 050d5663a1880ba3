//! Host abstraction module
//!
//! Everything the engine needs from the surrounding application: element
//! handles and page queries, the framework introspection capability, and
//! the runtime value model crossing that boundary. The [`fixture`]
//! submodule provides the in-memory double used by tests and the demo.

pub mod fixture;
pub mod introspection;
pub mod page;
pub mod value;

pub use introspection::{ComponentHandle, Introspection};
pub use page::{ElementId, HostPage, Rect, Viewport};
pub use value::{ObjectCapabilities, Property, Value};
