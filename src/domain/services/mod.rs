//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod layer_merger;
mod network_resolver;
mod request_builder;

pub use layer_merger::{merge_layers, ConfigLayer, OverrideInfo, ResolvedConfig};
pub use network_resolver::{resolve_network, PresetRegistry, EXTERNAL_PRESET};
pub use request_builder::{expand_role, RequestBuilder};
