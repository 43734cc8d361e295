//! Power mode for light control.

use serde::{Deserialize, Serialize};

/// A power change to apply to a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerMode {
    /// Turn the light on
    On,
    /// Turn the light off
    Off,
    /// Invert whatever state the light reports right now
    Toggle,
}
