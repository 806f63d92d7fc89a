use serde::{Deserialize, Serialize};

use crate::domain::types::{HookId, HookName};

/// Named attention-grabbing technique referenced by video references.
///
/// Hooks are maintained elsewhere; this application only lists them for the
/// video form's hook selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hook {
    pub id: HookId,
    pub name: HookName,
}
