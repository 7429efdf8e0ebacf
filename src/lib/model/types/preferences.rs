//! Module implementing the `Preferences` type.

use serde::{Deserialize, Serialize};

use super::enums::{Language, TemplateId, Theme};


/// User's preferences that outlive a single editing session.
///
/// Every preference is optional; an unset one means "use the default".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Template that new stamps start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_template: Option<TemplateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Preferences {
    /// Whether no preference has been set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Preferences::default()
    }
}
