//! Display-name locales offered by the boundary dataset.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Each locale maps to a `name_<code>` property in the dataset.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    Bn,
    De,
    El,
    #[default]
    En,
    Es,
    Fr,
    Hi,
    Hu,
    Id,
    It,
    Ja,
    Ko,
    Nl,
    Pl,
    Pt,
    Ru,
    Sv,
    Tr,
    Vi,
    Zh,
}

impl Locale {
    /// Dataset property holding names in this locale, e.g. `name_fr`.
    pub fn property_name(&self) -> String {
        format!("name_{}", self.as_ref())
    }
}
