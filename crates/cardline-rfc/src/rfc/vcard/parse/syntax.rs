//! Which version applies where.

use std::collections::HashMap;

use crate::rfc::vcard::core::VCardVersion;

/// Maps `VERSION` values to versions, per component.
///
/// The reader starts in `default_version`. When it reads a `VERSION`
/// property directly inside a component that has rules, it switches to
/// the version the rules give for that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRules {
    default_version: VCardVersion,
    /// Upper-cased component name → version string → version.
    components: HashMap<String, HashMap<String, VCardVersion>>,
}

impl SyntaxRules {
    /// Rules with no component registered.
    #[must_use]
    pub fn new(default_version: VCardVersion) -> Self {
        Self {
            default_version,
            components: HashMap::new(),
        }
    }

    /// Rules for vCard documents: `VCARD` with 2.1, 3.0 and 4.0, starting in 2.1.
    #[must_use]
    pub fn vcard() -> Self {
        Self::vcard_with_default(VCardVersion::V2_1)
    }

    /// vCard rules with a custom starting version.
    #[must_use]
    pub fn vcard_with_default(default_version: VCardVersion) -> Self {
        let mut rules = Self::new(default_version);
        for version in [VCardVersion::V2_1, VCardVersion::V3, VCardVersion::V4] {
            rules.add_rule("VCARD", version.as_str(), version);
        }
        rules
    }

    /// Registers a version value for a component.
    pub fn add_rule(&mut self, component: &str, value: &str, version: VCardVersion) {
        self.components
            .entry(component.to_ascii_uppercase())
            .or_default()
            .insert(value.trim().to_string(), version);
    }

    #[must_use]
    pub const fn default_version(&self) -> VCardVersion {
        self.default_version
    }

    /// Returns whether `VERSION` properties inside the component are interpreted.
    #[must_use]
    pub fn has_component(&self, component: &str) -> bool {
        self.components
            .contains_key(&component.to_ascii_uppercase())
    }

    /// Looks up the version a `VERSION` value selects inside a component.
    #[must_use]
    pub fn version_for(&self, component: &str, value: &str) -> Option<VCardVersion> {
        self.components
            .get(&component.to_ascii_uppercase())?
            .get(value.trim())
            .copied()
    }
}

impl Default for SyntaxRules {
    fn default() -> Self {
        Self::vcard()
    }
}
