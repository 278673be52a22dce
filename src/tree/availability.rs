//! Availability attributes.

use crate::base::{Platform, TargetPlatform, Version};

/// One `available(...)` attribute attached to a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityAttr {
    /// `None` for platform-agnostic attributes.
    pub platform: Option<Platform>,
    /// Unconditionally unavailable on `platform`.
    pub unavailable: bool,
    pub introduced: Option<Version>,
    pub obsoleted: Option<Version>,
}

impl AvailabilityAttr {
    pub fn platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            ..Self::default()
        }
    }

    pub fn unavailable_on(platform: Platform) -> Self {
        Self {
            unavailable: true,
            ..Self::platform(platform)
        }
    }

    pub fn obsoleted_on(platform: Platform, version: Version) -> Self {
        Self {
            obsoleted: Some(version),
            ..Self::platform(platform)
        }
    }

    pub fn with_introduced(mut self, version: Version) -> Self {
        self.introduced = Some(version);
        self
    }

    /// Returns true if this attribute removes the declaration on `target`.
    pub(super) fn prunes(&self, target: &TargetPlatform) -> bool {
        let Some(platform) = self.platform else {
            return false;
        };
        if !target.platform.honors(platform) {
            return false;
        }
        if self.unavailable {
            return true;
        }
        self.obsoleted
            .is_some_and(|obsoleted| target.version >= obsoleted)
    }
}
