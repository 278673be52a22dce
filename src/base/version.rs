//! Platform and version vocabulary for availability checks.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A dotted `major.minor.patch` version. Missing components are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned when version text is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{text}`: {reason}")]
pub struct VersionParseError {
    pub text: String,
    pub reason: &'static str,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| VersionParseError {
            text: s.to_string(),
            reason,
        };

        let mut parts = [0u32; 3];
        let mut count = 0;
        for component in s.trim().split('.') {
            if count == parts.len() {
                return Err(fail("more than three components"));
            }
            if component.is_empty() {
                return Err(fail("empty component"));
            }
            parts[count] = component
                .parse()
                .map_err(|_| fail("component is not a number"))?;
            count += 1;
        }

        Ok(Version::new(parts[0], parts[1], parts[2]))
    }
}

/// Platforms an availability attribute can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOS,
    IOS,
    MacCatalyst,
    TvOS,
    WatchOS,
    VisionOS,
    Windows,
    Linux,
    OpenBSD,
    Wasi,
}

impl Platform {
    /// Returns true if attributes written for `attr_platform` apply when
    /// building for `self`.
    ///
    /// Mac Catalyst and visionOS both honor iOS attributes.
    pub fn honors(self, attr_platform: Platform) -> bool {
        self == attr_platform
            || matches!(
                (self, attr_platform),
                (Platform::MacCatalyst, Platform::IOS) | (Platform::VisionOS, Platform::IOS)
            )
    }

    pub fn display(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::IOS => "iOS",
            Platform::MacCatalyst => "macCatalyst",
            Platform::TvOS => "tvOS",
            Platform::WatchOS => "watchOS",
            Platform::VisionOS => "visionOS",
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::OpenBSD => "OpenBSD",
            Platform::Wasi => "WASI",
        }
    }
}

/// The platform and deployment version a module was compiled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetPlatform {
    pub platform: Platform,
    pub version: Version,
}

impl TargetPlatform {
    pub fn new(platform: Platform, version: Version) -> Self {
        Self { platform, version }
    }
}
