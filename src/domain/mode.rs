use std::fmt;
use std::str::FromStr;

use super::AppError;

/// POSIX permission bits, including setuid/setgid/sticky.
///
/// Rendered as `0` followed by at least three octal digits (`0644`, `04755`).
/// A mode of `0` means "unspecified" to the atomic writer, which then infers
/// the permissions instead of stripping every bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    /// Mode applied to new files when none is requested or inherited.
    pub const DEFAULT_FILE: FileMode = FileMode(0o644);

    /// Mode applied to parent directories created on demand.
    pub const PARENT_DIR: FileMode = FileMode(0o700);

    /// Permission and special bits; file-type bits are never carried.
    pub const MASK: u32 = 0o7777;

    pub fn new(bits: u32) -> Result<Self, AppError> {
        if bits & !Self::MASK != 0 {
            return Err(AppError::InvalidMode {
                value: format!("{bits:o}"),
                reason: "mode exceeds 07777".to_string(),
            });
        }
        Ok(Self(bits))
    }

    /// Keep only the permission bits of a raw `st_mode`.
    pub fn from_raw(st_mode: u32) -> Self {
        Self(st_mode & Self::MASK)
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        if value.is_empty() {
            return Err(AppError::InvalidMode {
                value: value.to_string(),
                reason: "empty mode".to_string(),
            });
        }
        // from_str_radix alone would accept a leading sign.
        if !value.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(AppError::InvalidMode {
                value: value.to_string(),
                reason: "expected octal digits".to_string(),
            });
        }
        let bits = u32::from_str_radix(value, 8).map_err(|err| AppError::InvalidMode {
            value: value.to_string(),
            reason: err.to_string(),
        })?;
        Self::new(bits).map_err(|_| AppError::InvalidMode {
            value: value.to_string(),
            reason: "mode exceeds 07777".to_string(),
        })
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Zero is treated as "not specified" rather than "no permissions".
    // FIXME: a caller cannot request mode 0000; it silently becomes inference.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0{:03o}", self.0)
    }
}

impl FromStr for FileMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
