//! Native binary header check
//!
//! Binding refuses any artifact whose leading bytes are not a shared-object
//! header for the host platform.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, Result};

/// Container format expected on this platform
#[cfg(target_os = "windows")]
pub const NATIVE_FORMAT: &str = "PE";
#[cfg(target_vendor = "apple")]
pub const NATIVE_FORMAT: &str = "Mach-O";
#[cfg(not(any(target_os = "windows", target_vendor = "apple")))]
pub const NATIVE_FORMAT: &str = "ELF";

/// Accepted leading bytes
#[cfg(target_os = "windows")]
const MAGICS: &[&[u8]] = &[b"MZ"];
#[cfg(target_vendor = "apple")]
const MAGICS: &[&[u8]] = &[
    &[0xfe, 0xed, 0xfa, 0xce],
    &[0xfe, 0xed, 0xfa, 0xcf],
    &[0xce, 0xfa, 0xed, 0xfe],
    &[0xcf, 0xfa, 0xed, 0xfe],
    &[0xca, 0xfe, 0xba, 0xbe],
];
#[cfg(not(any(target_os = "windows", target_vendor = "apple")))]
const MAGICS: &[&[u8]] = &[&[0x7f, b'E', b'L', b'F']];

/// A header this platform accepts, for producing test artifacts
pub const NATIVE_MAGIC: &[u8] = MAGICS[0];

const HEADER_LEN: u64 = 4;

/// Whether `header` starts with a native shared-object magic
pub fn is_native_header(header: &[u8]) -> bool {
    MAGICS.iter().any(|magic| header.starts_with(magic))
}

/// Read the artifact's leading bytes and check them
pub fn check_native_header(path: &Path) -> Result<()> {
    let unreadable = |source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN)
        .read_to_end(&mut header)
        .map_err(unreadable)?;

    if header.is_empty() {
        return Err(LoadError::incompatible(path, "artifact is empty"));
    }
    if !is_native_header(&header) {
        return Err(LoadError::incompatible(
            path,
            format!("header {header:02x?} is not a {NATIVE_FORMAT} shared object"),
        ));
    }
    Ok(())
}
