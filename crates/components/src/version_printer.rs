//! Version reporter component.

use std::io::{self, Write};

use contracts::{ContractError, VersionPrinter, COMPONENT_ABI_VERSION};

/// Name and version of one library backing the components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryVersion {
    pub name: &'static str,
    pub version: String,
}

impl LibraryVersion {
    fn new(name: &'static str, version: impl Into<String>) -> Self {
        Self {
            name,
            version: version.into(),
        }
    }
}

/// Prints the versions of the launcher libraries to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryVersionPrinter;

impl LibraryVersionPrinter {
    pub fn versions() -> Vec<LibraryVersion> {
        vec![
            LibraryVersion::new("contracts", contracts::VERSION),
            LibraryVersion::new("artifact_resolver", artifact_resolver::VERSION),
            LibraryVersion::new("component_loader", component_loader::VERSION),
            LibraryVersion::new("config_loader", config_loader::VERSION),
            LibraryVersion::new("components", crate::VERSION),
            LibraryVersion::new("component ABI", COMPONENT_ABI_VERSION.to_string()),
        ]
    }

    /// Write one `name: version` line per library
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for library in Self::versions() {
            writeln!(out, "{}: {}", library.name, library.version)?;
        }
        out.flush()
    }
}

impl VersionPrinter for LibraryVersionPrinter {
    fn print_libraries_versions(&self) -> Result<(), ContractError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.report(&mut lock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let mut out = Vec::new();
        LibraryVersionPrinter.report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), LibraryVersionPrinter::versions().len());
        assert!(text.contains(&format!("contracts: {}", contracts::VERSION)));
        assert!(text.contains(&format!("component ABI: {COMPONENT_ABI_VERSION}")));
    }

    #[test]
    fn test_print_does_not_fail() {
        assert!(LibraryVersionPrinter.print_libraries_versions().is_ok());
    }
}
