//! CLI subcommand implementations.

pub mod export;
pub mod import;
pub mod list;
pub mod status;

use anyhow::bail;
use roster_core::Record;

/// Parse a `field=value` filter argument, checking the field exists on the
/// record type being queried.
pub fn parse_filter<R: Record>(spec: &str) -> anyhow::Result<(String, String)> {
    let Some((field, value)) = spec.split_once('=') else {
        bail!("invalid filter '{}': expected field=value", spec);
    };
    let field = field.trim();
    if !R::FIELDS.contains(&field) {
        bail!(
            "unknown {} field '{}' (expected one of: {})",
            R::KIND,
            field,
            R::FIELDS.join(", ")
        );
    }
    Ok((field.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Employee, HiringRequisition};

    #[test]
    fn test_parse_filter() {
        let (field, value) = parse_filter::<Employee>("core_team=Platform").unwrap();
        assert_eq!(field, "core_team");
        assert_eq!(value, "Platform");

        assert!(parse_filter::<Employee>("no-equals").is_err());
        // Field exists on hiring but not on employee
        assert!(parse_filter::<Employee>("hiring_manager=Keshav").is_err());
        assert!(parse_filter::<HiringRequisition>("hiring_manager=Keshav").is_ok());
    }
}
