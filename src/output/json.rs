use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn output_json<T: Serialize + ?Sized>(value: &T, output_file: Option<&Path>) -> Result<()> {
    super::write_output(&to_json(value)?, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::EcoDataBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_json_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("subdirs").join("eco.json");

        let eco = EcoDataBuilder::new().eco_score(64).build();
        output_json(&eco, Some(nested_path.as_path())).unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["ecoScore"], 64);
        assert!(value["co2"].is_null());
    }
}
