use std::fs;
use yaml_rust::{Yaml, YamlLoader};

use crate::error::InputValidationError;

pub fn load_yaml(file_path: &str) -> Result<Vec<Yaml>, InputValidationError> {
    let malformed = |reason: String| InputValidationError::MalformedProcessFile {
        file_path: file_path.to_owned(),
        reason,
    };
    if !file_path.ends_with(".yaml") && !file_path.ends_with(".yml") {
        return Err(malformed("not a YAML file".to_owned()));
    }
    let file_content = fs::read_to_string(file_path).map_err(|err| malformed(err.to_string()))?;
    YamlLoader::load_from_str(&file_content).map_err(|err| malformed(err.to_string()))
}
