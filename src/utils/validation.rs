use crate::domain::model::report_file_name;
use crate::utils::error::{EtlError, Result};
use std::collections::{HashMap, HashSet};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_list(field_name: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Err(EtlError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one entry is required".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Every source must map to its own report file, otherwise one report
/// overwrites another on disk or collides inside the archive.
pub fn validate_unique_report_names(field_name: &str, sources: &[String]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for source in sources {
        let name = report_file_name(source);
        if let Some(previous) = seen.insert(name.clone(), source) {
            return Err(EtlError::ConfigValidationError {
                field: field_name.to_string(),
                message: format!(
                    "'{}' and '{}' would both be written as '{}'",
                    previous, source, name
                ),
            });
        }
    }

    Ok(())
}

/// Checks shared by every [`ConfigProvider`](crate::core::ConfigProvider).
pub fn validate_provider<C: crate::core::ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("data_dir", config.data_dir())?;
    validate_non_empty_list("sources", config.sources())?;
    validate_file_extensions("sources", config.sources(), &["csv"])?;

    // stdout 模式不寫檔，同名報表不會互相覆蓋
    if let Some(output_path) = config.output_path() {
        validate_path("output_path", output_path)?;
        validate_unique_report_names("sources", config.sources())?;
    }

    if let Some(archive) = config.archive_name() {
        if config.output_path().is_none() {
            return Err(EtlError::ConfigValidationError {
                field: "archive".to_string(),
                message: "An archive needs an output path to be written to".to_string(),
            });
        }
        validate_non_empty_string("archive", archive)?;
        validate_file_extensions("archive", &[archive.to_string()], &["zip"])?;
    }

    Ok(())
}
