//! 配置校验模块
//!
//! 校验规则：
//! - input / output 非空 (derive 规则)
//! - watermark 启用时必须给出非空 fullFileName（未启用时忽略）

use contracts::{ContractError, StreamerSettings};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// 校验 StreamerSettings
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(settings: &StreamerSettings) -> Result<(), ContractError> {
    validate_fields(settings)?;
    validate_watermark(settings)?;
    Ok(())
}

/// derive 规则
fn validate_fields(settings: &StreamerSettings) -> Result<(), ContractError> {
    settings.validate().map_err(|errors| {
        let (field, message) = first_violation(&errors, "")
            .unwrap_or_else(|| (String::from("<root>"), errors.to_string()));
        ContractError::config_validation(field, message)
    })
}

/// 校验 watermark 交叉字段
fn validate_watermark(settings: &StreamerSettings) -> Result<(), ContractError> {
    let watermark = &settings.program_settings.watermark;
    if !watermark.enabled {
        return Ok(());
    }
    match watermark.full_file_name.as_deref() {
        None => Err(ContractError::config_validation(
            "programSettings.watermark.fullFileName",
            "required when watermark is enabled",
        )),
        Some("") => Err(ContractError::config_validation(
            "programSettings.watermark.fullFileName",
            "watermark location is empty",
        )),
        Some(_) => Ok(()),
    }
}

/// Dotted path and message of the first failing rule, by sorted field name
fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by_key(|(key, _)| key.to_string());

    for (key, kind) in entries {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(error) = field_errors.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    return Some((path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                if let Some(found) = first_violation(nested, &path) {
                    return Some(found);
                }
            }
            ValidationErrorsKind::List(items) => {
                for (idx, nested) in items {
                    if let Some(found) = first_violation(nested, &format!("{path}[{idx}]")) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}
