// CLI parsing utilities for profile updates

use serde_json::{Map, Number, Value};
use crate::models::ProfileStep;
use crate::utils::date::parse_date_input;
use crate::utils::fuzzy::closest_match;

/// Profile field parse error
#[derive(Debug, PartialEq)]
pub enum FieldParseError {
    UnknownStep {
        step: String,
        suggestion: Option<String>,
    },
    InvalidFieldName {
        field: String,
        step: &'static str,
        suggestion: Option<String>,
    },
    NotAFieldToken {
        token: String,
    },
    InvalidValue {
        field: String,
        message: String,
    },
    NoFields,
}

impl std::fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldParseError::UnknownStep { step, suggestion } => {
                write!(f, "Unknown profile step '{}'", step)?;
                match suggestion {
                    Some(s) => write!(f, "\n  Did you mean '{}'?", s),
                    None => write!(f, "\n  Steps: {}", step_names().join(", ")),
                }
            }
            FieldParseError::InvalidFieldName { field, step, suggestion } => {
                write!(f, "Unrecognized field name '{}' for step '{}'", field, step)?;
                if let Some(s) = suggestion {
                    write!(f, "\n  Did you mean '{}'?", s)?;
                }
                Ok(())
            }
            FieldParseError::NotAFieldToken { token } => {
                write!(f, "Expected field=value, got '{}'", token)
            }
            FieldParseError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            FieldParseError::NoFields => {
                write!(f, "No fields given. Use field=value, e.g. kota=Bandung")
            }
        }
    }
}

fn step_names() -> Vec<&'static str> {
    ProfileStep::ALL.iter().map(|s| s.as_str()).collect()
}

/// Parse a profile step name, suggesting the nearest step on a typo
pub fn parse_profile_step(s: &str) -> Result<ProfileStep, FieldParseError> {
    let lower = s.to_lowercase();
    ProfileStep::from_str(&lower).ok_or_else(|| FieldParseError::UnknownStep {
        step: s.to_string(),
        suggestion: closest_match(&lower, &step_names(), 3).map(str::to_string),
    })
}

/// Parse `field=value` tokens for one profile step
///
/// An empty value (`field=`) clears the field and is sent as null.
pub fn parse_profile_fields(step: ProfileStep, args: &[String]) -> Result<Map<String, Value>, FieldParseError> {
    if args.is_empty() {
        return Err(FieldParseError::NoFields);
    }

    let mut fields = Map::new();
    for arg in args {
        let Some((field, value)) = arg.split_once('=') else {
            return Err(FieldParseError::NotAFieldToken { token: arg.clone() });
        };
        let field = field.trim().to_lowercase();
        if !step.fields().contains(&field.as_str()) {
            return Err(FieldParseError::InvalidFieldName {
                suggestion: closest_match(&field, step.fields(), 3).map(str::to_string),
                field,
                step: step.as_str(),
            });
        }

        let value = value.trim();
        let parsed = if value.is_empty() {
            Value::Null
        } else {
            parse_field_value(&field, value).map_err(|message| FieldParseError::InvalidValue {
                field: field.clone(),
                message,
            })?
        };
        fields.insert(field, parsed);
    }
    Ok(fields)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Validate and normalize a single field value
fn parse_field_value(field: &str, value: &str) -> Result<Value, String> {
    match field {
        "nik" => {
            if value.len() == 16 && all_digits(value) {
                Ok(Value::String(value.to_string()))
            } else {
                Err("NIK must be 16 digits".to_string())
            }
        }
        "tanggal_lahir" | "mulai" | "selesai" => {
            let date = parse_date_input(value).map_err(|e| e.to_string())?;
            Ok(Value::String(date.format("%Y-%m-%d").to_string()))
        }
        "jenis_kelamin" => match value.to_lowercase().as_str() {
            "l" | "laki-laki" | "pria" => Ok(Value::String("L".to_string())),
            "p" | "perempuan" | "wanita" => Ok(Value::String("P".to_string())),
            _ => Err("use L (laki-laki) or P (perempuan)".to_string()),
        },
        "no_hp" => {
            let digits = value.strip_prefix('+').unwrap_or(value);
            if all_digits(digits) && (9..=15).contains(&digits.len()) {
                Ok(Value::String(value.to_string()))
            } else {
                Err("phone number must be 9 to 15 digits, optionally starting with +".to_string())
            }
        }
        "kode_pos" => {
            if value.len() == 5 && all_digits(value) {
                Ok(Value::String(value.to_string()))
            } else {
                Err("postal code must be 5 digits".to_string())
            }
        }
        "ipk" => {
            let gpa: f64 = value.replace(',', ".").parse()
                .map_err(|_| format!("'{}' is not a number", value))?;
            if !(0.0..=4.0).contains(&gpa) {
                return Err("GPA must be between 0.00 and 4.00".to_string());
            }
            Number::from_f64(gpa)
                .map(Value::Number)
                .ok_or_else(|| format!("'{}' is not a number", value))
        }
        "tahun_lulus" => {
            let year: u16 = value.parse()
                .map_err(|_| format!("'{}' is not a year", value))?;
            if (1950..=2100).contains(&year) {
                Ok(Value::Number(year.into()))
            } else {
                Err("year must be between 1950 and 2100".to_string())
            }
        }
        _ => Ok(Value::String(value.to_string())),
    }
}
