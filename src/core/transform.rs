use crate::domain::model::{Day, Operation, TransformResult};
use crate::utils::error::{EtlError, Result};

/// Parses a raw day value as an integer. Surrounding whitespace and a sign are accepted.
pub fn coerce_value(day: Day, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| EtlError::ValueCoercion {
            day: day.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Mon/Tue/Wed square the value, Thu/Fri double it.
pub fn transform(day: Day, value: i64) -> Result<TransformResult> {
    let overflow = || EtlError::ValueCoercion {
        day: day.to_string(),
        value: value.to_string(),
        reason: "result does not fit in a 64-bit integer".to_string(),
    };

    match day.operation() {
        Operation::Square => value
            .checked_mul(value)
            .map(TransformResult::Square)
            .ok_or_else(overflow),
        Operation::Double => value
            .checked_mul(2)
            .map(TransformResult::Double)
            .ok_or_else(overflow),
    }
}
