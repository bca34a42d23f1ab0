//! 共通フィールドバリデータ
//!
//! `#[validate(custom(function = "..."))]` から呼ばれる。

use validator::ValidationError;

/// 前後の空白を除いて空なら拒否
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("must not be blank".into()));
    }
    Ok(())
}

/// 有限かつ 0 より大きい値のみ許可
pub fn positive_amount(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new("range").with_message("must be greater than 0".into()));
    }
    Ok(())
}

/// ID 一覧の各要素が正であること
pub fn positive_ids(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id <= 0) {
        return Err(ValidationError::new("range").with_message("ids must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Shoes").is_ok());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(positive_amount(0.01).is_ok());
        assert!(positive_amount(0.0).is_err());
        assert!(positive_amount(-3.0).is_err());
        assert!(positive_amount(f64::NAN).is_err());
    }

    #[test]
    fn test_positive_ids() {
        assert!(positive_ids(&[]).is_ok());
        assert!(positive_ids(&[1, 2]).is_ok());
        assert!(positive_ids(&[1, 0]).is_err());
    }
}
