//! ホスト由来の任意値をテキストに寄せるヘルパー

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 任意の JSON 値をテキスト化する
///
/// - null → 空文字
/// - 文字列 → そのまま
/// - 数値・真偽値 → 表記どおり
/// - 配列・オブジェクト → JSON テキスト
pub fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// `Option<Option<String>>` を使わずに「null 指定」と「未指定」を区別する
///
/// `#[serde(default, deserialize_with = "lenient_text")]` と組み合わせると、
/// キーが無ければ `None`、null を含む何らかの値があれば `Some(text)` になる。
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(text_of(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::null(json!(null), "")]
    #[case::text(json!(" a "), " a ")]
    #[case::int(json!(3), "3")]
    #[case::float(json!(1.5), "1.5")]
    #[case::flag(json!(true), "true")]
    fn text_of_coerces_scalars(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(text_of(&value), expected);
    }
}
