//! 查询参数反序列化辅助
//!
//! `web::Query` 配合 `#[serde(flatten)]` 时所有值都以字符串形式到达，
//! 数字和布尔类型的可选参数需要从字符串解析。

use serde::Deserializer;
use serde::de::{Error, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub fn deserialize_optional_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    struct ParsedVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for ParsedVisitor<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        type Value = Option<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a value or a string that can be parsed into it")
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value.parse::<T>().map(Some).map_err(E::custom)
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
            self.visit_str(&value.to_string())
        }

        fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
            self.visit_str(if value { "true" } else { "false" })
        }
    }

    deserializer.deserialize_any(ParsedVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_parsed")]
        class_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_parsed")]
        mine: Option<bool>,
    }

    #[test]
    fn test_parse_from_strings_and_numbers() {
        let params: Params = serde_json::from_str(r#"{"class_id":"12","mine":"true"}"#).unwrap();
        assert_eq!(params.class_id, Some(12));
        assert_eq!(params.mine, Some(true));

        let params: Params = serde_json::from_str(r#"{"class_id":7,"mine":false}"#).unwrap();
        assert_eq!(params.class_id, Some(7));
        assert_eq!(params.mine, Some(false));
    }

    #[test]
    fn test_missing_and_empty() {
        let params: Params = serde_json::from_str(r#"{"class_id":""}"#).unwrap();
        assert_eq!(params.class_id, None);
        assert_eq!(params.mine, None);
    }

    #[test]
    fn test_invalid_value() {
        assert!(serde_json::from_str::<Params>(r#"{"class_id":"abc"}"#).is_err());
    }
}
