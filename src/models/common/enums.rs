//! 以字符串形式存储的枚举
//!
//! 数据库中统一存为小写字符串，接口中同样以字符串收发。

/// 定义字符串枚举的宏
///
/// 自动生成：
/// - enum 定义（serde / ts-rs）
/// - `as_str()` 与 `ALL`
/// - `Display` 与 `FromStr`
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($ts_file:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::ts_rs::TS,
        )]
        #[ts(export, export_to = $ts_file)]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: '{s}'. Supported: {}",
                        stringify!($name),
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    string_enum! {
        enum Sample("sample.ts") {
            First => "first",
            SecondValue => "second_value",
        }
    }

    #[test]
    fn test_round_trip_text() {
        for value in Sample::ALL {
            assert_eq!(value.as_str().parse::<Sample>(), Ok(*value));
        }
        assert_eq!(Sample::SecondValue.to_string(), "second_value");
    }

    #[test]
    fn test_unknown_value() {
        let err = "third".parse::<Sample>().unwrap_err();
        assert!(err.contains("first, second_value"));
    }

    #[test]
    fn test_serde_uses_text() {
        assert_eq!(
            serde_json::to_string(&Sample::SecondValue).unwrap(),
            "\"second_value\""
        );
        let parsed: Sample = serde_json::from_str("\"first\"").unwrap();
        assert_eq!(parsed, Sample::First);
    }
}
