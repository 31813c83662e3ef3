//! Helper for string-valued enums that appear both in JSON bodies and in
//! query strings.

/// Define an enum whose variants map to fixed wire strings.
///
/// Generates serde impls using the wire strings, `as_str`, `Display`, and a
/// case-insensitive `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The exact string used on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
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
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                let expected: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                Err(format!("expected one of {}, got '{}'", expected.join(", "), s))
            }
        }
    };
}

pub(crate) use wire_enum;

/// Parse a filter value where `all` (any case) means "no filter".
///
/// # Errors
///
/// Returns the parse message when the value is neither `all` nor a variant.
pub fn parse_filter<T>(value: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr<Err = String>,
{
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        enum Colour {
            Red => "RED",
            LightBlue => "light-blue",
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("red".parse::<Colour>().unwrap(), Colour::Red);
        assert_eq!("LIGHT-BLUE".parse::<Colour>().unwrap(), Colour::LightBlue);
    }

    #[test]
    fn unknown_value_lists_choices() {
        let err = "green".parse::<Colour>().unwrap_err();
        assert!(err.contains("RED, light-blue"));
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Colour::LightBlue).unwrap(),
            "\"light-blue\""
        );
        let parsed: Colour = serde_json::from_str("\"RED\"").unwrap();
        assert_eq!(parsed, Colour::Red);
    }

    #[test]
    fn all_maps_to_no_filter() {
        assert_eq!(parse_filter::<Colour>("All").unwrap(), None);
        assert_eq!(parse_filter::<Colour>("red").unwrap(), Some(Colour::Red));
        assert!(parse_filter::<Colour>("green").is_err());
    }
}
