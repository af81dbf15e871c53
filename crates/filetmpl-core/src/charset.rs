//! Text encodings used to read templates and write rendered output.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TmplError};

/// Supported character encodings. The same charset is used for read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode file contents. `path` is only used for error context.
    pub fn decode(&self, bytes: Vec<u8>, path: &Path) -> Result<String> {
        let invalid = || TmplError::Decode {
            path: path.to_path_buf(),
            charset: self.as_str(),
        };
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|_| invalid()),
            Self::Ascii => {
                if bytes.is_ascii() {
                    String::from_utf8(bytes).map_err(|_| invalid())
                } else {
                    Err(invalid())
                }
            }
            // Every byte maps to the code point of the same value.
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    /// Encode rendered text for writing.
    pub fn encode(&self, text: &str, path: &Path) -> Result<Vec<u8>> {
        let unmappable = || TmplError::Encode {
            path: path.to_path_buf(),
            charset: self.as_str(),
        };
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(unmappable())
                }
            }
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| unmappable()))
                .collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = TmplError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "us-ascii" | "ascii" => Ok(Self::Ascii),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
            _ => Err(TmplError::UnknownCharset(s.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Charset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Charset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("UTF-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("utf8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("Latin1".parse::<Charset>().unwrap(), Charset::Latin1);
        assert_eq!("US-ASCII".parse::<Charset>().unwrap(), Charset::Ascii);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "EBCDIC".parse::<Charset>().unwrap_err();
        assert!(matches!(err, TmplError::UnknownCharset(name) if name == "EBCDIC"));
    }

    #[test]
    fn test_latin1_maps_high_bytes() {
        let path = Path::new("t.txt");
        let text = Charset::Latin1.decode(vec![0x48, 0xB1], path).unwrap();
        assert_eq!(text, "H±");
        assert_eq!(Charset::Latin1.encode(&text, path).unwrap(), vec![0x48, 0xB1]);
    }

    #[test]
    fn test_latin1_rejects_wide_chars() {
        let err = Charset::Latin1.encode("€", Path::new("t.txt")).unwrap_err();
        assert!(matches!(err, TmplError::Encode { .. }));
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        let err = Charset::Utf8.decode(vec![0xff, 0xfe], Path::new("t.txt")).unwrap_err();
        assert!(matches!(err, TmplError::Decode { charset: "UTF-8", .. }));
    }

    #[test]
    fn test_ascii_rejects_non_ascii() {
        assert!(Charset::Ascii.decode("±".as_bytes().to_vec(), Path::new("t")).is_err());
        assert!(Charset::Ascii.encode("plain", Path::new("t")).is_ok());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Charset::Latin1).unwrap();
        assert_eq!(json, "\"ISO-8859-1\"");
        let back: Charset = serde_json::from_str("\"latin-1\"").unwrap();
        assert_eq!(back, Charset::Latin1);
    }
}
