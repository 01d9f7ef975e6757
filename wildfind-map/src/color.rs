use serde::{Deserialize, Serialize};

/// RGBA color of a feature style. Serialized as a `#RRGGBBAA` string.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// `#FFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// `#000000`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Creates a color from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid hex color.
    pub const fn from_hex(hex: &'static str) -> Self {
        match parse_hex(hex.as_bytes()) {
            Some(color) => color,
            None => panic!("invalid hex color"),
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        parse_hex(hex.as_bytes())
    }

    /// Same color with another alpha channel.
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Channels in RGBA order.
    pub fn to_u8_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#RRGGBBAA` representation.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_u8_array();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    /// Alpha channel.
    pub fn a(&self) -> u8 {
        self.a
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

const fn parse_hex(bytes: &[u8]) -> Option<Color> {
    if !(bytes.len() == 7 || bytes.len() == 9) || bytes[0] != b'#' {
        return None;
    }

    let mut channels = [255u8; 4];
    let mut i = 0;
    while 1 + i * 2 < bytes.len() {
        let (Some(high), Some(low)) = (nibble(bytes[1 + i * 2]), nibble(bytes[2 + i * 2])) else {
            return None;
        };
        channels[i] = high * 16 + low;
        i += 1;
    }

    Some(Color::rgba(channels[0], channels[1], channels[2], channels[3]))
}

const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let color = Color::try_from_hex("#FF6000CC").unwrap();
        assert_eq!(color.to_u8_array(), [255, 96, 0, 204]);
        assert_eq!(color.to_hex(), "#FF6000CC");
        assert_eq!(Color::from_hex("#ff6000cc"), color);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::from_hex("#003D99")).unwrap();
        assert_eq!(json, "\"#003D99FF\"");
        assert_eq!(
            serde_json::from_str::<Color>(&json).unwrap(),
            Color::rgba(0, 61, 153, 255)
        );
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::try_from_hex("ff6000").is_none());
        assert!(Color::try_from_hex("#ff60zz").is_none());
        assert!(Color::try_from_hex("#ff600").is_none());
    }

    #[test]
    fn hex6_is_opaque() {
        assert_eq!(Color::from_hex("#DD6300").a(), 255);
        assert_eq!(Color::BLACK.with_alpha(51).to_u8_array(), [0, 0, 0, 51]);
    }
}
