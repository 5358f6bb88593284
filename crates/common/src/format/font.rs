use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FormatError;

/// Font families offered by the toolbar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Inter,
    SpaceGrotesk,
    Georgia,
    CourierNew,
    Arial,
    Verdana,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        FontFamily::Inter,
        FontFamily::SpaceGrotesk,
        FontFamily::Georgia,
        FontFamily::CourierNew,
        FontFamily::Arial,
        FontFamily::Verdana,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::SpaceGrotesk => "Space Grotesk",
            Self::Georgia => "Georgia",
            Self::CourierNew => "Courier New",
            Self::Arial => "Arial",
            Self::Verdana => "Verdana",
        }
    }

    /// CSS `font-family` stack.
    pub fn css(self) -> &'static str {
        match self {
            Self::Inter => "Inter, sans-serif",
            Self::SpaceGrotesk => "'Space Grotesk', sans-serif",
            Self::Georgia => "Georgia, serif",
            Self::CourierNew => "'Courier New', monospace",
            Self::Arial => "Arial, sans-serif",
            Self::Verdana => "Verdana, sans-serif",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|family| {
                family.name().eq_ignore_ascii_case(wanted)
                    || family.name().replace(' ', "-").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| FormatError::UnknownFontFamily(value.to_string()))
    }
}

/// Legacy 1–7 font size scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct FontSize(u8);

const SIZE_PX: [&str; 7] = ["8px", "10px", "12px", "14px", "18px", "24px", "32px"];

impl FontSize {
    pub fn new(step: u8) -> Result<Self, FormatError> {
        if (1..=7).contains(&step) {
            Ok(Self(step))
        } else {
            Err(FormatError::InvalidFontSize(step.to_string()))
        }
    }

    pub fn step(self) -> u8 {
        self.0
    }

    /// Display size for the step: `1→8px … 7→32px`.
    pub fn px(self) -> &'static str {
        SIZE_PX[usize::from(self.0 - 1)]
    }
}

impl TryFrom<u8> for FontSize {
    type Error = FormatError;

    fn try_from(step: u8) -> Result<Self, Self::Error> {
        Self::new(step)
    }
}

impl From<FontSize> for u8 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

impl FromStr for FontSize {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(step) = SIZE_PX.iter().position(|px| *px == trimmed) {
            return Self::new(step as u8 + 1);
        }
        trimmed
            .parse::<u8>()
            .map_err(|_| FormatError::InvalidFontSize(value.to_string()))
            .and_then(Self::new)
    }
}
