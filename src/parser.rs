//! Field-level parsing of the *GGA* sentence of the *NMEA 0183*
//! protocol.

use chrono::NaiveTime;

use std::str::{self, FromStr};

use crate::err::ParseError;
use crate::framer::TAG_LENGTH;

/// Digits of whole degrees at the front of the latitude field.
const LAT_SPLIT: usize = 2;
const ABS_MAX_LAT: f64 = 90.0;
/// Longitude degrees span 0-180 and need three digits.
const LONG_SPLIT: usize = 3;
const ABS_MAX_LONG: f64 = 180.0;
/// Index of the quality indicator, counted from the UTC field.
const QUALITY_FIELD: usize = 5;

/// The cardinal directions.
#[derive(Debug)]
enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    #[inline]
    fn get_sign(&self) -> i32 {
        match self {
            CardDir::North | CardDir::East => 1,
            CardDir::South | CardDir::West => -1,
        }
    }
}

/// Indicator of the quality of gps data, field 5 of a GGA sentence.
///
/// A sentence reporting `0` never becomes a [`Fix`]; receivers use
/// `1..=8` for the standard modes and anything else ends up in `Other`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixQuality {
    GpsFix,
    DifferentialGpsFix,
    PpsFix,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    ManualInputMode,
    SimulationMode,
    Other(i64),
}

impl FixQuality {
    /// Maps the raw indicator field. A field that does not parse as an
    /// integer counts as `0`: the receiver has no fix yet.
    fn from_field(field: &str) -> Result<Self, ParseError> {
        match i64::from_str(field).unwrap_or(0) {
            0 => Err(ParseError::NoFix),
            1 => Ok(FixQuality::GpsFix),
            2 => Ok(FixQuality::DifferentialGpsFix),
            3 => Ok(FixQuality::PpsFix),
            4 => Ok(FixQuality::RealTimeKinematic),
            5 => Ok(FixQuality::FloatRtk),
            6 => Ok(FixQuality::Estimated),
            7 => Ok(FixQuality::ManualInputMode),
            8 => Ok(FixQuality::SimulationMode),
            other => Ok(FixQuality::Other(other)),
        }
    }
}

/// One successful position fix extracted from a GGA sentence.
#[derive(Debug, Clone)]
pub struct Fix {
    /// Universal Time Coordinated (UTC) time of the fix.
    pub utc: NaiveTime,
    /// Whole degrees of latitude. Negative in the southern hemisphere.
    pub lat_deg: i32,
    /// Decimal minutes of latitude.
    pub lat_min: f64,
    /// Whole degrees of longitude. Negative in the western hemisphere.
    pub lon_deg: i32,
    /// Decimal minutes of longitude.
    pub lon_min: f64,
    /// Quality reported by the receiver. Never "no fix".
    pub quality: FixQuality,
    /// The sentence the fix came from, without the leading `$`.
    pub raw: String,
}

impl Fix {
    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        f64::from(self.lat_deg) + self.lat_min / 60.0
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        f64::from(self.lon_deg) + self.lon_min / 60.0
    }
}

/// Parses the body of a GGA sentence, everything between `$` and
/// `<CR>`, with the five character tag still at the front.
///
/// Fields are counted from the UTC field, so the quality indicator is
/// field 5. The quality gate runs first; a sentence with no fix, too
/// few fields, or a field that fails numeric parsing is rejected as a
/// whole and the caller goes back to framing.
pub fn parse(sentence: &[u8]) -> Result<Fix, ParseError> {
    let body = str::from_utf8(sentence)?;
    let data = body
        .get(TAG_LENGTH + 1..)
        .ok_or(ParseError::MissingFields(0))?;
    let fields: Vec<&str> = data.split(',').collect();

    let quality = FixQuality::from_field(field(&fields, QUALITY_FIELD)?)?;

    let utc = NaiveTime::parse_from_str(field(&fields, 0)?, "%H%M%S%.f")?;

    let lat_dir = if field(&fields, 2)?.starts_with('N') {
        CardDir::North
    } else {
        CardDir::South
    };
    let (lat_deg, lat_min) = parse_coord(field(&fields, 1)?, &lat_dir, LAT_SPLIT, ABS_MAX_LAT)?;

    let long_dir = if field(&fields, 4)?.starts_with('E') {
        CardDir::East
    } else {
        CardDir::West
    };
    let (lon_deg, lon_min) = parse_coord(field(&fields, 3)?, &long_dir, LONG_SPLIT, ABS_MAX_LONG)?;

    Ok(Fix {
        utc,
        lat_deg,
        lat_min,
        lon_deg,
        lon_min,
        quality,
        raw: body.to_owned(),
    })
}

/// Access past the end of a truncated sentence is a parse failure, not
/// a panic.
fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, ParseError> {
    fields
        .get(index)
        .copied()
        .ok_or(ParseError::MissingFields(fields.len()))
}

/// Splits a `ddmm.mmm` (or `dddmm.mmm`) coordinate field into whole
/// degrees and decimal minutes. `deg_split` is the number of digits
/// that make up the degrees; `dir` gives the degrees their sign.
fn parse_coord(
    coord: &str,
    dir: &CardDir,
    deg_split: usize,
    abs_max: f64,
) -> Result<(i32, f64), ParseError> {
    // This check is needed to ensure we don't panic
    if deg_split > coord.len() || !coord.is_char_boundary(deg_split) {
        return Err(ParseError::InvalidValue(
            "the field is too short for a coordinate",
        ));
    }

    let (deg, min) = coord.split_at(deg_split);
    let degrees = i32::from_str(deg)?;
    let minutes = f64::from_str(min)?;
    if minutes < 0.0 || minutes >= 60.0 {
        return Err(ParseError::InvalidValue("minutes must be below 60"));
    }
    let dec_deg = f64::from(degrees) + minutes / 60.0;
    if dec_deg > abs_max {
        return Err(ParseError::InvalidCoord(dec_deg, abs_max));
    }
    Ok((degrees * dir.get_sign(), minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";

    #[test]
    fn parses_the_classic_example() {
        let fix = parse(BODY).unwrap();
        assert_eq!(fix.utc.format("%H:%M:%S").to_string(), "12:35:19");
        assert_eq!(fix.lat_deg, 48);
        assert!((fix.lat_min - 7.038).abs() < 1e-9);
        assert_eq!(fix.lon_deg, 11);
        assert!((fix.lon_min - 31.0).abs() < 1e-9);
        assert_eq!(fix.quality, FixQuality::GpsFix);
        assert_eq!(fix.raw.as_bytes(), BODY);
    }

    #[test]
    fn keeps_the_checksum_field_out_of_the_way() {
        // A real receiver appends "*hh"; it lands in a field nobody reads.
        let fix = parse(b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47").unwrap();
        assert_eq!(fix.lat_deg, 48);
    }

    #[test]
    fn south_and_west_negate_degrees() {
        let fix = parse(b"GPGGA,002153,3342.6618,S,15045.3063,W,1,10,1.2,2.7,M,19.7,M,,").unwrap();
        assert_eq!(fix.lat_deg, -33);
        assert!((fix.lat_min - 42.6618).abs() < 1e-9);
        assert_eq!(fix.lon_deg, -150);
        assert!((fix.lon_min - 45.3063).abs() < 1e-9);
    }

    #[test]
    fn quality_zero_is_rejected() {
        let res = parse(b"GPGGA,123519,4807.038,N,01131.000,E,0,00,,,M,,M,,");
        assert_matches!(res, Err(ParseError::NoFix));
    }

    #[test]
    fn unparseable_quality_counts_as_no_fix() {
        let res = parse(b"GPGGA,123519,4807.038,N,01131.000,E,x,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::NoFix));
    }

    #[test]
    fn differential_quality_is_carried() {
        let fix = parse(b"GPGGA,123519,4807.038,N,01131.000,E,2,08,0.9,545.4,M,46.9,M,,").unwrap();
        assert_eq!(fix.quality, FixQuality::DifferentialGpsFix);
    }

    #[test]
    fn truncated_sentence_is_rejected() {
        assert_matches!(
            parse(b"GPGGA,123519,4807.038"),
            Err(ParseError::MissingFields(2))
        );
    }

    #[test]
    fn bare_tag_is_rejected() {
        assert_matches!(parse(b"GPGGA"), Err(ParseError::MissingFields(0)));
    }

    #[test]
    fn short_utc_field_is_rejected() {
        let res = parse(b"GPGGA,1235,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::Time(_)));
    }

    #[test]
    fn non_digit_degrees_are_rejected() {
        let res = parse(b"GPGGA,123519,4x07.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::Degrees(_)));
    }

    #[test]
    fn minutes_of_sixty_or_more_are_rejected() {
        let res = parse(b"GPGGA,123519,4861.000,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::InvalidValue(_)));
    }

    #[test]
    fn latitude_beyond_ninety_degrees_is_rejected() {
        let res = parse(b"GPGGA,123519,9930.000,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::InvalidCoord(_, _)));
    }

    #[test]
    fn short_coordinate_field_is_rejected() {
        let res = parse(b"GPGGA,123519,4,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");
        assert_matches!(res, Err(ParseError::InvalidValue(_)));
    }
}
