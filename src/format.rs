//! Rendering of a parsed fix in the configured position unit.

use crate::osgb;
use crate::parser::Fix;

/// The units a position can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosUnit {
    /// UTC time of the fix only.
    Time,
    /// The raw GGA sentence.
    Nmea,
    /// Ordnance Survey National Grid reference.
    Osgb,
    /// Degrees, minutes and decimal seconds.
    LlMinSec,
    /// Degrees and decimal minutes.
    LlMinDec,
    /// Signed decimal degrees.
    LlDecimal,
}

/// Names accepted in config files and on the command line.
const UNIT_NAMES: [(&str, PosUnit); 6] = [
    ("TIME", PosUnit::Time),
    ("NMEA", PosUnit::Nmea),
    ("OSGB", PosUnit::Osgb),
    ("LLMINSEC", PosUnit::LlMinSec),
    ("LLMINDEC", PosUnit::LlMinDec),
    ("LLDECIMAL", PosUnit::LlDecimal),
];

impl PosUnit {
    /// Looks a unit up by its configuration name, case insensitively.
    pub fn from_name(name: &str) -> Option<PosUnit> {
        UNIT_NAMES
            .iter()
            .find(|&&(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, unit)| unit)
    }

    pub fn name(self) -> &'static str {
        match UNIT_NAMES.iter().find(|&&(_, unit)| unit == self) {
            Some(&(name, _)) => name,
            None => unreachable!(),
        }
    }
}

/// Renders `fix` in `unit`, one newline-terminated line per printed
/// value. The latitude/longitude units print two lines, latitude
/// first; everything else prints one.
pub fn format_fix(fix: &Fix, unit: PosUnit) -> String {
    match unit {
        PosUnit::Time => format!("{}\n", fix.utc.format("%H:%M:%S")),
        PosUnit::Nmea => format!("${}\n", fix.raw),
        PosUnit::Osgb => format!("{}\n", osgb::to_grid(fix.lat(), fix.lon())),
        PosUnit::LlMinSec => {
            let lat_sec = 60.0 * fix.lat_min.fract();
            let lon_sec = 60.0 * fix.lon_min.fract();
            format!(
                "lat: {:3}{}{:02}'{:06.3}\"\nlon: {:3}{}{:02}'{:06.3}\"\n",
                fix.lat_deg,
                hemisphere(fix.lat_deg, 'N', 'S'),
                fix.lat_min.trunc() as i32,
                lat_sec,
                fix.lon_deg,
                hemisphere(fix.lon_deg, 'E', 'W'),
                fix.lon_min.trunc() as i32,
                lon_sec,
            )
        }
        PosUnit::LlMinDec => format!(
            "lat: {:3}{}{:8.4}'\nlon: {:3}{}{:8.4}'\n",
            fix.lat_deg.abs(),
            hemisphere(fix.lat_deg, 'N', 'S'),
            fix.lat_min,
            fix.lon_deg.abs(),
            hemisphere(fix.lon_deg, 'E', 'W'),
            fix.lon_min,
        ),
        PosUnit::LlDecimal => format!("lat: {:+10.5}\nlon: {:+10.5}\n", fix.lat(), fix.lon()),
    }
}

fn hemisphere(degrees: i32, positive: char, negative: char) -> char {
    if degrees < 0 {
        negative
    } else {
        positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FixQuality;

    use chrono::NaiveTime;

    fn fix() -> Fix {
        Fix {
            utc: NaiveTime::from_hms_opt(12, 35, 19).unwrap(),
            lat_deg: 48,
            lat_min: 7.038,
            lon_deg: 11,
            lon_min: 31.0,
            quality: FixQuality::GpsFix,
            raw: "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,".to_owned(),
        }
    }

    fn uk_fix() -> Fix {
        Fix {
            utc: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            lat_deg: 52,
            lat_min: 30.0,
            lon_deg: 1,
            lon_min: 30.0,
            quality: FixQuality::GpsFix,
            raw: "GPGGA,090000,5230.000,N,00130.000,E,1,08,0.9,12.0,M,46.9,M,,".to_owned(),
        }
    }

    #[test]
    fn time_is_the_utc_alone() {
        assert_eq!(format_fix(&fix(), PosUnit::Time), "12:35:19\n");
    }

    #[test]
    fn nmea_is_the_raw_sentence_with_dollar() {
        assert_eq!(
            format_fix(&fix(), PosUnit::Nmea),
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,\n"
        );
    }

    #[test]
    fn decimal_degrees_carry_an_explicit_sign() {
        assert_eq!(
            format_fix(&fix(), PosUnit::LlDecimal),
            "lat:  +48.11730\nlon:  +11.51667\n"
        );
    }

    #[test]
    fn minutes_and_seconds_are_zero_padded() {
        assert_eq!(
            format_fix(&fix(), PosUnit::LlMinSec),
            "lat:  48N07'02.280\"\nlon:  11E31'00.000\"\n"
        );
    }

    #[test]
    fn decimal_minutes_use_absolute_degrees() {
        assert_eq!(
            format_fix(&fix(), PosUnit::LlMinDec),
            "lat:  48N  7.0380'\nlon:  11E 31.0000'\n"
        );
    }

    #[test]
    fn southern_fix_shows_s_and_w() {
        let mut f = fix();
        f.lat_deg = -33;
        f.lat_min = 42.5;
        f.lon_deg = -150;
        f.lon_min = 45.25;
        let out = format_fix(&f, PosUnit::LlMinDec);
        assert_eq!(out, "lat:  33S 42.5000'\nlon: 150W 45.2500'\n");
    }

    #[test]
    fn osgb_renders_the_grid_reference() {
        assert_eq!(format_fix(&uk_fix(), PosUnit::Osgb), "[TM][37530][94922]\n");
    }

    #[test]
    fn unit_names_are_case_insensitive() {
        assert_eq!(PosUnit::from_name("osgb"), Some(PosUnit::Osgb));
        assert_eq!(PosUnit::from_name("LlDecimal"), Some(PosUnit::LlDecimal));
        assert_eq!(PosUnit::from_name("furlongs"), None);
    }

    #[test]
    fn unit_names_round_trip() {
        for &(name, unit) in &UNIT_NAMES {
            assert_eq!(PosUnit::from_name(name), Some(unit));
            assert_eq!(unit.name(), name);
        }
    }
}
