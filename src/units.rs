#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Output unit for ambient light readings.
/// The numeric values are the legacy selector codes.
pub enum Illuminance {
    /// lx
    Lux = 1,
    /// fc
    FootCandle = 2,
}

impl Illuminance {
    /// Divisor taking the lux reading to foot-candles
    const LUX_PER_FOOT_CANDLE: f64 = 10764.0;

    /// Map a legacy selector code onto a unit
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Illuminance::Lux),
            2 => Some(Illuminance::FootCandle),
            _ => None,
        }
    }

    pub(crate) fn convert_lux(&self, lux: f64) -> f64 {
        match self {
            Illuminance::Lux => lux,
            Illuminance::FootCandle => lux / Self::LUX_PER_FOOT_CANDLE,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Output unit for proximity readings.
/// The numeric values are the legacy selector codes.
pub enum Distance {
    /// m
    Meter = 1,
    /// cm
    Centimeter = 2,
}

impl Distance {
    const CENTIMETERS_PER_METER: f64 = 100.0;

    /// Map a legacy selector code onto a unit
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Distance::Meter),
            2 => Some(Distance::Centimeter),
            _ => None,
        }
    }

    pub(crate) fn convert_centimeters(&self, cm: f64) -> f64 {
        match self {
            Distance::Meter => cm / Self::CENTIMETERS_PER_METER,
            Distance::Centimeter => cm,
        }
    }
}
