/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Driver for the SI1145 UV index, ambient light and proximity sensor.
//!
//! The device is reset and programmed once with [`SI1145::init`], after which
//! it free-runs in auto-run mode. The `read_*` methods fetch the latest
//! conversion results; they never trigger a new conversion.

#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;
use hal::delay::DelayNs;

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

mod interface;
pub use interface::{I2cInterface, SensorInterface};

mod units;
pub use units::{Distance, Illuminance};

/// Errors in this crate
#[derive(Debug)]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),

    /// Unrecognized chip ID (only reported by [`SI1145::setup`])
    UnknownChipId(u8),
}

/// Result of checking the part ID register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// The ID register matched [`SI1145_PART_ID`]
    Recognized,
    /// Some other value was read from the ID register
    Mismatch(u8),
}

impl Identity {
    fn from_part_id(part_id: u8) -> Self {
        if part_id == SI1145_PART_ID {
            Identity::Recognized
        } else {
            Identity::Mismatch(part_id)
        }
    }

    pub fn is_recognized(&self) -> bool {
        *self == Identity::Recognized
    }
}

pub struct Builder {}

impl Builder {
    /// Create a new driver using I2C interface at the fixed device address
    pub fn new_i2c<I2C, CommE>(i2c: I2C) -> SI1145<I2cInterface<I2C>>
    where
        I2C: hal::i2c::I2c<Error = CommE>,
        CommE: core::fmt::Debug,
    {
        let iface = interface::I2cInterface::new(i2c, DEFAULT_ADDRESS);
        SI1145::new_with_interface(iface)
    }
}

pub struct SI1145<SI> {
    pub(crate) si: SI,
}

impl<SI, CommE> SI1145<SI>
where
    SI: SensorInterface<InterfaceError = Error<CommE>>,
{
    pub fn new_with_interface(sensor_interface: SI) -> Self {
        Self {
            si: sensor_interface,
        }
    }

    /// Release owned resources
    pub fn release(self) -> SI {
        self.si
    }

    /// Read the raw part ID register
    pub fn chip_id(&mut self) -> Result<u8, SI::InterfaceError> {
        self.si.register_read(REG_PART_ID)
    }

    /// Read the part ID register and report whether it matches the SI1145
    pub fn check_identity(&mut self) -> Result<Identity, SI::InterfaceError> {
        let part_id = self.chip_id()?;
        let identity = Identity::from_part_id(part_id);
        match identity {
            Identity::Recognized => {
                #[cfg(feature = "rttdebug")]
                rprintln!("found device: 0x{:0x}  ", part_id);
            }
            Identity::Mismatch(_) => {
                #[cfg(feature = "rttdebug")]
                rprintln!("bogus part id: 0x{:0x}  ", part_id);
            }
        }
        Ok(identity)
    }

    /// Park the internal sequencer and clear the control registers
    pub fn reset(&mut self, delay_source: &mut impl DelayNs) -> Result<(), SI::InterfaceError> {
        self.si.register_write(REG_MEAS_RATE0, 0x00)?;
        self.si.register_write(REG_MEAS_RATE1, 0x00)?;
        self.si.register_write(REG_IRQ_ENABLE, 0x00)?;
        self.si.register_write(REG_IRQ_MODE1, 0x00)?;
        self.si.register_write(REG_IRQ_MODE2, 0x00)?;
        self.si.register_write(REG_INT_CFG, 0x00)?;
        self.si.register_write(REG_IRQ_STATUS, 0xFF)?;

        self.si.register_write(REG_COMMAND, CMD_RESET)?;
        // oscillator startup
        delay_source.delay_ms(RESET_DELAY_MS);
        self.si.register_write(REG_HW_KEY, HW_KEY_VAL)?;
        delay_source.delay_ms(RESET_DELAY_MS);

        Ok(())
    }

    /// Set an internal parameter through the PARAM_WR / COMMAND indirection.
    /// Returns the contents of PARAM_RD after the write.
    pub fn write_parameter(&mut self, param: u8, value: u8) -> Result<u8, SI::InterfaceError> {
        self.si.register_write(REG_PARAM_WR, value)?;
        self.si.register_write(REG_COMMAND, param | CMD_PARAM_SET)?;
        let result = self.si.register_read(REG_PARAM_RD)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("param 0x{:x} = 0x{:x} -> 0x{:x}", param, value, result);

        Ok(result)
    }

    /// Reset the sensor and program the full measurement configuration,
    /// leaving it in auto-run mode.
    ///
    /// A part ID mismatch does not abort configuration: it is reported in
    /// the returned [`Identity`] so the caller can decide what to do.
    pub fn init(&mut self, delay_source: &mut impl DelayNs) -> Result<Identity, SI::InterfaceError> {
        let identity = self.check_identity()?;

        self.reset(delay_source)?;

        // UV index measurement coefficients
        self.si.register_write(REG_UCOEF0, UCOEF[0])?;
        self.si.register_write(REG_UCOEF1, UCOEF[1])?;
        self.si.register_write(REG_UCOEF2, UCOEF[2])?;
        self.si.register_write(REG_UCOEF3, UCOEF[3])?;

        let chlist = CHLIST_EN_UV | CHLIST_EN_ALS_IR | CHLIST_EN_ALS_VIS | CHLIST_EN_PS1;
        self.write_parameter(PARAM_CHLIST, chlist)?;

        // interrupt on every sample
        self.si.register_write(REG_INT_CFG, 0x01)?;
        self.si.register_write(REG_IRQ_ENABLE, 0x01)?;

        // 20mA for LED 1 only
        self.si.register_write(REG_PS_LED21, 0x03)?;
        self.write_parameter(PARAM_PS1_ADCMUX, ADCMUX_LARGE_IR)?;
        // prox sensor #1 uses LED #1
        self.write_parameter(PARAM_PSLED12_SELECT, PSLED12_SELECT_LED1)?;
        self.write_parameter(PARAM_PS_ADC_GAIN, ADC_GAIN_DIV1)?;
        self.write_parameter(PARAM_PS_ADC_COUNTER, ADC_COUNTER_511CLK)?;
        self.write_parameter(PARAM_PS_ADC_MISC, ADC_MISC_HIGH_RANGE | PS_ADC_MISC_PS_MODE)?;

        self.write_parameter(PARAM_ALS_IR_ADCMUX, ADCMUX_SMALL_IR)?;
        self.write_parameter(PARAM_ALS_IR_ADC_GAIN, ADC_GAIN_DIV1)?;
        self.write_parameter(PARAM_ALS_IR_ADC_COUNTER, ADC_COUNTER_511CLK)?;
        self.write_parameter(PARAM_ALS_IR_ADC_MISC, ADC_MISC_HIGH_RANGE)?;

        self.write_parameter(PARAM_ALS_VIS_ADC_GAIN, ADC_GAIN_DIV1)?;
        self.write_parameter(PARAM_ALS_VIS_ADC_COUNTER, ADC_COUNTER_511CLK)?;
        self.write_parameter(PARAM_ALS_VIS_ADC_MISC, ADC_MISC_HIGH_RANGE)?;

        // 255 * 31.25uS = 8ms
        self.si.register_write(REG_MEAS_RATE0, 0xFF)?;

        self.si.register_write(REG_COMMAND, CMD_PSALS_AUTO)?;

        Ok(identity)
    }

    /// Like [`init`](Self::init), but treats a part ID mismatch as an error.
    /// The configuration is still written before the error is returned.
    pub fn setup(&mut self, delay_source: &mut impl DelayNs) -> Result<(), SI::InterfaceError> {
        match self.init(delay_source)? {
            Identity::Recognized => Ok(()),
            Identity::Mismatch(part_id) => Err(Error::UnknownChipId(part_id)),
        }
    }

    /// UV index, in units of the standard 0..11+ scale
    pub fn read_uv_index(&mut self) -> Result<f64, SI::InterfaceError> {
        let raw = self.si.read_u16_le(REG_UVINDEX0)?;
        Ok(raw as f64 / 100.0)
    }

    /// Visible ambient light
    pub fn read_light(&mut self, unit: Illuminance) -> Result<f64, SI::InterfaceError> {
        let raw = self.si.read_u16_le(REG_ALS_VIS_DATA0)?;
        Ok(unit.convert_lux(raw as f64))
    }

    /// Visible ambient light, selecting the unit by its numeric code
    /// (`1` = lux, `2` = foot-candles). Any other code yields `0.0`
    /// without touching the bus.
    pub fn read_light_code(&mut self, code: u8) -> Result<f64, SI::InterfaceError> {
        match Illuminance::from_code(code) {
            Some(unit) => self.read_light(unit),
            None => Ok(0.0),
        }
    }

    /// Raw infrared ADC counts
    pub fn read_infrared(&mut self) -> Result<u16, SI::InterfaceError> {
        self.si.read_u16_le(REG_ALS_IR_DATA0)
    }

    /// Proximity reading from PS1
    pub fn read_proximity(&mut self, unit: Distance) -> Result<f64, SI::InterfaceError> {
        let raw = self.si.read_u16_le(REG_PS1_DATA0)?;
        Ok(unit.convert_centimeters(raw as f64))
    }

    /// Proximity reading, selecting the unit by its numeric code
    /// (`1` = meters, `2` = centimeters). Any other code yields `0.0`
    /// without touching the bus.
    pub fn read_proximity_code(&mut self, code: u8) -> Result<f64, SI::InterfaceError> {
        match Distance::from_code(code) {
            Some(unit) => self.read_proximity(unit),
            None => Ok(0.0),
        }
    }
}

/// The fixed I2C address of the SI1145
pub const DEFAULT_ADDRESS: u8 = 0x60;

/// Expected contents of the PART_ID register
pub const SI1145_PART_ID: u8 = 0x45;

const RESET_DELAY_MS: u32 = 10;

/// Registers
///
pub const REG_PART_ID: u8 = 0x00;
pub const REG_INT_CFG: u8 = 0x03;
pub const REG_IRQ_ENABLE: u8 = 0x04;
pub const REG_IRQ_MODE1: u8 = 0x05;
pub const REG_IRQ_MODE2: u8 = 0x06;
pub const REG_HW_KEY: u8 = 0x07;
pub const REG_MEAS_RATE0: u8 = 0x08;
pub const REG_MEAS_RATE1: u8 = 0x09;
pub const REG_PS_LED21: u8 = 0x0F;
pub const REG_UCOEF0: u8 = 0x13;
pub const REG_UCOEF1: u8 = 0x14;
pub const REG_UCOEF2: u8 = 0x15;
pub const REG_UCOEF3: u8 = 0x16;
pub const REG_PARAM_WR: u8 = 0x17;
pub const REG_COMMAND: u8 = 0x18;
pub const REG_IRQ_STATUS: u8 = 0x21;
pub const REG_ALS_VIS_DATA0: u8 = 0x22;
pub const REG_ALS_IR_DATA0: u8 = 0x24;
pub const REG_PS1_DATA0: u8 = 0x26;
pub const REG_UVINDEX0: u8 = 0x2C;
pub const REG_PARAM_RD: u8 = 0x2E;

/// Parameter RAM addresses, set with [`SI1145::write_parameter`]
pub const PARAM_CHLIST: u8 = 0x01;
pub const PARAM_PSLED12_SELECT: u8 = 0x02;
pub const PARAM_PS1_ADCMUX: u8 = 0x07;
pub const PARAM_PS_ADC_COUNTER: u8 = 0x0A;
pub const PARAM_PS_ADC_GAIN: u8 = 0x0B;
pub const PARAM_PS_ADC_MISC: u8 = 0x0C;
pub const PARAM_ALS_IR_ADCMUX: u8 = 0x0E;
pub const PARAM_ALS_VIS_ADC_COUNTER: u8 = 0x10;
pub const PARAM_ALS_VIS_ADC_GAIN: u8 = 0x11;
pub const PARAM_ALS_VIS_ADC_MISC: u8 = 0x12;
pub const PARAM_ALS_IR_ADC_COUNTER: u8 = 0x1D;
pub const PARAM_ALS_IR_ADC_GAIN: u8 = 0x1E;
pub const PARAM_ALS_IR_ADC_MISC: u8 = 0x1F;

/// Commands
const CMD_RESET: u8 = 0x01;
const CMD_PSALS_AUTO: u8 = 0x0F;
/// High bits selecting the PARAM_SET command class
pub const CMD_PARAM_SET: u8 = 0xA0;

/// Required HW_KEY value for normal operation
const HW_KEY_VAL: u8 = 0x17;

/// UV coefficients from the vendor default init sequence
pub const UCOEF: [u8; 4] = [0x29, 0x89, 0x02, 0x00];

const CHLIST_EN_UV: u8 = 0x80;
const CHLIST_EN_ALS_IR: u8 = 0x20;
const CHLIST_EN_ALS_VIS: u8 = 0x10;
const CHLIST_EN_PS1: u8 = 0x01;

const ADCMUX_SMALL_IR: u8 = 0x00;
const ADCMUX_LARGE_IR: u8 = 0x03;
const PSLED12_SELECT_LED1: u8 = 0x01;

/// fastest clocks, clock div 1
const ADC_GAIN_DIV1: u8 = 0x00;
/// take 511 clocks to measure
const ADC_COUNTER_511CLK: u8 = 0x70;
const ADC_MISC_HIGH_RANGE: u8 = 0x20;
const PS_ADC_MISC_PS_MODE: u8 = 0x04;
