use embedded_hal as hal;

use super::SensorInterface;
use crate::Error;
#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

pub struct I2cInterface<I2C> {
    /// i2c port
    i2c_port: I2C,
    /// address for i2c communications
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c_port: i2c,
            address,
        }
    }

    /// The bus address this interface talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release owned resources
    pub fn release(self) -> I2C {
        self.i2c_port
    }

    fn read_block(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error<CommE>> {
        self.i2c_port
            .write_read(self.address, &[reg], buffer)
            .map_err(Error::Comm)
    }
}

impl<I2C, CommE> SensorInterface for I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    type InterfaceError = Error<CommE>;

    fn register_write(&mut self, reg: u8, val: u8) -> Result<(), Self::InterfaceError> {
        #[cfg(feature = "rttdebug")]
        rprintln!("write reg 0x{:x} 0x{:x} ", reg, val);

        let block: [u8; 2] = [reg, val];
        self.i2c_port
            .write(self.address, &block)
            .map_err(Error::Comm)
    }

    fn register_read(&mut self, reg: u8) -> Result<u8, Self::InterfaceError> {
        let mut block: [u8; 1] = [0; 1];
        self.read_block(reg, &mut block)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("read reg 0x{:x} {:x?} ", reg, block[0]);

        Ok(block[0])
    }

    fn read_u16_le(&mut self, reg: u8) -> Result<u16, Self::InterfaceError> {
        let mut block: [u8; 2] = [0; 2];
        self.read_block(reg, &mut block)?;
        Ok(u16::from_le_bytes(block))
    }

    fn read_i16_le(&mut self, reg: u8) -> Result<i16, Self::InterfaceError> {
        let mut block: [u8; 2] = [0; 2];
        self.read_block(reg, &mut block)?;
        Ok(i16::from_le_bytes(block))
    }
}
