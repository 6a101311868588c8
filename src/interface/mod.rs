pub mod i2c;

pub use self::i2c::I2cInterface;

/// A method of communicating with the sensor
///
/// Every read is a two-phase addressed read: the register address is sent
/// as a command byte, then the typed value is read back.
pub trait SensorInterface {
    /// Interface error type
    type InterfaceError;

    /// Write a single byte `val` into register `reg`
    fn register_write(&mut self, reg: u8, val: u8) -> Result<(), Self::InterfaceError>;

    /// Read a single unsigned byte from register `reg`
    fn register_read(&mut self, reg: u8) -> Result<u8, Self::InterfaceError>;

    /// Read a single signed byte from register `reg`
    fn read_i8(&mut self, reg: u8) -> Result<i8, Self::InterfaceError> {
        Ok(self.register_read(reg)? as i8)
    }

    /// Read a little-endian u16 starting at register `reg`
    fn read_u16_le(&mut self, reg: u8) -> Result<u16, Self::InterfaceError>;

    /// Read a little-endian i16 starting at register `reg`
    fn read_i16_le(&mut self, reg: u8) -> Result<i16, Self::InterfaceError> {
        Ok(self.read_u16_le(reg)? as i16)
    }
}
