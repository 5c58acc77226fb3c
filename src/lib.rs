//! # S5P / Exynos HDMI PHY Driver
//!
//! This is a driver for the HDMI physical-layer transceiver found in the
//! Samsung S5PV210 and Exynos 4 SoCs.
//!
//! The PHY sits on an internal I²C bus. It is configured by writing a fixed
//! 32 byte register image for the required pixel clock, and then switched from
//! *configuration* mode into *operation* mode to start driving the TMDS lanes.
//! This driver only writes those bytes - the PHY does all of the clock
//! generation itself, and timing negotiation belongs to the HDMI controller.
//!
//! The register images are different for each SoC family, so you must say
//! which [`Variant`] you have, either directly or with one of the I²C device
//! names in [`DEVICE_IDS`].
//!
//! The PHY registers are write-only as far as this driver is concerned. Nothing
//! is read back.
//!
//! # Example
//!
//! You might bring up a 720p60 output like this:
//!
//! ```rust
//! # struct I2c;
//! # impl embedded_hal::blocking::i2c::Write for I2c {
//! #     type Error = ();
//! #     fn write(&mut self, address: embedded_hal::blocking::i2c::SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let i2c = I2c;
//! use s5p_hdmiphy::Subdevice;
//!
//! let mut phy = s5p_hdmiphy::HdmiPhy::attach(
//!     i2c,
//!     s5p_hdmiphy::DEFAULT_ADDRESS,
//!     "hdmiphy-exynos4412",
//! )
//! .unwrap();
//! let timings = s5p_hdmiphy::DvTimings {
//!     pixelclock: 74_250_000,
//!     flags: 0,
//! };
//! if let Err(e) = phy.set_dv_timings(&timings) {
//!     // PHY didn't take the configuration
//! }
//! if let Err(e) = phy.set_stream(true) {
//!     // PHY didn't start
//! }
//! let _i2c = phy.detach();
//! ```

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod config;

pub use config::{PhyConfig, Variant, CONFIG_LEN, DEVICE_IDS};

//
// Public Types
//

/// Digital video timings requested by the HDMI controller.
///
/// Only the fields the PHY cares about are carried.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DvTimings {
    /// Pixel clock, in Hz
    pub pixelclock: u64,
    /// Some combination of the `DV_FL_*` flags
    pub flags: u32,
}

/// The kind of timings described by a [`DvTimingsCap`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingsType {
    /// BT.656 / BT.1120 style timings
    Bt656_1120 = 0,
}

/// Limits on BT.656 / BT.1120 timings.
///
/// A value of zero means the device places no constraint on that field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BtTimingsCap {
    /// Minimum active width, in pixels
    pub min_width: u32,
    /// Maximum active width, in pixels
    pub max_width: u32,
    /// Minimum active height, in lines
    pub min_height: u32,
    /// Maximum active height, in lines
    pub max_height: u32,
    /// Minimum pixel clock, in Hz
    pub min_pixelclock: u64,
    /// Maximum pixel clock, in Hz
    pub max_pixelclock: u64,
    /// Supported timing standards
    pub standards: u32,
    /// Supported capability flags
    pub capabilities: u32,
}

/// The timings a pad can handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DvTimingsCap {
    /// What sort of timings these are
    pub kind: TimingsType,
    /// The limits themselves
    pub bt: BtTimingsCap,
}

/// Broad classes of failure, for hosts which only care about the class.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// The request asked for something the PHY cannot do
    InvalidArgument,
    /// The PHY did not accept a write
    Io,
}

/// Everything that can go wrong when driving the PHY.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// There is no register image for this pixel clock (in Hz)
    UnsupportedPixelClock(u64),
    /// The PHY only has pad 0
    InvalidPad(u32),
    /// The I²C device name isn't one in [`DEVICE_IDS`]
    UnknownDevice,
    /// The bus reported an error
    Bus(E),
    /// The PHY stopped accepting bytes part way through a write
    ShortWrite {
        /// How many bytes we sent
        expected: usize,
        /// How many bytes were accepted
        written: usize,
    },
}

/// Something that can send bytes to an I²C device and say how many arrived.
///
/// Every [`embedded_hal::blocking::i2c::Write`] implementation gets this for
/// free. Implement it yourself if your bus can report partial transfers.
pub trait Transport {
    /// The error the bus returns
    type Error;

    /// Send `bytes` to the device at 7-bit address `address`.
    ///
    /// Returns the number of bytes the device acknowledged.
    fn send(&mut self, address: u8, bytes: &[u8]) -> Result<usize, Self::Error>;
}

/// The operations a video host calls on a sub-device.
///
/// These correspond to the core, video and pad callbacks of a video
/// sub-device.
pub trait Subdevice {
    /// The error returned by these operations
    type Error;

    /// Power the sub-device up or down.
    fn set_power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Set up the sub-device for some output timings.
    fn set_dv_timings(&mut self, timings: &DvTimings) -> Result<(), Self::Error>;

    /// Start or stop streaming.
    fn set_stream(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Report the timings supported on the given pad.
    fn dv_timings_cap(&self, pad: u32) -> Result<DvTimingsCap, Self::Error>;
}

/// Represents one HDMI PHY attached to an I²C bus.
pub struct HdmiPhy<B> {
    bus: B,
    bus_address: u8,
    variant: Variant,
}

//
// Public Data
//

/// The name this driver registers under.
pub const DRIVER_NAME: &str = "s5p-hdmiphy";

/// The 7-bit I²C address of the PHY on S5PV210 and Exynos 4 boards.
pub const DEFAULT_ADDRESS: u8 = 0x38;

/// Timings flag: the frame rate is reduced by a factor of 1000/1001.
pub const DV_FL_REDUCED_FPS: u32 = 1 << 3;

/// The lowest pixel clock any PHY variant supports, in Hz.
pub const MIN_PIXELCLOCK: u64 = 27_000_000;

/// The highest pixel clock any PHY variant supports, in Hz.
pub const MAX_PIXELCLOCK: u64 = 148_500_000;

//
// Private Data
//

/// Mode control register
const REG_MODE: u8 = 0x1F;

/// Written to [`REG_MODE`] to leave configuration mode and start the PHY
const MODE_OPERATION: u8 = 0x80;

/// Written to [`REG_MODE`] to stop the PHY so it can be reconfigured
const MODE_CONFIGURATION: u8 = 0x00;

//
// impls on Public Types
//

impl ErrorKind {
    /// The (negative) Linux errno for this kind of error.
    pub fn errno(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => -22,
            ErrorKind::Io => -5,
        }
    }
}

impl<E> Error<E> {
    /// Which broad class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedPixelClock(_) | Error::InvalidPad(_) | Error::UnknownDevice => {
                ErrorKind::InvalidArgument
            }
            Error::Bus(_) | Error::ShortWrite { .. } => ErrorKind::Io,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Bus(error)
    }
}

impl<B> Transport for B
where
    B: embedded_hal::blocking::i2c::Write,
{
    type Error = B::Error;

    fn send(&mut self, address: u8, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.write(address, bytes)?;
        Ok(bytes.len())
    }
}

impl<B> HdmiPhy<B>
where
    B: Transport,
{
    /// Create a new HDMI PHY driver for a known SoC variant.
    ///
    /// Nothing is sent to the PHY until you set some timings.
    pub fn new(bus: B, bus_address: u8, variant: Variant) -> HdmiPhy<B> {
        HdmiPhy {
            bus,
            bus_address,
            variant,
        }
    }

    /// Create a new HDMI PHY driver from an I²C device name.
    ///
    /// The name picks the register table; see [`DEVICE_IDS`].
    pub fn attach(bus: B, bus_address: u8, id: &str) -> Result<HdmiPhy<B>, Error<B::Error>> {
        let variant = Variant::from_id(id).ok_or(Error::UnknownDevice)?;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "{} attached at 0x{:02x} as {}",
            DRIVER_NAME,
            bus_address,
            variant
        );
        Ok(HdmiPhy::new(bus, bus_address, variant))
    }

    /// Release the PHY and give the bus back.
    pub fn detach(self) -> B {
        #[cfg(feature = "defmt")]
        defmt::info!("{} at 0x{:02x} detached", DRIVER_NAME, self.bus_address);
        self.bus
    }

    /// Which SoC variant we were set up for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The register image table in use.
    pub fn config_table(&self) -> &'static [PhyConfig] {
        self.variant.table()
    }

    /// Send a whole message, treating anything less than full acceptance as
    /// failure.
    fn send_all(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        let written = self.bus.send(self.bus_address, bytes)?;
        if written != bytes.len() {
            return Err(Error::ShortWrite {
                expected: bytes.len(),
                written,
            });
        }
        Ok(())
    }
}

impl<B> Subdevice for HdmiPhy<B>
where
    B: Transport,
{
    type Error = Error<B::Error>;

    /// Does nothing; the PHY has no power control of its own.
    fn set_power(&mut self, _on: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Load the register image for the requested pixel clock.
    ///
    /// The PHY should be in configuration mode (see [`Subdevice::set_stream`])
    /// when you call this.
    fn set_dv_timings(&mut self, timings: &DvTimings) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("HDMIPHY set timings: {} Hz", timings.pixelclock);
        let data = match config::resolve(self.config_table(), timings) {
            Some(data) => data,
            None => {
                #[cfg(feature = "defmt")]
                defmt::error!("HDMIPHY pixel clock {} Hz not supported", timings.pixelclock);
                return Err(Error::UnsupportedPixelClock(timings.pixelclock));
            }
        };
        let result = self.send_all(data);
        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::error!("Failed to configure HDMIPHY via I²C");
        }
        result
    }

    /// Switch between operation mode (`true`) and configuration mode
    /// (`false`).
    fn set_stream(&mut self, enable: bool) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("HDMIPHY stream {}", enable);
        let mode = if enable {
            MODE_OPERATION
        } else {
            MODE_CONFIGURATION
        };
        let buffer = [REG_MODE, mode];
        let result = self.send_all(&buffer);
        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::error!("HDMIPHY stream ({}) failed", enable);
        }
        result
    }

    /// The PHY only limits the pixel clock. Everything else is left at zero.
    fn dv_timings_cap(&self, pad: u32) -> Result<DvTimingsCap, Self::Error> {
        if pad != 0 {
            return Err(Error::InvalidPad(pad));
        }
        Ok(DvTimingsCap {
            kind: TimingsType::Bt656_1120,
            bt: BtTimingsCap {
                min_pixelclock: MIN_PIXELCLOCK,
                max_pixelclock: MAX_PIXELCLOCK,
                ..Default::default()
            },
        })
    }
}

//
// Tests
//


//
// End of file
//
