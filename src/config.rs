//! Register images for the HDMI PHY.
//!
//! The PHY has no configurable fields that we know of. Instead, each
//! supported pixel clock has a vendor-supplied 32 byte image which is written
//! to the PHY in one I²C transfer. The images differ between SoC families, so
//! there is one table per [`Variant`].

use crate::{DvTimings, DV_FL_REDUCED_FPS};

//
// Public Types
//

/// One supported pixel clock and the register image which selects it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// Pixel clock, in Hz
    pub pixel_clock: u32,
    /// Register contents, starting at register 0x00
    pub data: [u8; CONFIG_LEN],
}

/// The SoC families whose HDMI PHY we know how to program.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Samsung S5PV210
    S5pv210,
    /// Samsung Exynos 4210
    Exynos4210,
    /// Samsung Exynos 4212
    Exynos4212,
    /// Samsung Exynos 4412
    Exynos4412,
}

//
// Public Data
//

/// Length of every register image, in bytes.
pub const CONFIG_LEN: usize = 32;

/// I²C device names this driver binds to, and the variant each one selects.
///
/// The bare `hdmiphy` name predates the per-SoC names and is kept for boards
/// which still use it.
pub const DEVICE_IDS: [(&str, Variant); 5] = [
    ("hdmiphy", Variant::Exynos4210),
    ("hdmiphy-s5pv210", Variant::S5pv210),
    ("hdmiphy-exynos4210", Variant::Exynos4210),
    ("hdmiphy-exynos4212", Variant::Exynos4212),
    ("hdmiphy-exynos4412", Variant::Exynos4412),
];

/// Register images for the S5PV210.
pub const S5PV210: &[PhyConfig] = &[
    PhyConfig {
        pixel_clock: 27_000_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x1C, 0x30, 0x40, //
            0x6B, 0x10, 0x02, 0x52, 0xDF, 0xF2, 0x54, 0x87, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xE3, 0x26, 0x00, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 27_027_000,
        data: [
            0x01, 0x05, 0x00, 0xD4, 0x10, 0x9C, 0x09, 0x64, //
            0x6B, 0x10, 0x02, 0x52, 0xDF, 0xF2, 0x54, 0x87, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xE2, 0x26, 0x00, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_176_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xEF, 0x5B, //
            0x6D, 0x10, 0x01, 0x52, 0xEF, 0xF3, 0x54, 0xB9, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xA5, 0x26, 0x01, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_250_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xF8, 0x40, //
            0x6A, 0x10, 0x01, 0x52, 0xFF, 0xF1, 0x54, 0xBA, //
            0x84, 0x00, 0x10, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xA4, 0x26, 0x01, 0x00, 0x00, 0x00,
        ],
    },
];

/// Register images for the Exynos 4210.
pub const EXYNOS4210: &[PhyConfig] = &[
    PhyConfig {
        pixel_clock: 27_000_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x1C, 0x30, 0x40, //
            0x6B, 0x10, 0x02, 0x51, 0xDF, 0xF2, 0x54, 0x87, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xE3, 0x26, 0x00, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 27_027_000,
        data: [
            0x01, 0x05, 0x00, 0xD4, 0x10, 0x9C, 0x09, 0x64, //
            0x6B, 0x10, 0x02, 0x51, 0xDF, 0xF2, 0x54, 0x87, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xE2, 0x26, 0x00, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_176_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xEF, 0x5B, //
            0x6D, 0x10, 0x01, 0x51, 0xEF, 0xF3, 0x54, 0xB9, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xA5, 0x26, 0x01, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_250_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xF8, 0x40, //
            0x6A, 0x10, 0x01, 0x51, 0xFF, 0xF1, 0x54, 0xBA, //
            0x84, 0x00, 0x10, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x22, 0x40, 0xA4, 0x26, 0x01, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 148_352_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xEF, 0x5B, //
            0x6D, 0x18, 0x00, 0x51, 0xEF, 0xF3, 0x54, 0xB9, //
            0x84, 0x00, 0x30, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x11, 0x40, 0xA5, 0x26, 0x02, 0x00, 0x00, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 148_500_000,
        data: [
            0x01, 0x05, 0x00, 0xD8, 0x10, 0x9C, 0xF8, 0x40, //
            0x6A, 0x18, 0x00, 0x51, 0xFF, 0xF1, 0x54, 0xBA, //
            0x84, 0x00, 0x10, 0x38, 0x00, 0x08, 0x10, 0xE0, //
            0x11, 0x40, 0xA4, 0x26, 0x02, 0x00, 0x00, 0x00,
        ],
    },
];

/// Register images for the Exynos 4212.
pub const EXYNOS4212: &[PhyConfig] = &[
    PhyConfig {
        pixel_clock: 27_000_000,
        data: [
            0x01, 0x11, 0x2D, 0x75, 0x00, 0x01, 0x00, 0x08, //
            0x82, 0x00, 0x0E, 0xD9, 0x45, 0xA0, 0x34, 0xC0, //
            0x0B, 0x80, 0x12, 0x87, 0x08, 0x24, 0x24, 0x71, //
            0x54, 0xE3, 0x24, 0x00, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 27_027_000,
        data: [
            0x01, 0x91, 0x2D, 0x72, 0x00, 0x64, 0x12, 0x08, //
            0x43, 0x20, 0x0E, 0xD9, 0x45, 0xA0, 0x34, 0xC0, //
            0x0B, 0x80, 0x12, 0x87, 0x08, 0x24, 0x24, 0x71, //
            0x54, 0xE2, 0x24, 0x00, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_176_000,
        data: [
            0x01, 0x91, 0x3E, 0x35, 0x00, 0x5B, 0xDE, 0x08, //
            0x82, 0x20, 0x73, 0xD9, 0x45, 0xA0, 0x34, 0xC0, //
            0x0B, 0x80, 0x12, 0x87, 0x08, 0x24, 0x24, 0x52, //
            0x54, 0xA5, 0x24, 0x01, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_250_000,
        data: [
            0x01, 0x91, 0x3E, 0x35, 0x00, 0x40, 0xF0, 0x08, //
            0x82, 0x20, 0x73, 0xD9, 0x45, 0xA0, 0x34, 0xC0, //
            0x0B, 0x80, 0x12, 0x87, 0x08, 0x24, 0x24, 0x52, //
            0x54, 0xA4, 0x24, 0x01, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 148_500_000,
        data: [
            0x01, 0x91, 0x3E, 0x15, 0x00, 0x40, 0xF0, 0x08, //
            0x82, 0x20, 0x73, 0xD9, 0x45, 0xA0, 0x34, 0xC0, //
            0x0B, 0x80, 0x12, 0x87, 0x08, 0x24, 0x24, 0xA4, //
            0x54, 0x4A, 0x25, 0x03, 0x00, 0x00, 0x01, 0x00,
        ],
    },
];

/// Register images for the Exynos 4412.
pub const EXYNOS4412: &[PhyConfig] = &[
    PhyConfig {
        pixel_clock: 27_000_000,
        data: [
            0x01, 0x11, 0x2D, 0x75, 0x40, 0x01, 0x00, 0x08, //
            0x82, 0x00, 0x0E, 0xD9, 0x45, 0xA0, 0xAC, 0x80, //
            0x08, 0x80, 0x11, 0x84, 0x02, 0x22, 0x44, 0x86, //
            0x54, 0xE4, 0x24, 0x00, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 27_027_000,
        data: [
            0x01, 0x91, 0x2D, 0x72, 0x40, 0x64, 0x12, 0x08, //
            0x43, 0x20, 0x0E, 0xD9, 0x45, 0xA0, 0xAC, 0x80, //
            0x08, 0x80, 0x11, 0x84, 0x02, 0x22, 0x44, 0x86, //
            0x54, 0xE3, 0x24, 0x00, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_176_000,
        data: [
            0x01, 0x91, 0x1F, 0x10, 0x40, 0x5B, 0xEF, 0x08, //
            0x81, 0x20, 0xB9, 0xD8, 0x45, 0xA0, 0xAC, 0x80, //
            0x08, 0x80, 0x11, 0x84, 0x02, 0x22, 0x44, 0x86, //
            0x54, 0xA6, 0x24, 0x01, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 74_250_000,
        data: [
            0x01, 0x91, 0x1F, 0x10, 0x40, 0x40, 0xF8, 0x08, //
            0x81, 0x20, 0xBA, 0xD8, 0x45, 0xA0, 0xAC, 0x80, //
            0x08, 0x80, 0x11, 0x84, 0x02, 0x22, 0x44, 0x86, //
            0x54, 0xA5, 0x24, 0x01, 0x00, 0x00, 0x01, 0x00,
        ],
    },
    PhyConfig {
        pixel_clock: 148_500_000,
        data: [
            0x01, 0x91, 0x1F, 0x00, 0x40, 0x40, 0xF8, 0x08, //
            0x81, 0x20, 0xBA, 0xD8, 0x45, 0xA0, 0xAC, 0x80, //
            0x08, 0x80, 0x11, 0x84, 0x02, 0x22, 0x44, 0x86, //
            0x54, 0x4B, 0x25, 0x03, 0x00, 0x00, 0x01, 0x00,
        ],
    },
];

//
// Private Data
//

/// 74.25 MHz, the 720p / 1080i pixel clock
const PIXCLK_74_25: u64 = 74_250_000;

/// 74.25 MHz * 1000 / 1001, rounded the way the images were generated
const PIXCLK_74_176: u64 = 74_176_000;

//
// impls on Public Types
//

impl Variant {
    /// Find the variant for an I²C device name, as listed in [`DEVICE_IDS`].
    pub fn from_id(id: &str) -> Option<Variant> {
        DEVICE_IDS
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, variant)| *variant)
    }

    /// Get the register image table for this variant.
    pub fn table(self) -> &'static [PhyConfig] {
        match self {
            Variant::S5pv210 => S5PV210,
            Variant::Exynos4210 => EXYNOS4210,
            Variant::Exynos4212 => EXYNOS4212,
            Variant::Exynos4412 => EXYNOS4412,
        }
    }
}

//
// Public Functions
//

/// Find the register image for exactly `pixel_clock` Hz.
///
/// Entries are searched in table order. A pixel clock of zero never matches.
pub fn find(table: &'static [PhyConfig], pixel_clock: u64) -> Option<&'static [u8; CONFIG_LEN]> {
    table
        .iter()
        .take_while(|conf| conf.pixel_clock != 0)
        .find(|conf| u64::from(conf.pixel_clock) == pixel_clock)
        .map(|conf| &conf.data)
}

/// Find the register image for some requested timings.
///
/// In reduced frame-rate mode a 74.25 MHz request is served by the 74.176 MHz
/// image. No other clocks are adjusted.
pub fn resolve(
    table: &'static [PhyConfig],
    timings: &DvTimings,
) -> Option<&'static [u8; CONFIG_LEN]> {
    let mut pixel_clock = timings.pixelclock;
    if (timings.flags & DV_FL_REDUCED_FPS) != 0 && pixel_clock == PIXCLK_74_25 {
        pixel_clock = PIXCLK_74_176;
    }
    find(table, pixel_clock)
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [&[PhyConfig]; 4] = [S5PV210, EXYNOS4210, EXYNOS4212, EXYNOS4412];

    #[test]
    fn every_listed_clock_finds_its_own_image() {
        for table in ALL_TABLES {
            for conf in table {
                let found = find(table, u64::from(conf.pixel_clock));
                assert_eq!(found, Some(&conf.data));
            }
        }
    }

    #[test]
    fn images_match_datasheet_bytes() {
        let conf = find(EXYNOS4212, 148_500_000).unwrap();
        assert_eq!(conf[3], 0x15);
        assert_eq!(conf[23], 0xA4);
        let conf = find(S5PV210, 27_027_000).unwrap();
        assert_eq!(&conf[..8], &[0x01, 0x05, 0x00, 0xD4, 0x10, 0x9C, 0x09, 0x64]);
    }

    #[test]
    fn unknown_clock_is_not_found() {
        for table in ALL_TABLES {
            assert_eq!(find(table, 60_000_000), None);
            assert_eq!(find(table, 0), None);
        }
        // Only the Exynos 4210 has a 148.352 MHz image
        assert_eq!(find(S5PV210, 148_352_000), None);
        assert_eq!(find(EXYNOS4412, 148_352_000), None);
        assert!(find(EXYNOS4210, 148_352_000).is_some());
    }

    #[test]
    fn no_duplicate_clocks() {
        for table in ALL_TABLES {
            for (idx, conf) in table.iter().enumerate() {
                assert!(table[idx + 1..]
                    .iter()
                    .all(|other| other.pixel_clock != conf.pixel_clock));
            }
        }
    }

    #[test]
    fn reduced_fps_uses_74_176_image() {
        for table in [S5PV210, EXYNOS4210] {
            let reduced = DvTimings {
                pixelclock: 74_250_000,
                flags: DV_FL_REDUCED_FPS,
            };
            let plain = DvTimings {
                pixelclock: 74_176_000,
                flags: 0,
            };
            let got = resolve(table, &reduced).unwrap();
            assert_eq!(Some(got), resolve(table, &plain));
            assert_ne!(Some(got), find(table, 74_250_000));
        }
    }

    #[test]
    fn reduced_fps_leaves_other_clocks_alone() {
        let timings = DvTimings {
            pixelclock: 148_500_000,
            flags: DV_FL_REDUCED_FPS,
        };
        assert_eq!(resolve(EXYNOS4210, &timings), find(EXYNOS4210, 148_500_000));
        let timings = DvTimings {
            pixelclock: 74_250_000,
            flags: 0,
        };
        assert_eq!(resolve(EXYNOS4212, &timings), find(EXYNOS4212, 74_250_000));
    }

    #[test]
    fn device_ids_select_variant() {
        assert_eq!(Variant::from_id("hdmiphy"), Some(Variant::Exynos4210));
        assert_eq!(Variant::from_id("hdmiphy-s5pv210"), Some(Variant::S5pv210));
        assert_eq!(
            Variant::from_id("hdmiphy-exynos4412"),
            Some(Variant::Exynos4412)
        );
        assert_eq!(Variant::from_id("hdmiphy-exynos5250"), None);
        assert_eq!(Variant::from_id(""), None);
        assert_eq!(Variant::Exynos4212.table(), EXYNOS4212);
    }
}

//
// End of file
//
