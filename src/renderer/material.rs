//! Material color tables

use super::surface::Rgba;
use crate::settings::Material;

/// Face gradient tones plus the rim tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub top: Rgba,
    pub mid: Rgba,
    pub bottom: Rgba,
    pub edge: Rgba,
}

pub fn palette(material: Material) -> Palette {
    match material {
        Material::Gold => Palette {
            top: Rgba::rgb(0xff, 0xe8, 0xb0),
            mid: Rgba::rgb(0xd7, 0xa3, 0x1a),
            bottom: Rgba::rgb(0x7a, 0x4e, 0x00),
            edge: Rgba::rgb(0xd7, 0xa3, 0x1a),
        },
        Material::Silver => Palette {
            top: Rgba::rgb(0xf6, 0xf8, 0xff),
            mid: Rgba::rgb(0xcf, 0xd7, 0xe6),
            bottom: Rgba::rgb(0x88, 0x93, 0xa6),
            edge: Rgba::rgb(0xcf, 0xd7, 0xe6),
        },
        Material::Copper => Palette {
            top: Rgba::rgb(0xff, 0xd3, 0xb0),
            mid: Rgba::rgb(0xc9, 0x7a, 0x3a),
            bottom: Rgba::rgb(0x6a, 0x2c, 0x10),
            edge: Rgba::rgb(0xc9, 0x7a, 0x3a),
        },
        Material::Platinum => Palette {
            top: Rgba::rgb(0xff, 0xff, 0xff),
            mid: Rgba::rgb(0xdf, 0xe8, 0xf6),
            bottom: Rgba::rgb(0x8f, 0xa1, 0xbf),
            edge: Rgba::rgb(0xdf, 0xe8, 0xf6),
        },
    }
}
