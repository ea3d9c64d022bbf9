//! Supported page formats.
//!
//! Sizes are portrait (width ≤ height) in PDF points (1 pt = 1/72 inch) and
//! follow the names and dimensions used by TCPDF.

/// A named page format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub name: &'static str,
    pub width_pt: f32,
    pub height_pt: f32,
}

const fn format(name: &'static str, width_pt: f32, height_pt: f32) -> PageFormat {
    PageFormat {
        name,
        width_pt,
        height_pt,
    }
}

/// Every accepted page format name, upper-case.
pub static PAGE_FORMATS: &[PageFormat] = &[
    // ISO 216 A series
    format("A0", 2383.937, 3370.394),
    format("A1", 1683.780, 2383.937),
    format("A2", 1190.551, 1683.780),
    format("A3", 841.890, 1190.551),
    format("A4", 595.276, 841.890),
    format("A5", 419.528, 595.276),
    format("A6", 297.638, 419.528),
    format("A7", 209.764, 297.638),
    format("A8", 147.402, 209.764),
    format("A9", 104.882, 147.402),
    format("A10", 73.701, 104.882),
    // ISO 216 B series
    format("B0", 2834.646, 4008.189),
    format("B1", 2004.094, 2834.646),
    format("B2", 1417.323, 2004.094),
    format("B3", 1000.630, 1417.323),
    format("B4", 708.661, 1000.630),
    format("B5", 498.898, 708.661),
    format("B6", 354.331, 498.898),
    format("B7", 249.449, 354.331),
    format("B8", 175.748, 249.449),
    format("B9", 124.724, 175.748),
    format("B10", 87.874, 124.724),
    // ISO 269 C series (envelopes)
    format("C0", 2599.370, 3676.535),
    format("C1", 1836.850, 2599.370),
    format("C2", 1298.268, 1836.850),
    format("C3", 918.425, 1298.268),
    format("C4", 649.134, 918.425),
    format("C5", 459.213, 649.134),
    format("C6", 323.150, 459.213),
    format("C7", 229.606, 323.150),
    format("C8", 161.575, 229.606),
    format("C9", 113.386, 161.575),
    format("C10", 79.370, 113.386),
    // North American
    format("LETTER", 612.000, 792.000),
    format("LEGAL", 612.000, 1008.000),
    format("EXECUTIVE", 521.858, 756.000),
    format("FOLIO", 612.000, 936.000),
    format("TABLOID", 792.000, 1224.000),
    format("LEDGER", 792.000, 1224.000),
];

/// Look up a format by its upper-case name.
pub fn lookup(name: &str) -> Option<&'static PageFormat> {
    PAGE_FORMATS.iter().find(|f| f.name == name)
}
