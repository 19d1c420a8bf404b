//! The BrickColor palette
//!
//! Parts don't store their color directly. Instead, a `BrickColor` property holds an index into a
//! fixed palette of named colors. This module carries that palette and resolves indices into
//! normalized colors.
//!
//! Lookups never fail hard: an index missing from the table resolves to [`FALLBACK_COLOR`], and
//! the caller is told about it so a diagnostic can be emitted.
//!
//! ## Aliases
//! Some colors appear under more than one index (Neon Orange is both `133` and `1005`). These are
//! kept as independent aliases. Repeated *indices* are a different story, see
//! [`PaletteTable::from_entries`].

use ahash::AHashMap;
use itertools::Itertools;
use log::*;
use once_cell::sync::Lazy;
use rbxmap_utils::color::{RGB32F, RGB8};

/// Palette index used by parts that don't specify a `BrickColor` ("Black").
pub const DEFAULT_PALETTE_INDEX: i32 = 26;

/// Color returned for indices missing from the palette (mid gray).
pub const FALLBACK_COLOR: RGB32F = RGB32F::new(0.5, 0.5, 0.5);

/// A single named palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub index: i32,
    pub name: &'static str,
    pub color: RGB8,
}

impl PaletteEntry {
    pub const fn new(index: i32, name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            index,
            name,
            color: RGB8::new(r, g, b),
        }
    }

    /// The entry's color, with every channel normalized to `0.0..=1.0`.
    #[inline]
    pub fn normalized(&self) -> RGB32F {
        self.color.into()
    }
}

/// Immutable index to color mapping.
#[derive(Debug, Clone, Default)]
pub struct PaletteTable {
    entries: AHashMap<i32, PaletteEntry>,
}

impl PaletteTable {
    /// Builds a table out of a list of entries.
    ///
    /// A repeated index is treated as a data entry mistake: it's reported with a warning, and the
    /// first definition is the one that's kept.
    pub fn from_entries(list: &[PaletteEntry]) -> Self {
        let mut entries: AHashMap<i32, PaletteEntry> = AHashMap::with_capacity(list.len());
        for &entry in list {
            if let Some(existing) = entries.get(&entry.index) {
                warn!(
                    "Palette index {} is defined twice (`{}` and `{}`), keeping `{}`",
                    entry.index, existing.name, entry.name, existing.name
                );
                continue;
            }
            entries.insert(entry.index, entry);
        }
        Self { entries }
    }

    pub fn get(&self, index: i32) -> Option<&PaletteEntry> {
        self.entries.get(&index)
    }

    /// Resolves an index into a normalized color. The returned flag is `false` if the index
    /// isn't in the table, in which case [`FALLBACK_COLOR`] is returned.
    pub fn lookup(&self, index: i32) -> (RGB32F, bool) {
        match self.get(index) {
            Some(entry) => (entry.normalized(), true),
            None => (FALLBACK_COLOR, false),
        }
    }

    /// Iterates over all entries, ordered by index.
    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.values().sorted_by_key(|entry| entry.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static PALETTE: Lazy<PaletteTable> = Lazy::new(|| PaletteTable::from_entries(BRICK_COLORS));

/// Returns the built-in palette.
pub fn palette() -> &'static PaletteTable {
    &PALETTE
}

/// Resolves an index using the built-in palette. See [`PaletteTable::lookup`].
#[inline]
pub fn lookup(index: i32) -> (RGB32F, bool) {
    PALETTE.lookup(index)
}

/// Returns the built-in palette entry with the given index.
#[inline]
pub fn entry(index: i32) -> Option<&'static PaletteEntry> {
    PALETTE.get(index)
}

/// All built-in palette entries, ordered by index.
pub fn entries() -> impl Iterator<Item = &'static PaletteEntry> {
    PALETTE.iter()
}

#[rustfmt::skip]
const BRICK_COLORS: &[PaletteEntry] = &[
    PaletteEntry::new(1, "White", 242, 243, 243),
    PaletteEntry::new(2, "Grey", 161, 165, 162),
    PaletteEntry::new(3, "Light Yellow", 249, 233, 153),
    PaletteEntry::new(5, "Brick Yellow", 215, 197, 154),
    PaletteEntry::new(6, "Light Green (Mint)", 194, 218, 184),
    PaletteEntry::new(9, "Light Reddish Violet", 232, 186, 200),
    PaletteEntry::new(11, "Pastel Blue", 128, 187, 219),
    PaletteEntry::new(12, "Light Orange Brown", 203, 132, 66),
    PaletteEntry::new(18, "Nougat", 204, 142, 105),
    PaletteEntry::new(21, "Bright Red", 196, 40, 28),
    PaletteEntry::new(22, "Med. Reddish Violet", 196, 112, 160),
    PaletteEntry::new(23, "Bright Blue", 13, 105, 172),
    PaletteEntry::new(24, "Bright Yellow", 245, 208, 48),
    PaletteEntry::new(25, "Earth Orange", 98, 71, 50),
    PaletteEntry::new(26, "Black", 27, 42, 53),
    PaletteEntry::new(27, "Dark Grey", 109, 110, 108),
    PaletteEntry::new(28, "Dark Green", 40, 127, 71),
    PaletteEntry::new(29, "Medium Green", 161, 196, 140),
    PaletteEntry::new(36, "Lig. Yellowish Orange", 243, 207, 155),
    PaletteEntry::new(37, "Bright Green", 75, 151, 75),
    PaletteEntry::new(38, "Dark Orange", 160, 95, 53),
    PaletteEntry::new(39, "Light Bluish Violet", 193, 202, 222),
    PaletteEntry::new(40, "Transparent", 236, 236, 236),
    PaletteEntry::new(41, "Tr. Red", 205, 84, 75),
    PaletteEntry::new(42, "Tr. Lg Blue", 193, 223, 240),
    PaletteEntry::new(43, "Tr. Blue", 123, 182, 232),
    PaletteEntry::new(44, "Tr. Yellow", 247, 241, 141),
    PaletteEntry::new(45, "Light Blue", 180, 210, 228),
    PaletteEntry::new(47, "Tr. Flu. Reddish Orange", 217, 133, 108),
    PaletteEntry::new(48, "Tr. Green", 132, 182, 141),
    PaletteEntry::new(49, "Tr. Flu. Green", 248, 241, 132),
    PaletteEntry::new(50, "Phosph. White", 236, 232, 222),
    PaletteEntry::new(100, "Light Red", 238, 196, 182),
    PaletteEntry::new(101, "Medium Red", 218, 134, 122),
    PaletteEntry::new(102, "Medium Blue", 110, 153, 202),
    PaletteEntry::new(103, "Light Grey", 199, 193, 183),
    PaletteEntry::new(104, "Bright Violet", 107, 50, 124),
    PaletteEntry::new(105, "Br. Yellowish Orange", 226, 155, 64),
    PaletteEntry::new(106, "Bright Orange", 218, 133, 65),
    PaletteEntry::new(107, "Bright Bluish Green", 0, 143, 156),
    PaletteEntry::new(108, "Earth Yellow", 104, 92, 67),
    PaletteEntry::new(110, "Bright Bluish Violet", 67, 84, 147),
    PaletteEntry::new(111, "Tr. Brown", 191, 183, 177),
    PaletteEntry::new(112, "Medium Bluish Violet", 104, 116, 172),
    PaletteEntry::new(113, "Tr. Medi. Reddish Violet", 228, 173, 200),
    PaletteEntry::new(115, "Med. Yellowish Green", 199, 210, 60),
    PaletteEntry::new(116, "Med. Bluish Green", 85, 165, 175),
    PaletteEntry::new(118, "Light Bluish Green", 183, 215, 213),
    PaletteEntry::new(119, "Br. Yellowish Green", 164, 189, 71),
    PaletteEntry::new(120, "Lig. Yellowish Green", 163, 162, 165),
    PaletteEntry::new(121, "Med. Yellowish Orange", 231, 172, 88),
    PaletteEntry::new(123, "Br. Reddish Orange", 211, 111, 76),
    PaletteEntry::new(124, "Bright Reddish Violet", 146, 57, 120),
    PaletteEntry::new(125, "Light Orange", 234, 184, 146),
    PaletteEntry::new(126, "Tr. Bright Bluish Violet", 165, 165, 203),
    PaletteEntry::new(127, "Gold", 239, 184, 56),
    PaletteEntry::new(128, "Dark Nougat", 174, 122, 89),
    PaletteEntry::new(131, "Silver", 156, 163, 168),
    PaletteEntry::new(133, "Neon Orange", 213, 115, 61),
    PaletteEntry::new(134, "Neon Green", 216, 221, 86),
    PaletteEntry::new(135, "Sand Blue", 116, 134, 157),
    PaletteEntry::new(136, "Sand Violet", 135, 124, 144),
    PaletteEntry::new(137, "Medium Orange", 224, 152, 100),
    PaletteEntry::new(138, "Sand Yellow", 149, 138, 115),
    PaletteEntry::new(140, "Earth Blue", 32, 58, 86),
    PaletteEntry::new(141, "Earth Green", 39, 70, 45),
    PaletteEntry::new(143, "Tr. Flu. Blue", 207, 226, 247),
    PaletteEntry::new(145, "Sand Blue Metallic", 121, 136, 161),
    PaletteEntry::new(146, "Sand Violet Metallic", 149, 142, 163),
    PaletteEntry::new(147, "Sand Yellow Metallic", 147, 135, 103),
    PaletteEntry::new(148, "Dark Grey Metallic", 87, 88, 87),
    PaletteEntry::new(149, "Black Metallic", 22, 29, 50),
    PaletteEntry::new(150, "Light Grey Metallic", 171, 173, 172),
    PaletteEntry::new(151, "Sand Green", 120, 144, 130),
    PaletteEntry::new(153, "Sand Red", 149, 121, 119),
    PaletteEntry::new(154, "Dark Red", 123, 46, 47),
    PaletteEntry::new(157, "Tr. Flu. Yellow", 255, 246, 123),
    PaletteEntry::new(158, "Tr. Flu. Red", 225, 164, 194),
    PaletteEntry::new(168, "Gun Metallic", 117, 108, 98),
    PaletteEntry::new(176, "Red Flip/Flop", 151, 105, 91),
    PaletteEntry::new(178, "Yellow Flip/Flop", 180, 132, 85),
    PaletteEntry::new(179, "Silver Flip/Flop", 137, 135, 136),
    PaletteEntry::new(180, "Curry", 215, 169, 75),
    PaletteEntry::new(190, "Fire Yellow", 249, 214, 46),
    PaletteEntry::new(191, "Flame Yellowish Orange", 232, 171, 45),
    PaletteEntry::new(192, "Reddish Brown", 105, 64, 40),
    PaletteEntry::new(193, "Flame Reddish Orange", 207, 96, 36),
    PaletteEntry::new(194, "Medium Stone Grey", 163, 162, 165),
    PaletteEntry::new(195, "Royal Blue", 70, 103, 164),
    PaletteEntry::new(196, "Dark Royal Blue", 35, 71, 139),
    PaletteEntry::new(198, "Bright Reddish Lilac", 142, 66, 133),
    PaletteEntry::new(199, "Dark Stone Grey", 99, 95, 98),
    PaletteEntry::new(200, "Lemon Metallic", 130, 138, 93),
    PaletteEntry::new(208, "Light Stone Grey", 229, 228, 223),
    PaletteEntry::new(209, "Dark Curry", 176, 142, 68),
    PaletteEntry::new(210, "Faded Green", 112, 149, 120),
    PaletteEntry::new(211, "Turquoise", 121, 181, 181),
    PaletteEntry::new(212, "Light Royal Blue", 159, 195, 233),
    PaletteEntry::new(213, "Medium Royal Blue", 108, 129, 183),
    PaletteEntry::new(216, "Rust", 143, 76, 42),
    PaletteEntry::new(217, "Brown", 124, 92, 70),
    PaletteEntry::new(218, "Reddish Lilac", 150, 112, 159),
    PaletteEntry::new(219, "Lilac", 167, 94, 155),
    PaletteEntry::new(220, "Light Lilac", 167, 169, 206),
    PaletteEntry::new(221, "Bright Purple", 205, 98, 152),
    PaletteEntry::new(222, "Light Purple", 228, 173, 200),
    PaletteEntry::new(223, "Light Pink", 220, 144, 149),
    PaletteEntry::new(224, "Light Brick Yellow", 240, 213, 160),
    PaletteEntry::new(225, "Warm Yellowish Orange", 235, 184, 127),
    PaletteEntry::new(226, "Cool Yellow", 253, 234, 141),
    PaletteEntry::new(232, "Dove Blue", 125, 187, 221),
    PaletteEntry::new(268, "Medium Lilac", 52, 43, 117),
    PaletteEntry::new(1001, "Institutional White", 248, 248, 248),
    PaletteEntry::new(1002, "Mid Grey", 205, 205, 205),
    PaletteEntry::new(1003, "Really Black", 17, 17, 17),
    PaletteEntry::new(1004, "Really Red", 255, 0, 0),
    PaletteEntry::new(1005, "Neon Orange", 213, 115, 61),
    PaletteEntry::new(1006, "Alder", 180, 128, 255),
    PaletteEntry::new(1007, "Dusty Rose", 163, 75, 75),
    PaletteEntry::new(1008, "Olive", 193, 190, 66),
    PaletteEntry::new(1009, "New Yeller", 255, 255, 0),
    PaletteEntry::new(1010, "Really Blue", 0, 0, 255),
    PaletteEntry::new(1011, "Navy Blue", 0, 32, 96),
    PaletteEntry::new(1012, "Deep Blue", 33, 84, 185),
    PaletteEntry::new(1013, "Cyan", 4, 175, 236),
    PaletteEntry::new(1014, "CGA Brown", 170, 85, 0),
    PaletteEntry::new(1015, "Magenta", 170, 0, 170),
    PaletteEntry::new(1016, "Pink", 255, 102, 204),
    PaletteEntry::new(1017, "Deep Orange", 255, 175, 0),
    PaletteEntry::new(1018, "Teal", 18, 238, 212),
    PaletteEntry::new(1019, "Toothpaste", 0, 255, 255),
    PaletteEntry::new(1020, "Lime Green", 0, 255, 0),
    PaletteEntry::new(1021, "Camo", 58, 125, 21),
    PaletteEntry::new(1022, "Grime", 127, 142, 100),
    PaletteEntry::new(1023, "Lavender", 140, 91, 159),
    PaletteEntry::new(1024, "Pastel Light Blue", 175, 221, 255),
    PaletteEntry::new(1025, "Pastel Orange", 255, 201, 201),
    PaletteEntry::new(1026, "Pastel Violet", 177, 167, 255),
    PaletteEntry::new(1027, "Pastel Blue-Green", 159, 243, 233),
    PaletteEntry::new(1028, "Pastel Green", 204, 255, 204),
    PaletteEntry::new(1029, "Pastel Yellow", 255, 255, 204),
    PaletteEntry::new(1030, "Pastel Brown", 255, 204, 153),
    PaletteEntry::new(1031, "Royal Purple", 98, 37, 209),
    PaletteEntry::new(1032, "Hot Pink", 255, 0, 191),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> RGB32F {
        RGB32F::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    #[test]
    fn known_indices_resolve() {
        let cases = [
            (1, rgb(242, 243, 243)),
            (21, rgb(196, 40, 28)),
            (26, rgb(27, 42, 53)),
            (194, rgb(163, 162, 165)),
            (1004, rgb(255, 0, 0)),
            (1032, rgb(255, 0, 191)),
            (268, rgb(52, 43, 117)),
        ];

        for (index, expected) in cases {
            let (color, found) = lookup(index);
            assert!(found, "index {index} should be known");
            assert!(color.abs_diff_eq(&expected, 1e-6), "index {index}: {color:?}");
        }
    }

    #[test]
    fn every_entry_resolves_to_itself() {
        for entry in entries() {
            let (color, found) = lookup(entry.index);
            assert!(found);
            assert!(color.abs_diff_eq(&entry.normalized(), 1e-6));
            assert!((0.0..=1.0).contains(&color.r));
            assert!((0.0..=1.0).contains(&color.g));
            assert!((0.0..=1.0).contains(&color.b));
        }
    }

    #[test]
    fn unknown_indices_fall_back_to_gray() {
        for index in [0, 4, 27_000, -1, i32::MAX] {
            let (color, found) = lookup(index);
            assert!(!found);
            assert_eq!(color, FALLBACK_COLOR);
        }
    }

    #[test]
    fn built_in_table_has_no_repeated_indices() {
        assert_eq!(palette().len(), BRICK_COLORS.len());
        assert_eq!(entry(DEFAULT_PALETTE_INDEX).map(|e| e.name), Some("Black"));
    }

    #[test]
    fn aliases_are_kept_apart() {
        let a = entry(133).unwrap();
        let b = entry(1005).unwrap();
        assert_eq!(a.color, b.color);
        assert_ne!(a.index, b.index);
    }

    #[test]
    fn repeated_index_keeps_first_definition() {
        let table = PaletteTable::from_entries(&[
            PaletteEntry::new(7, "First", 1, 2, 3),
            PaletteEntry::new(7, "Second", 4, 5, 6),
            PaletteEntry::new(8, "Other", 7, 8, 9),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(7).map(|e| e.name), Some("First"));
    }

    #[test]
    fn iteration_is_ordered() {
        let indices = entries().map(|e| e.index).collect::<Vec<_>>();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(indices.first(), Some(&1));
        assert_eq!(indices.last(), Some(&1032));
    }
}
