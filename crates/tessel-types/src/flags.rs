//! Position flags selecting which parts of a tiled frame take part in a draw.

bitflags::bitflags! {
    /// Sides (and the center) of a nine-slice frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PosFlags: u8 {
        const TOP    = 0b0_0001;
        const LEFT   = 0b0_0010;
        const BOTTOM = 0b0_0100;
        const RIGHT  = 0b0_1000;
        const CENTER = 0b1_0000;
        /// The full border without the center.
        const RING   = Self::TOP.bits() | Self::LEFT.bits() | Self::BOTTOM.bits() | Self::RIGHT.bits();
        const FULL   = Self::RING.bits() | Self::CENTER.bits();
    }
}

impl PosFlags {
    /// Whether every bit of `mask` is set.
    pub fn matches(self, mask: Self) -> bool {
        self.contains(mask)
    }

    /// Parse a `|`-separated list like `"top|left"`, `"ring"` or `"full"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut flags = Self::empty();
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            flags |= match part.to_ascii_lowercase().as_str() {
                "top" => Self::TOP,
                "left" => Self::LEFT,
                "bottom" => Self::BOTTOM,
                "right" => Self::RIGHT,
                "center" => Self::CENTER,
                "ring" => Self::RING,
                "full" => Self::FULL,
                _ => return None,
            };
        }
        Some(flags)
    }
}

impl Default for PosFlags {
    fn default() -> Self {
        Self::FULL
    }
}
