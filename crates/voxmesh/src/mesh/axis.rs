//! Axes and the per-axis role assignment used by slicing and emission.

/// One of the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Slowest-varying grid axis.
    X = 0,
    /// Middle grid axis.
    Y = 1,
    /// Fastest-varying grid axis.
    Z = 2,
}

impl Axis {
    /// All axes, in meshing order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Axis index (0, 1 or 2).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The first in-plane axis, `(d + 1) % 3`.
    #[inline]
    #[must_use]
    pub const fn u(self) -> usize {
        (self.index() + 1) % 3
    }

    /// The second in-plane axis, `(d + 2) % 3`.
    #[inline]
    #[must_use]
    pub const fn v(self) -> usize {
        (self.index() + 2) % 3
    }

    /// Output roles for quads on slices perpendicular to this axis.
    #[inline]
    #[must_use]
    pub const fn roles(self) -> AxisRoles {
        AxisRoles {
            depth: self.index(),
            across: self.v(),
            along: self.u(),
        }
    }
}

/// Which world axis each quad coordinate lands on.
///
/// Quads are described by an `(X, Y)` corner pair in the slice plane plus a
/// depth. `X` runs along the second in-plane axis and `Y` along the first,
/// which keeps every face wound counter-clockwise when seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRoles {
    /// Axis the slice is perpendicular to.
    pub depth: usize,
    /// World axis of the quad's `X` coordinate.
    pub across: usize,
    /// World axis of the quad's `Y` coordinate.
    pub along: usize,
}

impl AxisRoles {
    /// Places an in-plane `(x, y)` point at `depth` in world space.
    #[inline]
    #[must_use]
    pub fn place(self, x: u32, y: u32, depth: u32) -> [u32; 3] {
        let mut p = [0; 3];
        p[self.across] = x;
        p[self.along] = y;
        p[self.depth] = depth;
        p
    }
}
