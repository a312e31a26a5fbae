//! Corners and edges of a tile.

use std::ops::{
    Index,
    IndexMut,
};
use vek::*;


macro_rules! compass_enum {
    (
        $name:ident,
        $num_constant:ident = $num:expr,
        $per_name:ident,
        $all_constant:ident,
        ($(
            $variant:ident,
        )*),
    )=>{
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(u8)]
        pub enum $name {$(
            $variant,
        )*}

        pub const $num_constant: usize = $num;

        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
        pub struct $per_name<T>(pub [T; $num_constant]);

        pub const $all_constant: $per_name<$name> = $per_name([$(
            $name::$variant,
        )*]);

        impl<T> Index<$name> for $per_name<T> {
            type Output = T;

            fn index(&self, i: $name) -> &Self::Output {
                &self.0[i as usize]
            }
        }

        impl<T> IndexMut<$name> for $per_name<T> {
            fn index_mut(&mut self, i: $name) -> &mut Self::Output {
                &mut self.0[i as usize]
            }
        }

        impl<T: Clone> $per_name<T> {
            pub fn repeat(val: T) -> Self {
                $per_name([(); $num_constant].map(|()| val.clone()))
            }
        }

        impl<T> $per_name<T> {
            pub fn map<B, F>(self, f: F) -> $per_name<B>
            where
                F: FnMut(T) -> B,
            {
                $per_name(self.0.map(f))
            }

            /// Construct by calling `f` for each variant.
            pub fn from_fn<F>(mut f: F) -> Self
            where
                F: FnMut($name) -> T,
            {
                $all_constant.map(|v| f(v))
            }

            pub fn iter(&self) -> std::slice::Iter<T> {
                self.0.iter()
            }
        }

        impl<T> IntoIterator for $per_name<T> {
            type Item = T;
            type IntoIter = <[T; $num_constant] as IntoIterator>::IntoIter;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }
    };
}

compass_enum!(
    Corner,
    NUM_CORNERS = 4,
    PerCorner,
    CORNERS,
    (
        NW,
        NE,
        SE,
        SW,
    ),
);

compass_enum!(
    Edge,
    NUM_EDGES = 4,
    PerEdge,
    EDGES,
    (
        Top,
        Right,
        Bottom,
        Left,
    ),
);

impl Corner {
    /// The two edges meeting at this corner, as (north/south, east/west).
    pub const fn edges(self) -> [Edge; 2] {
        match self {
            Corner::NW => [Edge::Top, Edge::Left],
            Corner::NE => [Edge::Top, Edge::Right],
            Corner::SE => [Edge::Bottom, Edge::Right],
            Corner::SW => [Edge::Bottom, Edge::Left],
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Corner::NW => Corner::SE,
            Corner::NE => Corner::SW,
            Corner::SE => Corner::NW,
            Corner::SW => Corner::NE,
        }
    }

    /// Direction of this corner from the tile center, as <column, row>
    /// signs.
    pub const fn to_vec(self) -> Vec2<i64> {
        match self {
            Corner::NW => Vec2 { x: -1, y: -1 },
            Corner::NE => Vec2 { x: 1, y: -1 },
            Corner::SE => Vec2 { x: 1, y: 1 },
            Corner::SW => Vec2 { x: -1, y: 1 },
        }
    }

    /// Inverse of `to_vec`.
    pub fn from_vec(v: Vec2<i64>) -> Option<Self> {
        match (v.x, v.y) {
            (-1, -1) => Some(Corner::NW),
            (1, -1) => Some(Corner::NE),
            (1, 1) => Some(Corner::SE),
            (-1, 1) => Some(Corner::SW),
            _ => None,
        }
    }

    /// Bit of this corner in a marching squares case index.
    pub const fn case_bit(self) -> u8 {
        match self {
            Corner::NW => 1 << 3,
            Corner::NE => 1 << 2,
            Corner::SE => 1 << 1,
            Corner::SW => 1 << 0,
        }
    }
}

impl Edge {
    /// The two corners bounding this edge.
    pub const fn corners(self) -> [Corner; 2] {
        match self {
            Edge::Top => [Corner::NW, Corner::NE],
            Edge::Right => [Corner::NE, Corner::SE],
            Edge::Bottom => [Corner::SW, Corner::SE],
            Edge::Left => [Corner::NW, Corner::SW],
        }
    }
}
