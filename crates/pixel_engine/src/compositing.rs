//! Pixel compositing
//!
//! Combines an existing pixel color with an incoming paint color. Two modes
//! exist: unconditional replace and standard "over" alpha compositing. The
//! blend arithmetic is integer-only with round-half-up on the final /255
//! divisions - undo round-trips depend on bit-deterministic results.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Policy for combining an incoming paint color with an existing pixel.
///
/// Attached to a tool or operation at configuration time, never to the
/// buffer itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositingMode {
    /// Unconditional overwrite. A transparent incoming color is a
    /// transparent write, not a no-op.
    #[default]
    Replace,
    /// Porter-Duff "over": the incoming color is laid over the existing
    /// pixel weighted by its alpha.
    AlphaBlend,
}

impl CompositingMode {
    /// Combine `incoming` with `existing` under this mode
    pub fn composite(self, existing: Color, incoming: Color) -> Color {
        match self {
            CompositingMode::Replace => incoming,
            CompositingMode::AlphaBlend => alpha_blend(existing, incoming),
        }
    }
}

impl std::fmt::Display for CompositingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompositingMode::Replace => write!(f, "Replace"),
            CompositingMode::AlphaBlend => write!(f, "Alpha blend"),
        }
    }
}

/// Standard "over" alpha compositing of `incoming` over `existing`.
///
/// `outA = inA + exA * (255 - inA) / 255`; output RGB is the alpha-weighted
/// mix of incoming over existing normalized by outA. outA == 0 yields
/// transparent black. All /255 divisions round half up.
pub fn alpha_blend(existing: Color, incoming: Color) -> Color {
    if incoming.a == 0 {
        return existing;
    }
    if incoming.a == 255 {
        return incoming;
    }

    let a_src = incoming.a as u32;
    let a_dst = existing.a as u32;
    let inv = 255 - a_src;

    // Output alpha scaled by 255; zero only when both inputs are transparent
    // (and the a_src == 0 early return already handled half of that).
    let a_num = a_src * 255 + a_dst * inv;
    if a_num == 0 {
        return Color::TRANSPARENT;
    }

    let blend = |src: u8, dst: u8| -> u8 {
        let num = src as u32 * a_src * 255 + dst as u32 * a_dst * inv;
        // round-half-up of num / a_num
        ((2 * num + a_num) / (2 * a_num)) as u8
    };

    Color::argb(
        ((a_num + 127) / 255) as u8,
        blend(incoming.r, existing.r),
        blend(incoming.g, existing.g),
        blend(incoming.b, existing.b),
    )
}
