use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied RGBA8.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a straight-alpha RGBA8 pixel over a premultiplied destination pixel.
pub(crate) fn over_straight(dst: PremulRgba8, src: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(src[3]);
    over(
        dst,
        [
            mul_div255_u8(u16::from(src[0]), a),
            mul_div255_u8(u16::from(src[1]), a),
            mul_div255_u8(u16::from(src[2]), a),
            src[3],
        ],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
