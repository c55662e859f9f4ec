use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn trunc_px_rounds_toward_zero() {
    assert_eq!(trunc_px(2.9), 2);
    assert_eq!(trunc_px(-2.9), -2);
    assert_eq!(trunc_px(-0.5), 0);
}
