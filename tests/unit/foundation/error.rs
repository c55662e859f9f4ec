use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChartreelError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        ChartreelError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        ChartreelError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        ChartreelError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChartreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn startup_kinds_are_classified() {
    assert!(ChartreelError::configuration("x").is_startup());
    assert!(ChartreelError::asset_load("x").is_startup());
    assert!(!ChartreelError::geometry("x").is_startup());
    assert!(!ChartreelError::encode("x").is_startup());
}
