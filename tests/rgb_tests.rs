use approx::assert_abs_diff_eq;
use colorpro::illuminant::ReferencePair;
use colorpro::rgb::{OETF_THRESHOLD, encode, linear_from_xyz, oetf, srgb_from_xyz, to_hex};
use colorpro::xyz::Xyz;
use palette::{LinSrgb, Srgb};

#[test]
fn oetf_matches_palette_encoding() {
    for i in 0..=200 {
        let v = i as f64 / 200.0;
        let theirs: Srgb<f64> = Srgb::from_linear(LinSrgb::new(v, v, v));
        assert_abs_diff_eq!(oetf(v), theirs.red, epsilon = 1e-6);
    }
}

#[test]
fn oetf_is_continuous_at_threshold() {
    let below = oetf(OETF_THRESHOLD);
    let above = oetf(OETF_THRESHOLD + 1e-12);
    assert_abs_diff_eq!(below, above, epsilon = 1e-6);
}

#[test]
fn oetf_is_monotonic() {
    let mut prev = oetf(-0.1);
    for i in -99..=1200 {
        let v = i as f64 / 1000.0;
        let curr = oetf(v);
        assert!(curr >= prev, "oetf decreased at {v}");
        prev = curr;
    }
}

#[test]
fn vibrant_violet_encodes_to_reference() {
    let xyz = Xyz::new(12.049595921505453, 6.784171925163363, 9.322065509558085);
    let linear = linear_from_xyz(xyz);
    assert_abs_diff_eq!(linear.red, 0.2397130959680379, epsilon = 1e-9);
    assert_abs_diff_eq!(linear.green, 0.014377619275214639, epsilon = 1e-9);
    assert_abs_diff_eq!(linear.blue, 0.09140614663697423, epsilon = 1e-9);

    let srgb = encode(linear);
    assert_abs_diff_eq!(srgb.red, 0.526822742868461, epsilon = 1e-9);
    assert_abs_diff_eq!(srgb.green, 0.12514492603195343, epsilon = 1e-9);
    assert_abs_diff_eq!(srgb.blue, 0.3343368791915444, epsilon = 1e-9);

    assert_eq!(to_hex(srgb).to_string(), "#862055");
}

#[test]
fn d65_white_is_hex_white() {
    let srgb = srgb_from_xyz(ReferencePair::D65_2.whitepoint());
    assert_eq!(to_hex(srgb).to_string(), "#ffffff");
}

#[test]
fn out_of_gamut_values_are_kept_until_quantization() {
    // Saturated green beyond the sRGB gamut
    let srgb = srgb_from_xyz(Xyz::new(10.0, 40.0, 5.0));
    assert!(srgb.red < 0.0);
    assert_eq!(to_hex(srgb).channels()[0], 0);
}

#[test]
fn hex_is_lowercase_and_padded() {
    let hex = to_hex(Srgb::new(0.0, 10.0 / 255.0, 1.0));
    assert_eq!(hex.to_string(), "#000aff");
}
