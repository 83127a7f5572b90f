use approx::assert_abs_diff_eq;
use colorpro::ciecam02::AppearanceCorrelate;
use colorpro::error::Stage;
use colorpro::illuminant::ReferencePair;
use colorpro::pipeline::{NamedCorrelate, Pipeline};
use colorpro::viewing::{Surround, ViewingCondition};

fn default_pipeline() -> Pipeline {
    let vc = ViewingCondition::new(
        ReferencePair::D65_2.whitepoint(),
        16.0,
        18.0,
        Surround::Average,
        false,
    )
    .unwrap();
    Pipeline::new(vc, [ReferencePair::D50_2, ReferencePair::D65_2])
}

#[test]
fn vibrant_violet_end_to_end() {
    let record = default_pipeline()
        .convert(&NamedCorrelate::new(
            "vibrant-violet",
            AppearanceCorrelate::new(355.0, 25.0, 55.0),
        ))
        .unwrap();

    assert_eq!(record.name, "vibrant-violet");
    assert_abs_diff_eq!(record.xyz.y, 6.784171925163363, epsilon = 1e-6);

    let d50 = record.reference(ReferencePair::D50_2).unwrap();
    assert_abs_diff_eq!(d50.lab.l, 31.310434612355238, epsilon = 1e-5);
    assert_abs_diff_eq!(d50.lab.a, 46.047364042981904, epsilon = 1e-5);
    assert_abs_diff_eq!(d50.lab.b, -15.116459373450454, epsilon = 1e-5);
    assert_abs_diff_eq!(d50.lch.c, 48.46511198064109, epsilon = 1e-5);
    assert_abs_diff_eq!(d50.lch.h, 341.8259917291041, epsilon = 1e-5);

    let d65 = record.reference(ReferencePair::D65_2).unwrap();
    assert_abs_diff_eq!(d65.lch.c, 47.7096924641534, epsilon = 1e-5);
    assert_abs_diff_eq!(d65.lch.h, 352.081790128495, epsilon = 1e-5);

    assert_abs_diff_eq!(record.srgb.red * 255.0, 134.34, epsilon = 0.01);
    assert_eq!(record.hex.to_string(), "#862055");
}

#[test]
fn batch_keeps_input_order() {
    let entries: Vec<_> = (0..64)
        .map(|i| {
            NamedCorrelate::new(
                format!("c{i}"),
                AppearanceCorrelate::new(i as f64 * 5.5, 20.0 + (i % 7) as f64 * 10.0, 15.0),
            )
        })
        .collect();

    let results = default_pipeline().run(&entries);
    assert_eq!(results.len(), entries.len());
    for (entry, result) in entries.iter().zip(&results) {
        assert_eq!(result.as_ref().unwrap().name, entry.name);
    }
}

#[test]
fn failed_entry_does_not_affect_others() {
    let pipeline = default_pipeline();
    let entries = vec![
        NamedCorrelate::new("ok-1", AppearanceCorrelate::new(10.0, 40.0, 20.0)),
        NamedCorrelate::new("too-light", AppearanceCorrelate::new(10.0, 140.0, 20.0)),
        NamedCorrelate::new("ok-2", AppearanceCorrelate::new(200.0, 60.0, 10.0)),
    ];

    let results = pipeline.run(&entries);
    assert!(results[0].is_ok());
    assert!(results[2].is_ok());

    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.name, "too-light");
    assert_eq!(err.source.stage, Stage::Input);

    // Same result as converting alone
    let alone = pipeline.convert(&entries[2]).unwrap();
    assert_eq!(results[2].as_ref().unwrap(), &alone);
}

#[test]
fn empty_batch() {
    assert!(default_pipeline().run(&[]).is_empty());
}

#[test]
fn viewing_condition_changes_the_result() {
    let correlate = AppearanceCorrelate::new(120.0, 50.0, 30.0);
    let base = default_pipeline().convert_correlate("x", &correlate).unwrap();

    let dark = ViewingCondition::new(
        ReferencePair::D65_2.whitepoint(),
        16.0,
        18.0,
        Surround::Dark,
        false,
    )
    .unwrap();
    let other = Pipeline::new(dark, [ReferencePair::D65_2])
        .convert_correlate("x", &correlate)
        .unwrap();
    assert_ne!(base.xyz, other.xyz);
}

#[test]
fn d50_viewing_white_encodes_neutral_as_white() {
    let vc = ViewingCondition::new(
        ReferencePair::D50_2.whitepoint(),
        16.0,
        18.0,
        Surround::Average,
        true,
    )
    .unwrap();
    let record = Pipeline::new(vc, [ReferencePair::D50_2])
        .convert(&NamedCorrelate::new("paper", AppearanceCorrelate::new(0.0, 100.0, 0.0)))
        .unwrap();

    let lab = record.reference(ReferencePair::D50_2).unwrap().lab;
    assert_abs_diff_eq!(lab.l, 100.0, epsilon = 1e-3);
    assert_abs_diff_eq!(lab.a, 0.0, epsilon = 1e-2);
    assert_abs_diff_eq!(lab.b, 0.0, epsilon = 1e-2);

    assert_abs_diff_eq!(record.srgb.red, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(record.srgb.green, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(record.srgb.blue, 1.0, epsilon = 1e-3);
    assert_eq!(record.hex.to_string(), "#ffffff");
}
