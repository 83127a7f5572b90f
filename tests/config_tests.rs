use approx::assert_abs_diff_eq;
use colorpro::ciecam02::{AppearanceCorrelate, CorrelateKind};
use colorpro::config::{ColorproConfig, ConfigError, ConfigOverrides, ViewingOverrides};
use colorpro::error::ConfigurationError;
use colorpro::illuminant::ReferencePair;
use colorpro::output::OutputFormat;
use colorpro::pipeline::NamedCorrelate;
use colorpro::viewing::Surround;

#[test]
fn test_default_config() {
    let config = ColorproConfig::default();
    assert_eq!(config.viewing.whitepoint, ReferencePair::D65_2);
    assert_eq!(config.viewing.adapting_luminance, 16.0);
    assert_eq!(config.viewing.background_luminance, 18.0);
    assert_eq!(config.viewing.surround, Surround::Average);
    assert!(!config.viewing.discount_illuminant);
    assert_eq!(config.output.format, OutputFormat::Scss);
    assert_eq!(
        config.output.pairs,
        vec![ReferencePair::D50_2, ReferencePair::D65_2]
    );
}

#[test]
fn test_parse_toml() {
    let toml_str = r#"
[viewing]
whitepoint = "D50/10"
adapting_luminance = 64.0
surround = "dim"
discount_illuminant = true

[output]
format = "text"
correlate = "colorfulness"
pairs = ["D65/10", "A/2"]
"#;

    let config = ColorproConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.viewing.whitepoint, ReferencePair::D50_10);
    assert_eq!(config.viewing.adapting_luminance, 64.0);
    // Unset keys keep their defaults
    assert_eq!(config.viewing.background_luminance, 18.0);
    assert_eq!(config.viewing.surround, Surround::Dim);
    assert!(config.viewing.discount_illuminant);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert_eq!(config.output.correlate, CorrelateKind::Colorfulness);
    assert_eq!(config.output.pairs.len(), 2);
    assert_eq!(config.output.pairs[1].to_string(), "A/2");
}

#[test]
fn test_unknown_surround_is_rejected() {
    let result = ColorproConfig::from_toml_str("[viewing]\nsurround = \"dusk\"\n");
    assert!(matches!(result, Err(ConfigError::Extract(_))));
}

#[test]
fn test_invalid_viewing_condition() {
    let config =
        ColorproConfig::from_toml_str("[viewing]\nbackground_luminance = 0.0\n").unwrap();
    assert_eq!(
        config.pipeline([]).unwrap_err(),
        ConfigurationError::BackgroundLuminance(0.0)
    );
}

#[test]
fn test_custom_whitepoint() {
    let config = ColorproConfig::from_toml_str(
        "[viewing]\ncustom_whitepoint = [96.422, 100.0, 82.521]\n",
    )
    .unwrap();
    let white = config.viewing.adopted_white();
    assert_eq!(white.x, 96.422);
    assert!(config.pipeline([]).is_ok());
}

#[test]
fn test_unit_scale_custom_whitepoint_is_normalized() {
    let config = ColorproConfig::from_toml_str(
        "[viewing]\ncustom_whitepoint = [0.95047, 1.0, 1.08883]\ndiscount_illuminant = true\n",
    )
    .unwrap();
    let white = config.viewing.adopted_white();
    assert_abs_diff_eq!(white.x, 95.047, epsilon = 1e-9);
    assert_eq!(white.y, 100.0);
    assert_abs_diff_eq!(white.z, 108.883, epsilon = 1e-9);

    let record = config
        .pipeline([ReferencePair::D65_2])
        .unwrap()
        .convert(&NamedCorrelate::new("white", AppearanceCorrelate::new(0.0, 100.0, 0.0)))
        .unwrap();
    assert_abs_diff_eq!(record.xyz.y, 100.0, epsilon = 0.05);
    let lab = record.reference(ReferencePair::D65_2).unwrap().lab;
    assert_abs_diff_eq!(lab.l, 100.0, epsilon = 1e-2);
    assert_eq!(record.hex.to_string(), "#ffffff");
}

#[test]
fn test_pipeline_adds_extra_pairs_once() {
    let config = ColorproConfig::default();
    let pipeline = config
        .pipeline([ReferencePair::D65_2, ReferencePair::D65_10])
        .unwrap();
    assert_eq!(
        pipeline.pairs(),
        &[
            ReferencePair::D50_2,
            ReferencePair::D65_2,
            ReferencePair::D65_10
        ]
    );
}

#[test]
fn test_layering_file_env_and_overrides() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "colorpro.toml",
            r#"
[viewing]
adapting_luminance = 40.0
background_luminance = 20.0
surround = "dark"
"#,
        )?;
        jail.set_env("COLORPRO_VIEWING__BACKGROUND_LUMINANCE", "25.0");
        jail.set_env("COLORPRO_OUTPUT__FORMAT", "json");

        let overrides = ConfigOverrides {
            viewing: ViewingOverrides {
                surround: Some(Surround::Dim),
                ..Default::default()
            },
            ..Default::default()
        };

        let config =
            ColorproConfig::load(Some(std::path::Path::new("colorpro.toml")), &overrides)
                .unwrap();
        // File
        assert_eq!(config.viewing.adapting_luminance, 40.0);
        // Env over file
        assert_eq!(config.viewing.background_luminance, 25.0);
        assert_eq!(config.output.format, OutputFormat::Json);
        // CLI over everything
        assert_eq!(config.viewing.surround, Surround::Dim);
        Ok(())
    });
}

#[test]
fn test_save_round_trip() {
    figment::Jail::expect_with(|jail| {
        let mut config = ColorproConfig::default();
        config.viewing.whitepoint = ReferencePair::D50_10;
        config.viewing.surround = Surround::Dark;
        config.output.format = OutputFormat::Affinity;

        let path = jail.directory().join("saved.toml");
        config.save(&path).unwrap();

        let loaded = ColorproConfig::load(Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(loaded, config);
        Ok(())
    });
}
