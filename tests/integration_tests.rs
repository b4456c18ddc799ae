use sprout_dashboard::analyzers::AggregateResult;
use sprout_dashboard::analyzers::status::QcStatus;
use sprout_dashboard::analyzers::thresholds::Band;
use sprout_dashboard::config::DashboardConfig;
use sprout_dashboard::normalize::{Eligibility, Feature};
use sprout_dashboard::pipeline::DashboardPipeline;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture_config() -> DashboardConfig {
    DashboardConfig {
        participant_sources: vec![
            "/no/such/dir/participants.tsv".to_string(),
            fixture("participants.tsv"),
        ],
        quality_source: Some(fixture("quality.csv")),
        ..DashboardConfig::default()
    }
}

async fn run_fixtures() -> AggregateResult {
    DashboardPipeline::new(fixture_config()).run().await
}

fn value_of(list: &[sprout_dashboard::analyzers::types::LabelCount], label: &str) -> Option<usize> {
    list.iter().find(|l| l.label == label).map(|l| l.value)
}

#[tokio::test]
async fn test_full_pipeline_overview() {
    let result = run_fixtures().await;

    assert!(result.notices.is_empty(), "{:?}", result.notices);
    // two rows dropped: no identifier, no age
    assert_eq!(result.overview.total_records, 6);
    assert_eq!(result.overview.total_participants, 5);
    assert_eq!(result.overview.active_cities, 4);
    assert_eq!(result.overview.avg_age, "3.3 years");
    assert_eq!(result.overview.age_range, "3.0 years");

    assert_eq!(result.metrics.enrollment_target, 500);
    assert_eq!(result.metrics.current_enrollment, 5);
    assert_eq!(result.metrics.enrollment_rate, "1.0");
    assert_eq!(result.metrics.age_range, "2.0 - 5.0 years");
    assert_eq!(result.metrics.data_collection_sites, 4);

    assert_eq!(result.age_data.ages.len(), 6);
    assert_eq!(result.age_data.min, Some(2.0));
    assert_eq!(result.age_data.max, Some(5.0));
}

#[tokio::test]
async fn test_geography_skips_cities_without_coordinates() {
    let result = run_fixtures().await;

    let cities: Vec<_> = result
        .geographic
        .iter()
        .map(|c| (c.city.as_str(), c.participants, c.percentage.as_str()))
        .collect();
    assert_eq!(
        cities,
        vec![
            ("Atlanta, GA", 2, "40.0"),
            ("Chicago, IL", 1, "20.0"),
            ("Dallas, TX", 1, "20.0"),
        ]
    );
}

#[tokio::test]
async fn test_multi_race_participants_count_in_each_bucket() {
    let result = run_fixtures().await;
    let race = &result.demographics.race_ethnicity;

    assert_eq!(value_of(race, "Caucasian"), Some(3));
    assert_eq!(value_of(race, "American Indian or Alaska Native"), Some(2));
    assert_eq!(value_of(race, "Black or African American"), Some(1));
    assert_eq!(value_of(race, "Asian"), Some(1));
    assert_eq!(value_of(race, "Other"), Some(1));
    assert_eq!(race[0].label, "Caucasian");
    assert_eq!(race[0].percentage, "50.0");
}

#[tokio::test]
async fn test_hispanic_and_income_groups() {
    let result = run_fixtures().await;
    let hispanic = &result.demographics.hispanic_counts;

    assert_eq!(hispanic[0].label, "Not Hispanic");
    assert_eq!(hispanic[0].value, 3);
    assert_eq!(value_of(hispanic, "Hispanic / Latine"), Some(2));
    assert_eq!(value_of(hispanic, "Unknown"), Some(1));

    let income = &result.demographics.income_groups;
    assert_eq!(value_of(income, "Low income"), Some(2));
    assert_eq!(value_of(income, "Middle income"), Some(2));
    assert_eq!(value_of(income, "Unknown"), Some(1));
}

#[tokio::test]
async fn test_lufs_bands_and_status() {
    let result = run_fixtures().await;
    let qc = &result.quality_control;

    let lufs = qc
        .feature_summary
        .iter()
        .find(|f| f.feature == Feature::Lufs)
        .unwrap();
    assert_eq!(lufs.total, 6);
    assert_eq!(lufs.below_threshold, 1);
    assert_eq!(lufs.above_threshold, 1);
    assert_eq!(lufs.within_range, 4);
    assert_eq!(lufs.status, QcStatus::NeedsAttention);

    let pitch = qc
        .feature_summary
        .iter()
        .find(|f| f.feature == Feature::PitchMean)
        .unwrap();
    assert_eq!(pitch.total, 5);
    assert_eq!(pitch.status, QcStatus::Excellent);

    assert_eq!(qc.feature_summary.len(), 8);
    assert_eq!(qc.sample_bands.len(), 47);
    let low_lufs: Vec<_> = qc
        .sample_bands
        .iter()
        .filter(|s| s.feature == Feature::Lufs && s.band == Band::Below)
        .collect();
    assert_eq!(low_lufs.len(), 1);
    assert_eq!(low_lufs[0].file_name.as_deref(), Some("seg_002.wav"));
    assert_eq!(low_lufs[0].city.as_deref(), Some("Atlanta, GA"));
    assert_eq!(low_lufs[0].value, -45.0);
    assert!((qc.avg_signal_energy.unwrap() - 0.8).abs() < 1e-9);
    assert_eq!(qc.avg_spl, Some(64.0));
}

#[tokio::test]
async fn test_eligibility_overall_and_by_city() {
    let result = run_fixtures().await;
    let eligibility = &result.eligibility_data;

    assert_eq!(eligibility.column.as_deref(), Some("Eligibility"));
    let overall: Vec<_> = eligibility
        .overall
        .iter()
        .map(|s| (s.status.label(), s.count))
        .collect();
    assert_eq!(
        overall,
        vec![("Eligible", 3), ("Not Eligible", 2), ("Review", 1)]
    );

    // the segment without a site code is only counted overall
    assert_eq!(eligibility.by_city.len(), 5);
    let by_city_total: usize = eligibility.by_city.iter().map(|c| c.count).sum();
    assert_eq!(by_city_total, 5);
    assert!(
        eligibility
            .by_city
            .iter()
            .any(|c| c.city == "Dallas, TX" && c.status == Eligibility::Other("Review".into()))
    );

    let qc = &result.quality_control;
    assert_eq!(qc.total_segments, 6);
    assert_eq!(qc.eligible_segments, 3);
    assert_eq!(qc.not_eligible_segments, 2);
    assert_eq!(qc.other_segments, 1);
    assert_eq!(qc.pass_rate, 50.0);
}

#[tokio::test]
async fn test_missing_quality_source_still_shows_participants() {
    let config = DashboardConfig {
        quality_source: Some("/no/such/dir/Post_qc_summary.xlsx".to_string()),
        ..fixture_config()
    };
    let result = DashboardPipeline::new(config).run().await;

    assert_eq!(result.notices.len(), 1);
    assert!(result.notices[0].starts_with("Quality control data unavailable"));
    assert_eq!(result.overview.total_participants, 5);
    assert_eq!(result.quality_control.total_segments, 0);
    assert!(result.quality_control.feature_summary.is_empty());
    assert!(result.eligibility_data.overall.is_empty());
}

#[tokio::test]
async fn test_no_participant_source_found() {
    let config = DashboardConfig {
        participant_sources: vec!["/no/such/dir/participants.tsv".to_string()],
        ..fixture_config()
    };
    let result = DashboardPipeline::new(config).run().await;

    assert_eq!(result.notices.len(), 1);
    assert!(result.notices[0].starts_with("Participant data unavailable"));
    assert_eq!(result.overview.total_participants, 0);
    assert_eq!(result.overview.avg_age, "N/A");
    assert_eq!(result.quality_control.total_segments, 6);
}

#[tokio::test]
async fn test_rerun_is_identical() {
    let pipeline = DashboardPipeline::new(fixture_config());
    let first = pipeline.run().await;
    let second = pipeline.run().await;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
