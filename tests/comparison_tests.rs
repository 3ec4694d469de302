// Integration tests for paired entity analysis and report comparison
// This is a separate crate that tests the public API

use std::sync::Arc;
use std::time::Duration;

use aspect_pulse::aggregation::compare;
use aspect_pulse::core::AnalysisError;
use aspect_pulse::pipelines::aspect_analysis::*;
use aspect_pulse::pipelines::sentiment_analysis::*;
use aspect_pulse::text::TextPreprocessor;

struct ComplaintModel;

impl SentimentModel for ComplaintModel {
    fn predict(&self, text: &str) -> anyhow::Result<SentimentResult> {
        let lower = text.to_lowercase();
        if ["bad", "terrible", "dies", "awful", "grainy"]
            .iter()
            .any(|w| lower.contains(w))
        {
            Ok(SentimentResult::new("NEGATIVE", 0.95))
        } else {
            Ok(SentimentResult::new("POSITIVE", 0.85))
        }
    }
}

struct SlowModel(Duration);

impl SentimentModel for SlowModel {
    fn predict(&self, _text: &str) -> anyhow::Result<SentimentResult> {
        std::thread::sleep(self.0);
        Ok(SentimentResult::new("POSITIVE", 0.5))
    }
}

const PHONE_A: &str = "The battery dies by noon. Battery charging is terrible too. \
                       The screen is bright and vibrant. Photos are grainy at night.";
const PHONE_B: &str = "The camera takes stunning portraits. For the price, this phone is a steal.";

fn pipeline() -> anyhow::Result<Arc<AnalysisPipeline>> {
    Ok(Arc::new(
        AnalysisPipelineBuilder::reference()
            .model(ComplaintModel)
            .build()?,
    ))
}

#[tokio::test]
async fn pair_produces_full_series() -> anyhow::Result<()> {
    let comparison = pipeline()?
        .analyze_pair(
            EntityText::new("Phone A", PHONE_A),
            EntityText::new("Phone B", PHONE_B),
            None,
        )
        .await?;

    assert_eq!(comparison.a.name, "Phone A");
    assert_eq!(comparison.b.name, "Phone B");
    assert_eq!(
        comparison.series.aspects(),
        ["Battery", "Camera", "Display", "Performance", "Value"]
    );

    let battery = &comparison.series.pairs[0];
    assert!((battery.a + 0.95).abs() < 1e-6);
    assert_eq!(battery.b, 0.0);

    let value = &comparison.series.pairs[4];
    assert_eq!(value.a, 0.0);
    assert!((value.b - 0.85).abs() < 1e-6);
    Ok(())
}

#[tokio::test]
async fn entity_without_records_still_compares() -> anyhow::Result<()> {
    let comparison = pipeline()?
        .analyze_pair(
            EntityText::new("Silent", "Arrived on time. Nice box."),
            EntityText::new("Phone B", PHONE_B),
            None,
        )
        .await?;

    assert!(comparison.a.run.is_empty());
    assert_eq!(comparison.series.a_values(), vec![0.0; 5]);
    assert_eq!(comparison.series.pairs.len(), 5);
    assert!(comparison.series.b_values().iter().any(|v| *v > 0.0));
    Ok(())
}

#[tokio::test]
async fn paired_run_matches_sequential_runs() -> anyhow::Result<()> {
    let pipeline = pipeline()?;
    let comparison = Arc::clone(&pipeline)
        .analyze_pair(
            EntityText::new("A", PHONE_A),
            EntityText::new("B", PHONE_B),
            Some(Duration::from_secs(30)),
        )
        .await?;

    let a = pipeline.report(EntityText::new("A", PHONE_A))?;
    let b = pipeline.report(EntityText::new("B", PHONE_B))?;
    assert_eq!(comparison.a, a);
    assert_eq!(comparison.b, b);
    assert_eq!(comparison.series, compare(&a.report, &b.report)?);
    Ok(())
}

#[tokio::test]
async fn deadline_discards_everything() -> anyhow::Result<()> {
    let pipeline = Arc::new(
        AnalysisPipelineBuilder::reference()
            .model(SlowModel(Duration::from_millis(200)))
            .build()?,
    );

    let result = pipeline
        .analyze_pair(
            EntityText::new("A", "The battery is fine."),
            EntityText::new("B", "The camera is fine."),
            Some(Duration::from_millis(20)),
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout(_)));
    assert!(err.is_capability_failure());
    Ok(())
}

#[tokio::test]
async fn negative_samples_feed_term_frequencies() -> anyhow::Result<()> {
    let comparison = pipeline()?
        .analyze_pair(
            EntityText::new("Phone A", PHONE_A),
            EntityText::new("Phone B", PHONE_B),
            None,
        )
        .await?;

    let sample = comparison
        .a
        .report
        .negative_sample("Battery")
        .expect("battery complaints");
    assert_eq!(sample.sentence_count, 2);
    assert_eq!(
        sample.text,
        "The battery dies by noon. Battery charging is terrible too."
    );

    let terms = sample.term_frequencies(&TextPreprocessor::new());
    assert_eq!(terms[0].term, "battery");
    assert_eq!(terms[0].count, 2);
    assert!(terms.iter().all(|t| t.term != "the"));

    assert!(comparison.b.report.negative_sample("Battery").is_none());
    Ok(())
}

#[tokio::test]
async fn comparison_serializes() -> anyhow::Result<()> {
    let comparison = pipeline()?
        .analyze_pair(
            EntityText::new("Phone A", PHONE_A),
            EntityText::new("Phone B", PHONE_B),
            None,
        )
        .await?;

    let json = serde_json::to_value(&comparison)?;
    assert_eq!(json["series"]["pairs"][1]["aspect"], "Camera");
    assert_eq!(json["a"]["report"]["mean_polarity"][0]["aspect"], "Battery");
    assert_eq!(json["b"]["report"]["total_records"], 2);
    Ok(())
}
