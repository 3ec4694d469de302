// Integration tests for the aspect analysis pipeline
// This is a separate crate that tests the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aspect_pulse::core::{AnalysisError, AspectEntry, AspectKeywordTable};
use aspect_pulse::pipelines::aspect_analysis::*;
use aspect_pulse::pipelines::sentiment_analysis::*;
use aspect_pulse::text::{DependencyParser, DependencyRole, SyntaxToken};

/// Negative for a handful of complaint words, positive otherwise.
struct ComplaintModel;

impl SentimentModel for ComplaintModel {
    fn predict(&self, text: &str) -> anyhow::Result<SentimentResult> {
        let lower = text.to_lowercase();
        if ["bad", "terrible", "disappointed", "awful"]
            .iter()
            .any(|w| lower.contains(w))
        {
            Ok(SentimentResult::new("NEGATIVE", 0.9))
        } else {
            Ok(SentimentResult::new("POSITIVE", 0.8))
        }
    }
}

/// Fails for any sentence mentioning "camera".
struct CameraShy;

impl SentimentModel for CameraShy {
    fn predict(&self, text: &str) -> anyhow::Result<SentimentResult> {
        if text.to_lowercase().contains("camera") {
            anyhow::bail!("inference error")
        }
        Ok(SentimentResult::new("POSITIVE", 0.7))
    }
}

/// Batch calls always fail; single calls work and are counted.
struct NoBatching {
    single_calls: AtomicUsize,
}

impl SentimentModel for NoBatching {
    fn predict(&self, _text: &str) -> anyhow::Result<SentimentResult> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SentimentResult::new("NEGATIVE", 0.6))
    }

    fn predict_batch(&self, _texts: &[&str]) -> anyhow::Result<Vec<anyhow::Result<SentimentResult>>> {
        anyhow::bail!("batch endpoint down")
    }
}

struct NoSubjects;

impl DependencyParser for NoSubjects {
    fn parse(&self, sentence: &str) -> anyhow::Result<Vec<SyntaxToken>> {
        Ok(sentence
            .split_whitespace()
            .enumerate()
            .map(|(head, word)| SyntaxToken {
                text: word.to_string(),
                lemma: word.to_string(),
                role: DependencyRole::Other("dep".to_string()),
                head,
            })
            .collect())
    }
}

fn battery_camera() -> AspectKeywordTable {
    AspectKeywordTable::new(vec![
        AspectEntry::new("Battery", ["battery"]),
        AspectEntry::new("Camera", ["camera"]),
    ])
    .unwrap()
}

#[test]
fn records_follow_sentence_order() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::reference()
        .model(ComplaintModel)
        .build()?;

    let text = "The battery life on this phone is amazing, it lasts for two days straight! \
                However, the camera is a bit of a letdown. Photos are terrible in low light. \
                Performance is top-notch. This is a great device overall.";
    let run = pipeline.analyze(text)?;

    let aspects: Vec<_> = run.records().iter().map(|r| r.aspect()).collect();
    assert_eq!(aspects, ["Battery", "Camera", "Camera", "Performance"]);
    assert_eq!(run.sentences(), 5);
    assert_eq!(run.unclassified(), 1);
    assert!(!run.is_degraded());

    let photos = &run.records()[2];
    assert_eq!(photos.sentence().as_str(), "Photos are terrible in low light.");
    assert!((photos.polarity().value() + 0.9).abs() < 1e-6);
    Ok(())
}

#[test]
fn unclassified_sentences_are_dropped() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .model(ComplaintModel)
        .build()?;
    let run = pipeline.analyze("This is a great device overall.")?;
    assert!(run.is_empty());
    assert_eq!(run.unclassified(), 1);
    Ok(())
}

#[test]
fn ambiguous_sentence_is_deterministic() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .parser(NoSubjects)
        .model(ComplaintModel)
        .build()?;

    for _ in 0..20 {
        let run = pipeline.analyze("The battery is great but the camera is bad.")?;
        assert_eq!(run.records().len(), 1);
        assert_eq!(run.records()[0].aspect(), "Battery");
    }
    Ok(())
}

#[test]
fn empty_input_is_an_empty_run() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::reference()
        .model(ComplaintModel)
        .build()?;

    for text in ["", "   ", "\n\n"] {
        let (run, report) = pipeline.analyze_and_aggregate(text)?;
        assert!(run.is_empty());
        assert_eq!(run.sentences(), 0);
        assert!(report.mean_polarity().values().all(|v| *v == 0.0));
        assert_eq!(report.mean_polarity().len(), 5);
    }
    Ok(())
}

#[test]
fn short_fragments_are_skipped() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .min_sentence_chars(12)
        .model(ComplaintModel)
        .build()?;
    let run = pipeline.analyze("Battery! The camera is sharp.")?;
    assert_eq!(run.skipped_fragments(), 1);
    assert_eq!(run.records().len(), 1);
    assert_eq!(run.records()[0].aspect(), "Camera");
    Ok(())
}

#[test]
fn per_sentence_failure_keeps_the_run_going() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .model(CameraShy)
        .build()?;
    let run = pipeline.analyze("The camera is blurry. The battery is solid.")?;

    assert_eq!(run.records().len(), 2);
    assert_eq!(run.degraded_sentences(), 1);
    assert_eq!(run.records()[0].polarity().value(), 0.0);
    assert!((run.records()[1].polarity().value() - 0.7).abs() < 1e-6);
    Ok(())
}

#[test]
fn failed_batch_falls_back_to_single_calls() -> anyhow::Result<()> {
    let model = Arc::new(NoBatching {
        single_calls: AtomicUsize::new(0),
    });
    let scorer = SentimentScorer::new(model.clone());
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .batch_size(2)
        .scorer(scorer)
        .build()?;

    let run = pipeline.analyze("Battery is weak. Camera is weak. Battery again is weak.")?;
    assert_eq!(run.records().len(), 3);
    assert!(run.records().iter().all(|r| (r.polarity().value() + 0.6).abs() < 1e-6));
    assert!(!run.is_degraded());
    assert_eq!(model.single_calls.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn plural_subject_picks_its_aspect() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::reference()
        .model(ComplaintModel)
        .build()?;
    let run = pipeline.analyze("The lenses are scratched but the price is fair.")?;
    assert_eq!(run.records().len(), 1);
    assert_eq!(run.records()[0].aspect(), "Camera");
    Ok(())
}

#[test]
fn batch_size_does_not_change_results() -> anyhow::Result<()> {
    let text = "Battery is bad. Camera is great. The battery is terrible. Camera awful. Battery fine.";
    let mut runs = Vec::new();
    for size in [1, 2, 3, 16] {
        let pipeline = AnalysisPipelineBuilder::new(battery_camera())
            .batch_size(size)
            .model(ComplaintModel)
            .build()?;
        runs.push(pipeline.analyze(text)?);
    }
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
    Ok(())
}

#[test]
fn load_failure_is_distinct_from_empty_result() {
    let err = AnalysisPipelineBuilder::reference()
        .scorer_loader(|| -> anyhow::Result<ComplaintModel> { anyhow::bail!("weights missing") })
        .build()
        .unwrap_err();
    assert!(matches!(err, AnalysisError::ScoringUnavailable(_)));
    assert!(err.is_capability_failure());

    let err = AnalysisPipelineBuilder::reference().build().unwrap_err();
    assert!(matches!(err, AnalysisError::ScoringUnavailable(_)));
}

#[test]
fn invalid_configuration_is_rejected() {
    let err = AnalysisPipelineBuilder::reference()
        .batch_size(0)
        .model(ComplaintModel)
        .build()
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Configuration(_)));

    assert!(matches!(
        AspectKeywordTable::from_json("[]"),
        Err(AnalysisError::Configuration(_))
    ));
}

#[test]
fn input_bound_is_opt_in() -> anyhow::Result<()> {
    let long = "The battery is fine. ".repeat(300);

    let unbounded = AnalysisPipelineBuilder::reference()
        .model(ComplaintModel)
        .build()?;
    assert_eq!(unbounded.analyze(&long)?.records().len(), 300);

    let bounded = AnalysisPipelineBuilder::reference()
        .max_input_chars(5000)
        .model(ComplaintModel)
        .build()?;
    let err = bounded.analyze(&long).unwrap_err();
    assert!(matches!(err, AnalysisError::InputTooLong { max: 5000, .. }));
    assert!(!err.is_capability_failure());
    Ok(())
}

#[test]
fn custom_vocabulary_from_json() -> anyhow::Result<()> {
    let table = AspectKeywordTable::from_json(
        r#"[
            {"aspect": "Taste", "keywords": ["flavor", "taste", "bitter"]},
            {"aspect": "Price", "keywords": ["price", "expensive"]}
        ]"#,
    )?;
    let pipeline = AnalysisPipelineBuilder::new(table)
        .model(ComplaintModel)
        .build()?;

    let (run, report) =
        pipeline.analyze_and_aggregate("The flavor is awful and bitter. Too expensive for beans.")?;
    let aspects: Vec<_> = run.records().iter().map(|r| r.aspect()).collect();
    assert_eq!(aspects, ["Taste", "Price"]);
    assert_eq!(report.aspects().collect::<Vec<_>>(), ["Taste", "Price"]);
    assert_eq!(
        report.negative_sample("Taste").map(|s| s.text.as_str()),
        Some("The flavor is awful and bitter.")
    );
    Ok(())
}

#[test]
fn records_serialize_for_presentation() -> anyhow::Result<()> {
    let pipeline = AnalysisPipelineBuilder::new(battery_camera())
        .model(ComplaintModel)
        .build()?;
    let run = pipeline.analyze("The battery is bad.")?;
    let json = serde_json::to_value(run.records())?;
    assert_eq!(json[0]["aspect"], "Battery");
    assert_eq!(json[0]["sentence"], "The battery is bad.");
    assert!(json[0]["polarity"].as_f64().unwrap() < -0.89);
    Ok(())
}
