//! The `tutorgrade review` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use uuid::Uuid;

use tutorgrade_core::review::{Annotation, AnnotationKind, Review};
use tutorgrade_core::submission::SubmissionLog;

use crate::config::load_config_from;

pub struct ReviewArgs {
    pub id: String,
    pub score: f64,
    pub feedback: String,
    pub reviewer: Option<String>,
    pub correction: Vec<String>,
    pub suggestion: Vec<String>,
    pub praise: Vec<String>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: ReviewArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let id = Uuid::parse_str(&args.id)
        .with_context(|| format!("invalid submission id: {}", args.id))?;

    let mut log = SubmissionLog::load_json(&config.submissions_path)?;
    let submission = log.get(id).with_context(|| {
        format!(
            "no submission {id} in {}",
            config.submissions_path.display()
        )
    })?;

    let annotations = [
        (AnnotationKind::Correction, args.correction),
        (AnnotationKind::Suggestion, args.suggestion),
        (AnnotationKind::Praise, args.praise),
    ]
    .into_iter()
    .flat_map(|(kind, texts)| texts.into_iter().map(move |text| Annotation { text, kind }))
    .collect();

    let review = Review {
        score: args.score,
        feedback: args.feedback,
        annotations,
        ..Default::default()
    };
    let reviewer = args.reviewer.unwrap_or(config.default_reviewer);

    let reviewed = submission.apply_review(review, &reviewer)?;
    let summary = format!(
        "Reviewed submission {} for {}: {}/{}",
        reviewed.id, reviewed.student_id, reviewed.result.score, reviewed.max_points
    );
    log.replace(reviewed);
    log.save_json(&config.submissions_path)?;

    println!("{summary}");
    Ok(())
}
