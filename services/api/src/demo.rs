use crate::infra::{build_service, load_roster, RosterService};
use atelier_admissions::admissions::{
    AdmissionsServiceError, CompareRequest, DashboardSummary, NarrativeQuery, PeerAnalytics,
    ScoreOverrides, SimulationOutcome, SimulationRequest,
};
use atelier_admissions::config::AppConfig;
use atelier_admissions::error::AppError;
use atelier_admissions::narrative::NarrativeMode;
use atelier_admissions::roster::{EvaluationSubmission, StudentId};
use atelier_admissions::scoring::{PracticalLevel, RiskLabel, TargetId};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Student id from the roster
    #[arg(long)]
    pub(crate) student: String,
    /// Target id (university + major)
    #[arg(long)]
    pub(crate) target: String,
    /// What-if Korean standard score
    #[arg(long)]
    pub(crate) korean: Option<f64>,
    /// What-if mathematics standard score
    #[arg(long)]
    pub(crate) math: Option<f64>,
    /// What-if English grade (1 is best)
    #[arg(long)]
    pub(crate) english_grade: Option<u8>,
    /// What-if first elective standard score
    #[arg(long)]
    pub(crate) elective_1: Option<f64>,
    /// What-if second elective standard score
    #[arg(long)]
    pub(crate) elective_2: Option<f64>,
    /// What-if practical exam score
    #[arg(long)]
    pub(crate) practical_score: Option<f64>,
    /// Roster CSV export to load on top of the seeded students
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl SimulateArgs {
    fn overrides(&self) -> ScoreOverrides {
        ScoreOverrides {
            korean: self.korean,
            math: self.math,
            english_grade: self.english_grade,
            elective_1: self.elective_1,
            elective_2: self.elective_2,
            practical_score: self.practical_score,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RosterReportArgs {
    /// Show the peer scatter for this target instead of the dashboard
    #[arg(long)]
    pub(crate) target: Option<String>,
    /// Roster CSV export to load on top of the seeded students
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on the demo evaluation (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) recorded_on: Option<NaiveDate>,
    /// Student the walkthrough follows
    #[arg(long, default_value = "stu-005")]
    pub(crate) student: String,
    /// Skip the narrative commentary portion of the demo
    #[arg(long)]
    pub(crate) skip_narrative: bool,
}

fn load(csv: Option<PathBuf>) -> Result<Arc<RosterService>, AppError> {
    let config = AppConfig::load()?;
    let roster = load_roster(csv.as_deref())?;
    Ok(build_service(roster, &config.narrative))
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let service = load(args.roster_csv.clone())?;
    let outcome = service.simulate(SimulationRequest {
        student_id: Some(StudentId(args.student.clone())),
        profile: None,
        practical_score: None,
        target_id: TargetId(args.target.clone()),
        overrides: args.overrides(),
    })?;

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Outcome unavailable as JSON: {err}"),
        }
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

pub(crate) fn run_roster_report(args: RosterReportArgs) -> Result<(), AppError> {
    let service = load(args.csv)?;
    match args.target {
        Some(target) => render_peers(&service.peer_analytics(&TargetId(target))?),
        None => render_dashboard(&service.dashboard()?),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        recorded_on,
        student,
        skip_narrative,
    } = args;
    let recorded_on = recorded_on.unwrap_or_else(|| Local::now().date_naive());
    let service = load(None)?;
    let student_id = StudentId(student);

    println!("Admissions simulator demo");
    render_dashboard(&service.dashboard()?);

    let student = service.student(&student_id)?;
    println!(
        "\nFollowing {} ({}) aiming for {}",
        student.name, student.id.0, student.target_id.0
    );
    let baseline = simulate(&service, &student_id, &student.target_id, ScoreOverrides::default())?;
    render_outcome(&baseline);

    println!("\nWhat if Korean rises by 10 and English improves one grade?");
    let what_if = ScoreOverrides {
        korean: student
            .academic
            .primary_language
            .standard_score
            .map(|score| score + 10.0),
        english_grade: student
            .academic
            .foreign_language
            .grade
            .map(|grade| grade.saturating_sub(1).max(1)),
        ..ScoreOverrides::default()
    };
    let improved = simulate(&service, &student_id, &student.target_id, what_if.clone())?;
    render_outcome(&improved);

    println!("\nRecording a studio evaluation dated {recorded_on}");
    let updated = service.record_evaluation(
        &student_id,
        EvaluationSubmission {
            recorded_on,
            instructor: "Demo instructor".to_string(),
            practical_level: PracticalLevel::A,
            practical_score: 91.0,
            comment: Some("Stronger composition under time pressure".to_string()),
            academic: None,
        },
    )?;
    println!(
        "- {} evaluations on file, latest level {}",
        updated.evaluations.len(),
        updated
            .latest_evaluation()
            .map(|entry| entry.practical_level.label())
            .unwrap_or("-")
    );

    let targets = service
        .targets()?
        .into_iter()
        .map(|target| target.id)
        .collect();
    let comparison = service.compare_targets(CompareRequest {
        student_id: student_id.clone(),
        target_ids: targets,
        overrides: ScoreOverrides::default(),
    })?;
    println!("\nTarget comparison");
    for outcome in &comparison.outcomes {
        println!(
            "  - {:<34} {:>3}% {}",
            outcome.target_name, outcome.composite.probability_percent, outcome.risk
        );
    }

    println!();
    render_peers(&service.peer_analytics(&student.target_id)?);

    if skip_narrative {
        return Ok(());
    }

    println!("\nNarrative commentary");
    match service.narrate(NarrativeQuery {
        mode: NarrativeMode::Simulate,
        student_id,
        target_ids: Vec::new(),
        prompt: "Explain the effect of the what-if scores".to_string(),
        overrides: what_if,
    }) {
        Ok(narrative) => {
            println!("  {}", narrative.headline);
            if let Some(section) = narrative.simulate {
                for line in section.advice {
                    println!("    - {line}");
                }
            }
        }
        Err(AdmissionsServiceError::Narrative(err)) => {
            println!("  Narrative unavailable: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn simulate(
    service: &RosterService,
    student_id: &StudentId,
    target_id: &TargetId,
    overrides: ScoreOverrides,
) -> Result<SimulationOutcome, AdmissionsServiceError> {
    service.simulate(SimulationRequest {
        student_id: Some(student_id.clone()),
        profile: None,
        practical_score: None,
        target_id: target_id.clone(),
        overrides,
    })
}

fn render_outcome(outcome: &SimulationOutcome) {
    println!(
        "- {} [{}]: composite {:.1} vs cutline {:.1} ({})",
        outcome.target_name,
        outcome.track.label(),
        outcome.composite.total,
        outcome.cutline,
        outcome.cutline_gap.signed_label()
    );
    println!(
        "  Probability {}% -> {}",
        outcome.composite.probability_percent, outcome.risk
    );
    for contribution in &outcome.contributions {
        println!(
            "    - {:<12} {:>6.1} x {:.2} = {:>6.1}",
            contribution.term.label(),
            contribution.value,
            contribution.weight,
            contribution.points
        );
    }
}

fn render_dashboard(dashboard: &DashboardSummary) {
    println!("Risk dashboard ({} students)", dashboard.total_students);
    for summary in &dashboard.targets {
        let counts = RiskLabel::ALL
            .iter()
            .map(|label| {
                format!(
                    "{} {}",
                    label,
                    summary.risk_counts.get(label).copied().unwrap_or(0)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let average = summary
            .average_probability
            .map(|value| format!("{value:.0}%"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "- {} (cutline {:.0}): {} students, avg {} | {}",
            summary.target_name, summary.cutline, summary.students, average, counts
        );
        if summary.unscored > 0 {
            println!("  {} students missing weighted scores", summary.unscored);
        }
    }
}

fn render_peers(analytics: &PeerAnalytics) {
    println!(
        "Peer scatter for {} (mean raw score {:.1})",
        analytics.target_id.0, analytics.peer_mean
    );
    for entry in &analytics.entries {
        println!(
            "  - {:<14} academic {:>5.1} | practical {:>5.1} | {} line | {}",
            entry.name,
            entry.indices.academic_index,
            entry.indices.practical_index,
            entry.line,
            entry.cluster
        );
    }
    if !analytics.skipped.is_empty() {
        println!("  Skipped without standard scores: {}", analytics.skipped.len());
    }
    match analytics.trend {
        Some(fit) => println!(
            "  Trend: practical = {:.2} x academic + {:.1}",
            fit.slope, fit.intercept
        ),
        None => println!("  Trend: not enough spread to fit a line"),
    }
}
