use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::narrative::{
    ChatTurn, NarrativeContext, NarrativeError, NarrativeMode, NarrativeRequest,
    NarrativeService, StructuredNarrative,
};
use crate::roster::{
    EvaluationEntry, EvaluationSubmission, RepositoryError, Student, StudentId, StudentRepository,
    TargetRepository,
};
use crate::scoring::{
    classify_cluster, classify_line, classify_risk, compute_gap, ensure_finite, evaluate_target,
    fit_line, index_pair, peer_mean, AcademicProfile, MetricDirection, ScoringError, SubjectSlot,
    SubjectValues, TargetId, TargetProfile, TrendPoint,
};

use super::views::{
    CompareRequest, DashboardSummary, PeerAnalytics, PeerEntry, ScoreOverrides,
    SimulationOutcome, SimulationRequest, SubjectGap, SubjectGapReport, TargetComparison,
    TargetSummary,
};

/// Service composing the roster stores, the scoring engine and the narrative backend.
pub struct AdmissionsService<S, T> {
    students: Arc<S>,
    targets: Arc<T>,
    narrator: Arc<dyn NarrativeService>,
}

impl<S, T> AdmissionsService<S, T>
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    pub fn new(students: Arc<S>, targets: Arc<T>, narrator: Arc<dyn NarrativeService>) -> Self {
        Self {
            students,
            targets,
            narrator,
        }
    }

    pub fn student(&self, id: &StudentId) -> Result<Student, AdmissionsServiceError> {
        let student = self
            .students
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(student)
    }

    pub fn students(&self) -> Result<Vec<Student>, AdmissionsServiceError> {
        Ok(self.students.list()?)
    }

    pub fn target(&self, id: &TargetId) -> Result<TargetProfile, AdmissionsServiceError> {
        let target = self.targets.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(target)
    }

    pub fn targets(&self) -> Result<Vec<TargetProfile>, AdmissionsServiceError> {
        Ok(self.targets.list()?)
    }

    /// Store a new instructor evaluation. A submitted academic profile replaces the old one.
    pub fn record_evaluation(
        &self,
        id: &StudentId,
        submission: EvaluationSubmission,
    ) -> Result<Student, AdmissionsServiceError> {
        let mut student = self.student(id)?;
        let practical_score = ensure_finite("practical_score", submission.practical_score)?;

        if let Some(academic) = submission.academic {
            academic.validate()?;
            student.academic = academic;
        }
        student.evaluations.push(EvaluationEntry {
            recorded_on: submission.recorded_on,
            instructor: submission.instructor,
            practical_level: submission.practical_level,
            practical_score,
            comment: submission.comment,
        });
        // backdated entries join the history without replacing a newer evaluation
        if let Some(latest) = student.latest_evaluation() {
            let (level, score) = (latest.practical_level, latest.practical_score);
            student.practical_level = Some(level);
            student.practical_score = score;
        }

        self.students.upsert(student.clone())?;
        debug!(student = %id.0, level = %submission.practical_level, "evaluation recorded");
        Ok(student)
    }

    /// Run the simulator for one target, applying what-if overrides.
    pub fn simulate(
        &self,
        request: SimulationRequest,
    ) -> Result<SimulationOutcome, AdmissionsServiceError> {
        let SimulationRequest {
            student_id,
            profile,
            practical_score,
            target_id,
            overrides,
        } = request;

        let (profile, practical_score) = match (&student_id, profile) {
            (_, Some(profile)) => (profile, practical_score.unwrap_or(0.0)),
            (Some(id), None) => {
                let student = self.student(id)?;
                (
                    student.academic,
                    practical_score.unwrap_or(student.practical_score),
                )
            }
            (None, None) => {
                return Err(AdmissionsServiceError::InvalidRequest(
                    "simulation needs a student_id or a profile".to_string(),
                ))
            }
        };

        let target = self.target(&target_id)?;
        let outcome = simulate_against(student_id, profile, practical_score, &overrides, &target)?;
        debug!(
            target_id = %target.id.0,
            probability = outcome.composite.probability_percent,
            risk = %outcome.risk,
            "simulation complete"
        );
        Ok(outcome)
    }

    /// Simulate one student against several targets, most likely admission first.
    pub fn compare_targets(
        &self,
        request: CompareRequest,
    ) -> Result<TargetComparison, AdmissionsServiceError> {
        if request.target_ids.is_empty() {
            return Err(AdmissionsServiceError::InvalidRequest(
                "compare needs at least one target".to_string(),
            ));
        }

        let student = self.student(&request.student_id)?;
        let mut outcomes = Vec::with_capacity(request.target_ids.len());
        for target_id in &request.target_ids {
            let target = self.target(target_id)?;
            outcomes.push(simulate_against(
                Some(student.id.clone()),
                student.academic.clone(),
                student.practical_score,
                &request.overrides,
                &target,
            )?);
        }

        outcomes.sort_by(|a, b| {
            b.composite
                .probability_percent
                .cmp(&a.composite.probability_percent)
                .then_with(|| a.target_id.cmp(&b.target_id))
        });

        Ok(TargetComparison {
            student_id: student.id,
            outcomes,
        })
    }

    /// Index pairs, line types and clusters for every student aiming at a target.
    pub fn peer_analytics(
        &self,
        target_id: &TargetId,
    ) -> Result<PeerAnalytics, AdmissionsServiceError> {
        self.target(target_id)?;
        let peers = self.students.by_target(target_id)?;

        let mut scored = Vec::with_capacity(peers.len());
        let mut skipped = Vec::new();
        for student in peers {
            match student.academic.raw_academic_score() {
                Ok(raw) => scored.push((student, raw)),
                Err(ScoringError::InsufficientData { .. }) => skipped.push(student.id),
                Err(err) => return Err(err.into()),
            }
        }

        let raw_scores: Vec<f64> = scored.iter().map(|(_, raw)| *raw).collect();
        let mean = peer_mean(&raw_scores)?;

        let mut entries = Vec::with_capacity(scored.len());
        let mut cluster_counts = BTreeMap::new();
        for (student, raw_score) in scored {
            let indices = index_pair(raw_score, mean, student.practical_level)?;
            let cluster = classify_cluster(indices.academic_index, indices.practical_index);
            *cluster_counts.entry(cluster).or_insert(0) += 1;
            entries.push(PeerEntry {
                student_id: student.id,
                name: student.name,
                raw_score,
                indices,
                line: classify_line(indices.academic_index, indices.practical_index),
                cluster,
            });
        }

        let points: Vec<TrendPoint> = entries
            .iter()
            .map(|entry| TrendPoint::new(entry.indices.academic_index, entry.indices.practical_index))
            .collect();
        let trend = match fit_line(&points) {
            Ok(fit) => Some(fit),
            Err(err) => {
                warn!(target_id = %target_id.0, error = %err, "peer trend line unavailable");
                None
            }
        };

        Ok(PeerAnalytics {
            target_id: target_id.clone(),
            peer_mean: mean,
            entries,
            skipped,
            cluster_counts,
            trend,
        })
    }

    /// Per-subject gaps against the averages of students sharing the same target.
    pub fn subject_gaps(&self, id: &StudentId) -> Result<SubjectGapReport, AdmissionsServiceError> {
        let student = self.student(id)?;
        let peers = self.students.by_target(&student.target_id)?;

        let mut gaps = Vec::new();
        for slot in SubjectSlot::ALL {
            let direction = match slot {
                SubjectSlot::ForeignLanguage => MetricDirection::LowerIsBetter,
                _ => MetricDirection::HigherIsBetter,
            };

            let Some(student_value) = subject_value(&student.academic, slot) else {
                continue;
            };
            let peer_values: Vec<f64> = peers
                .iter()
                .filter_map(|peer| subject_value(&peer.academic, slot))
                .collect();
            if peer_values.is_empty() {
                continue;
            }
            let peer_average = peer_values.iter().sum::<f64>() / peer_values.len() as f64;

            gaps.push(SubjectGap {
                subject: slot,
                label: student
                    .academic
                    .slot(slot)
                    .subject_name
                    .clone()
                    .unwrap_or_else(|| slot.label().to_string()),
                student_value,
                peer_average,
                direction,
                gap: compute_gap(student_value, peer_average, direction)?,
            });
        }

        Ok(SubjectGapReport {
            student_id: student.id,
            target_id: student.target_id,
            peer_count: peers.len(),
            gaps,
        })
    }

    /// Risk distribution per target across the whole roster.
    pub fn dashboard(&self) -> Result<DashboardSummary, AdmissionsServiceError> {
        let mut summaries = Vec::new();
        let mut total_students = 0;

        for target in self.targets.list()? {
            let students = self.students.by_target(&target.id)?;
            total_students += students.len();

            let mut risk_counts = BTreeMap::new();
            let mut unscored = 0;
            let mut probabilities = Vec::new();
            for student in &students {
                let result = SubjectValues::from_profile(
                    &student.academic,
                    student.practical_score,
                    &target.weights,
                )
                .and_then(|values| evaluate_target(&values, &target));

                match result {
                    Ok(result) => {
                        let risk = classify_risk(f64::from(result.probability_percent));
                        *risk_counts.entry(risk).or_insert(0) += 1;
                        probabilities.push(f64::from(result.probability_percent));
                    }
                    Err(err) => {
                        debug!(student = %student.id.0, error = %err, "student left unscored");
                        unscored += 1;
                    }
                }
            }

            let average_probability = if probabilities.is_empty() {
                None
            } else {
                Some(probabilities.iter().sum::<f64>() / probabilities.len() as f64)
            };

            summaries.push(TargetSummary {
                target_name: target.display_name(),
                target_id: target.id,
                track: target.track,
                cutline: target.cutline,
                students: students.len(),
                risk_counts,
                unscored,
                average_probability,
            });
        }

        Ok(DashboardSummary {
            total_students,
            targets: summaries,
        })
    }

    /// Commentary for a student's numbers. The engine output is computed first and handed
    /// to the narrative backend as context.
    pub fn narrate(
        &self,
        query: NarrativeQuery,
    ) -> Result<StructuredNarrative, AdmissionsServiceError> {
        let student = self.student(&query.student_id)?;
        let primary_target = query
            .target_ids
            .first()
            .cloned()
            .unwrap_or_else(|| student.target_id.clone());

        let context = match query.mode {
            NarrativeMode::Explain => {
                let outcome = self.simulate(SimulationRequest {
                    student_id: Some(student.id.clone()),
                    profile: None,
                    practical_score: None,
                    target_id: primary_target,
                    overrides: ScoreOverrides::default(),
                })?;
                let gaps = self.subject_gaps(&student.id)?.gaps;
                NarrativeContext::Explain { outcome, gaps }
            }
            NarrativeMode::Compare => {
                let target_ids = if query.target_ids.is_empty() {
                    self.targets.list()?.into_iter().map(|target| target.id).collect()
                } else {
                    query.target_ids.clone()
                };
                let comparison = self.compare_targets(CompareRequest {
                    student_id: student.id.clone(),
                    target_ids,
                    overrides: ScoreOverrides::default(),
                })?;
                NarrativeContext::Compare { comparison }
            }
            NarrativeMode::Simulate => {
                let request = |overrides: ScoreOverrides| SimulationRequest {
                    student_id: Some(student.id.clone()),
                    profile: None,
                    practical_score: None,
                    target_id: primary_target.clone(),
                    overrides,
                };
                let baseline = self.simulate(request(ScoreOverrides::default()))?;
                let scenario = self.simulate(request(query.overrides.clone()))?;
                NarrativeContext::Simulate { baseline, scenario }
            }
        };

        let narrative = self.narrator.generate(&NarrativeRequest {
            prompt: query.prompt,
            context,
        })?;
        Ok(narrative)
    }

    pub fn chat(&self, turns: &[ChatTurn]) -> Result<Vec<String>, AdmissionsServiceError> {
        Ok(self.narrator.chat(turns)?)
    }
}

/// Request for narrative commentary around a student's results.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrativeQuery {
    pub mode: NarrativeMode,
    pub student_id: StudentId,
    #[serde(default)]
    pub target_ids: Vec<TargetId>,
    pub prompt: String,
    #[serde(default)]
    pub overrides: ScoreOverrides,
}

/// Grades for the foreign-language slot, standard scores everywhere else.
fn subject_value(profile: &AcademicProfile, slot: SubjectSlot) -> Option<f64> {
    let score = profile.slot(slot);
    match slot {
        SubjectSlot::ForeignLanguage => score.grade.map(f64::from),
        _ => score.standard_score,
    }
}

fn simulate_against(
    student_id: Option<StudentId>,
    mut profile: AcademicProfile,
    mut practical_score: f64,
    overrides: &ScoreOverrides,
    target: &TargetProfile,
) -> Result<SimulationOutcome, ScoringError> {
    overrides.apply(&mut profile, &mut practical_score);

    let values = SubjectValues::from_profile(&profile, practical_score, &target.weights)?;
    let composite = evaluate_target(&values, target)?;
    let contributions = values.contributions(&target.weights)?;
    let cutline_gap = compute_gap(composite.total, target.cutline, MetricDirection::HigherIsBetter)?;

    Ok(SimulationOutcome {
        student_id,
        target_id: target.id.clone(),
        target_name: target.display_name(),
        track: target.track,
        composite,
        risk: classify_risk(f64::from(composite.probability_percent)),
        cutline: target.cutline,
        cutline_gap,
        contributions,
    })
}

/// Error raised by the admissions service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionsServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Narrative(#[from] NarrativeError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
