mod parser;

use std::io::Read;
use std::path::Path;

use crate::scoring::{AcademicProfile, PracticalLevel, SubjectScore, TargetId};

use super::domain::{Student, StudentId};

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("student {student_id} has unknown practical level '{label}'")]
    InvalidLevel { student_id: String, label: String },
    #[error("student {student_id} has a non-finite value in '{field}'")]
    InvalidScore {
        student_id: String,
        field: &'static str,
    },
}

/// Loads students from the academy's roster spreadsheet export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Student>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Student>, RosterImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(|row| {
                let numeric_cells = [
                    ("Korean", row.korean),
                    ("Math", row.math),
                    ("Elective 1", row.elective_1),
                    ("Elective 2", row.elective_2),
                    ("Practical Score", row.practical_score),
                ];
                if let Some((field, _)) = numeric_cells
                    .iter()
                    .find(|(_, value)| value.is_some_and(|value| !value.is_finite()))
                {
                    return Err(RosterImportError::InvalidScore {
                        student_id: row.student_id.clone(),
                        field: *field,
                    });
                }

                let practical_level = if row.practical_level.is_empty() {
                    None
                } else {
                    let level = PracticalLevel::parse(&row.practical_level).ok_or_else(|| {
                        RosterImportError::InvalidLevel {
                            student_id: row.student_id.clone(),
                            label: row.practical_level.clone(),
                        }
                    })?;
                    Some(level)
                };

                Ok(Student {
                    id: StudentId(row.student_id),
                    name: row.name,
                    cohort: row.cohort,
                    target_id: TargetId(row.target_id),
                    academic: AcademicProfile {
                        primary_language: optional_standard(row.korean),
                        mathematics: optional_standard(row.math),
                        foreign_language: SubjectScore {
                            grade: row.english_grade,
                            ..SubjectScore::default()
                        },
                        elective_1: optional_standard(row.elective_1),
                        elective_2: optional_standard(row.elective_2),
                    },
                    practical_level,
                    practical_score: row.practical_score.unwrap_or(0.0),
                    evaluations: Vec::new(),
                })
            })
            .collect()
    }
}

fn optional_standard(score: Option<f64>) -> SubjectScore {
    SubjectScore {
        standard_score: score,
        ..SubjectScore::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Student ID,Name,Cohort,Target ID,Korean,Math,English Grade,Elective 1,Elective 2,Practical Level,Practical Score\n";

    #[test]
    fn imports_rows_with_blank_cells() {
        let csv = format!(
            "{HEADER}stu-100,Baek Nari,2027,snu-design,121,,2,60,58,A+,94\n"
        );
        let students = RosterImporter::from_reader(Cursor::new(csv)).expect("import");
        assert_eq!(students.len(), 1);
        let student = &students[0];
        assert_eq!(student.id.0, "stu-100");
        assert_eq!(student.academic.primary_language.standard_score, Some(121.0));
        assert_eq!(student.academic.mathematics.standard_score, None);
        assert_eq!(student.academic.foreign_language.grade, Some(2));
        assert_eq!(student.practical_level, Some(PracticalLevel::APlus));
        assert_eq!(student.practical_score, 94.0);
    }

    #[test]
    fn rejects_unknown_practical_level() {
        let csv = format!("{HEADER}stu-101,Go Eun,2027,snu-design,110,100,3,55,55,S,80\n");
        let err = RosterImporter::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RosterImportError::InvalidLevel { .. }));
    }

    #[test]
    fn rejects_non_finite_scores() {
        let csv = format!("{HEADER}stu-900,Kim Hana,2027,snu-design,NaN,100,2,60,58,A,90\n");
        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterImportError::InvalidScore { student_id, field }) => {
                assert_eq!(student_id, "stu-900");
                assert_eq!(field, "Korean");
            }
            other => panic!("expected invalid score, got {other:?}"),
        }

        let csv = format!("{HEADER}stu-901,Kim Hana,2027,snu-design,120,100,2,60,58,A,inf\n");
        assert!(matches!(
            RosterImporter::from_reader(Cursor::new(csv)),
            Err(RosterImportError::InvalidScore {
                field: "Practical Score",
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let csv = format!("{HEADER}stu-102,Go Eun,2027,snu-design,abc,100,3,55,55,B,80\n");
        let err = RosterImporter::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RosterImportError::Csv(_)));
    }
}
