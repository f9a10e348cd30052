//! The `gradetrack add|update|remove|list` commands.

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Color, Table};

use gradetrack_core::statistics::{total_score, RateBand};
use gradetrack_core::{ExamDraft, ExamFilter, ExamId, ExamType, Grade, Score, Semester};

use super::{fmt_value, Workspace};
use crate::ExamArgs;

pub fn add(ws: &Workspace, args: ExamArgs) -> Result<()> {
    let draft = build_draft(ws, args)?;
    let mut store = ws.exams()?;
    let id = store.add(draft)?;
    ws.save_exams(&store)?;
    println!("Added exam {id}");
    Ok(())
}

pub fn update(ws: &Workspace, id: &str, args: ExamArgs) -> Result<()> {
    let id = parse_id(id)?;
    let draft = build_draft(ws, args)?;
    let mut store = ws.exams()?;
    store.update(id, draft)?;
    ws.save_exams(&store)?;
    println!("Updated exam {id}");
    Ok(())
}

pub fn remove(ws: &Workspace, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    let mut store = ws.exams()?;
    let removed = store.remove(id)?;
    ws.save_exams(&store)?;
    println!("Removed exam {id} ({})", removed.name);
    Ok(())
}

pub fn list(ws: &Workspace, grade: Option<&str>, semester: Option<&str>) -> Result<()> {
    let filter = ExamFilter {
        grade: grade.map(parse_field::<Grade>).transpose()?,
        semester: semester.map(parse_field::<Semester>).transpose()?,
    };
    let store = ws.exams()?;
    let exams = store.newest_first(&filter);

    if exams.is_empty() {
        println!("No exams recorded. Add one with `gradetrack add`.");
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["Id".to_string(), "Exam".to_string(), "Date".to_string()];
    header.extend(ws.catalog.iter().map(|s| s.name.clone()));
    header.push("Total".to_string());
    table.set_header(header);

    for exam in &exams {
        let mut row = vec![
            Cell::new(exam.id),
            Cell::new(format!(
                "{}\n{} {} · {}",
                exam.name, exam.grade, exam.semester, exam.exam_type
            )),
            Cell::new(exam.date),
        ];
        for subject in &ws.catalog {
            let score = exam.score(&subject.id);
            let cell = Cell::new(fmt_value(score.and_then(Score::parse)));
            row.push(match RateBand::for_score(score, subject.full_score) {
                Some(band) => cell.fg(band_color(band)),
                None => cell,
            });
        }
        row.push(Cell::new(total_score(exam)));
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}

pub fn band_color(band: RateBand) -> Color {
    match band {
        RateBand::Excellent => Color::Green,
        RateBand::Good => Color::Blue,
        RateBand::Pass => Color::Yellow,
        RateBand::Fail => Color::Red,
    }
}

fn parse_id(id: &str) -> Result<ExamId> {
    id.parse().map_err(|e: String| anyhow!(e))
}

fn parse_field<T: std::str::FromStr<Err = String>>(s: &str) -> Result<T> {
    s.parse().map_err(|e: String| anyhow!(e))
}

fn build_draft(ws: &Workspace, args: ExamArgs) -> Result<ExamDraft> {
    let mut draft = ExamDraft::new(args.name, args.date);
    draft.exam_type = parse_field::<ExamType>(&args.exam_type)?;
    draft.grade = parse_field::<Grade>(&args.grade)?;
    draft.semester = parse_field::<Semester>(&args.semester)?;

    for entry in &args.scores {
        let (subject_id, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid score '{entry}', expected SUBJECT=VALUE"))?;
        let subject = ws.catalog.require(subject_id.trim())?;
        let value = value.trim();
        if value.is_empty() {
            draft.scores.remove(&subject.id);
            continue;
        }

        let score = match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Score::Number(v),
            _ => Score::from(value),
        };
        match score.parse() {
            Some(v) if (0.0..=subject.full_score).contains(&v) => {}
            Some(v) => tracing::warn!(
                "{} score {v} is outside 0..={}",
                subject.id,
                subject.full_score
            ),
            None => tracing::warn!("{} score '{value}' is not a number", subject.id),
        }
        draft.scores.insert(subject.id.clone(), score);
    }

    Ok(draft)
}
