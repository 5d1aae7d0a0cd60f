use std::fmt::Write;

use anyhow::Result;
use quizpeek::quiz::QuizView;
use quizpeek::search::SearchSession;
use serde_json::json;

use super::OutputFormat;

/// Print `view`, or the matches of `query` within it, to stdout.
pub(crate) fn print_view(view: &QuizView, query: Option<&str>, format: OutputFormat) -> Result<()> {
	let search = query.map(|query| {
		let mut search = SearchSession::new(view.headers());
		search.perform_search(query);
		search
	});

	let rendered = match (format, &search) {
		(OutputFormat::Plain, None) => format_plain(view),
		(OutputFormat::Plain, Some(search)) => format_matches_plain(search),
		(OutputFormat::Json, None) => format_view_json(view)?,
		(OutputFormat::Json, Some(search)) => format_matches_json(view, search)?,
	};
	print!("{rendered}");
	Ok(())
}

/// Numbered headers followed by their choices, correct ones marked.
pub(crate) fn format_plain(view: &QuizView) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "{}", view.title);
	for block in &view.blocks {
		let _ = writeln!(out);
		let _ = writeln!(out, "{}", block.header);
		for choice in &block.choices {
			if choice.correct {
				let _ = writeln!(out, "    {} ✓", choice.text);
			} else {
				let _ = writeln!(out, "    {}", choice.text);
			}
		}
	}
	out
}

/// One line per match: its position and the header with the match bracketed.
pub(crate) fn format_matches_plain(search: &SearchSession) -> String {
	let total = search.matches().len();
	if total == 0 {
		return format!("No matches for \"{}\"\n", search.query().trim());
	}

	let mut out = String::new();
	for (index, found) in search.matches().iter().enumerate() {
		let header = &search.headers()[found.block];
		let _ = writeln!(
			out,
			"{} / {}  {}[{}]{}",
			index + 1,
			total,
			&header[..found.range.start],
			&header[found.range.clone()],
			&header[found.range.end..],
		);
	}
	out
}

/// Format the whole view as JSON.
pub(crate) fn format_view_json(view: &QuizView) -> Result<String> {
	let questions: Vec<_> = view
		.blocks
		.iter()
		.map(|block| {
			json!({
				"number": block.number,
				"type": block.kind.as_str(),
				"header": block.header,
				"choices": block.choices,
			})
		})
		.collect();

	let payload = json!({
		"title": view.title,
		"questions": questions,
	});

	Ok(format!("{}\n", serde_json::to_string_pretty(&payload)?))
}

/// Format the matches of the applied query as JSON.
pub(crate) fn format_matches_json(view: &QuizView, search: &SearchSession) -> Result<String> {
	let matches: Vec<_> = search
		.matches()
		.iter()
		.map(|found| {
			let header = &search.headers()[found.block];
			let number = view.blocks.get(found.block).map(|block| block.number);
			let text = &header[found.range.clone()];
			json!({
				"number": number,
				"header": header,
				"start": found.range.start,
				"end": found.range.end,
				"text": text,
			})
		})
		.collect();

	let payload = json!({
		"title": view.title,
		"query": search.query().trim(),
		"total": matches.len(),
		"matches": matches,
	});

	Ok(format!("{}\n", serde_json::to_string_pretty(&payload)?))
}

#[cfg(test)]
mod tests {
	use quizpeek::quiz::{Choice, Question, Quiz};
	use serde_json::Value;

	use super::*;

	fn view() -> QuizView {
		let quiz = Quiz {
			title: Some("Animals".into()),
			questions: vec![
				Question {
					kind: "quiz".into(),
					question: "Is a cat a mammal?".into(),
					choices: vec![
						Choice {
							answer: Some("Yes".into()),
							correct: true,
							kind: None,
						},
						Choice {
							answer: Some("No".into()),
							correct: false,
							kind: None,
						},
					],
				},
				Question {
					kind: "true_false".into(),
					question: "Cats can swim".into(),
					choices: vec![Choice {
						answer: None,
						correct: true,
						kind: Some("true".into()),
					}],
				},
			],
		};
		QuizView::render(&quiz)
	}

	#[test]
	fn plain_output_marks_correct_choices() {
		let text = format_plain(&view());
		assert_eq!(
			text,
			"Animals\n\n1. Is a cat a mammal?\n    Yes ✓\n    No\n\n2. Cats can swim\n    TRUE ✓\n"
		);
	}

	#[test]
	fn plain_matches_bracket_each_occurrence() {
		let view = view();
		let mut search = SearchSession::new(view.headers());
		search.perform_search("CAT");
		assert_eq!(
			format_matches_plain(&search),
			"1 / 2  1. Is a [cat] a mammal?\n2 / 2  2. [Cat]s can swim\n"
		);
	}

	#[test]
	fn plain_matches_report_an_empty_result() {
		let view = view();
		let mut search = SearchSession::new(view.headers());
		search.perform_search(" dog ");
		assert_eq!(format_matches_plain(&search), "No matches for \"dog\"\n");
	}

	#[test]
	fn json_view_includes_questions_and_choices() {
		let json = format_view_json(&view()).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["title"], "Animals");
		assert_eq!(value["questions"][0]["type"], "quiz");
		assert_eq!(value["questions"][0]["choices"][0]["text"], "Yes");
		assert_eq!(value["questions"][0]["choices"][0]["correct"], true);
		assert_eq!(value["questions"][1]["choices"][0]["text"], "TRUE");
	}

	#[test]
	fn json_matches_carry_offsets() {
		let view = view();
		let mut search = SearchSession::new(view.headers());
		search.perform_search("cat");
		let json = format_matches_json(&view, &search).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["total"], 2);
		assert_eq!(value["matches"][1]["number"], 2);
		assert_eq!(value["matches"][1]["start"], 3);
		assert_eq!(value["matches"][1]["text"], "Cat");
	}
}
