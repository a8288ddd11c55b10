//! Terminal rendering of analysis results

use console::style;
use loghound_common::AnalysisResult;

/// Print a formatted diagnosis report.
pub fn render_result(result: &AnalysisResult) {
    println!("{}", style("Diagnosis").bold().underlined());
    println!();
    println!("  {}", result.summary);
    println!();
    println!(
        "  Category:   {}",
        style(&result.top_category).cyan().bold()
    );
    println!("  Confidence: {}", styled_confidence(result.confidence));

    for issue in &result.issues {
        println!();
        println!(
            "  {} {}",
            style(format!("[{}]", issue.category)).magenta(),
            issue.reason
        );
        if !issue.keyword_hits.is_empty() {
            println!(
                "    keywords: {}",
                style(issue.keyword_hits.join(", ")).dim()
            );
        }
        for line in &issue.evidence {
            println!("    {} {}", style(">").dim(), style(line).dim());
        }
    }
}

fn styled_confidence(confidence: f64) -> String {
    let text = format!("{:.2}", confidence);
    if confidence >= 0.6 {
        style(text).green().to_string()
    } else if confidence >= 0.4 {
        style(text).yellow().to_string()
    } else {
        style(text).red().to_string()
    }
}
