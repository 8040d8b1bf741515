use crate::handlers::curve::CurvePoint;
use crate::handlers::query::HitRow;
use colored::*;
use recency::RecencyError;
use recency::config::RecencyConfig;
use recency::search::Explanation;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn boost() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Output a RecencyError in structured JSON format
pub fn output_error_json(error: &RecencyError, output_format: &str) {
    if output_format == "json" {
        let code = match error {
            RecencyError::Configuration(_) => "CONFIGURATION_ERROR",
            RecencyError::Logging(_) => "LOGGING_ERROR",
            RecencyError::Index(_) => "INDEX_ERROR",
            RecencyError::Payload(_) => "PAYLOAD_ERROR",
            RecencyError::Fixture(_) => "FIXTURE_ERROR",
            RecencyError::Serialization(_) => "SERIALIZATION_ERROR",
            RecencyError::Other(_) => "ERROR",
        };
        let error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

/// `3h`, `2d 4h`; negative values are shown as lying in the future.
pub fn format_hours(hours: i64) -> String {
    let (sign, hours) = if hours < 0 {
        ("in ", hours.unsigned_abs())
    } else {
        ("", hours.unsigned_abs())
    };
    match (hours / 24, hours % 24) {
        (0, h) => format!("{}{}h", sign, h),
        (d, 0) => format!("{}{}d", sign, d),
        (d, h) => format!("{}{}d {}h", sign, d, h),
    }
}

/// Neutral multipliers are muted, boosts are highlighted.
pub fn format_multiplier(multiplier: f32) -> ColoredString {
    let text = format!("×{:.3}", multiplier);
    if multiplier > 1.0 {
        text.color(CliColors::boost()).bold()
    } else {
        text.color(CliColors::muted())
    }
}

pub fn print_curve(policy: &str, points: &[CurvePoint]) {
    println!(
        "{} {}",
        "━━━ Recency Boost ━━━".color(CliColors::accent()).bold(),
        policy.color(CliColors::primary())
    );

    if points.is_empty() {
        println!("{}", format_info("No points in range."));
        return;
    }

    let widest = points.iter().map(|p| p.multiplier).fold(1.0_f32, f32::max);
    for point in points {
        // Bar length relative to the largest multiplier in the table
        let bar = ((point.multiplier / widest) * 30.0).round() as usize;
        println!(
            "{:>8}  {:<10} {}",
            format_hours(point.recency_hours).color(CliColors::muted()),
            format_multiplier(point.multiplier),
            "█".repeat(bar).color(CliColors::boost())
        );
    }
}

pub fn print_hits(rows: &[HitRow]) {
    if rows.is_empty() {
        println!("{}", format_info("No matching documents."));
        return;
    }

    println!(
        "{}",
        format_success(&format!("Found {} documents:", rows.len()))
    );
    println!();

    for (rank, row) in rows.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {} {}  {}",
            rank + 1,
            "doc".color(CliColors::muted()),
            row.doc.to_string().color(CliColors::primary()).bold(),
            format!("{:.4}", row.score).color(CliColors::success())
        );
        if let Some(base) = row.base_score {
            let multiplier = if base > 0.0 { row.score / base } else { 1.0 };
            line.push_str(&format!(
                "  {} {:.4}  {}",
                "bm25".color(CliColors::muted()),
                base,
                format_multiplier(multiplier)
            ));
        }
        println!("{}", line);
    }
}

pub fn print_explanation(explanation: &Explanation) {
    println!(
        "{} {}",
        format!("{:.4}", explanation.value)
            .color(CliColors::success())
            .bold(),
        explanation.description.color(CliColors::primary())
    );
    print_explanation_details(&explanation.details, "");
}

fn print_explanation_details(details: &[Explanation], prefix: &str) {
    for (i, detail) in details.iter().enumerate() {
        let is_last = i == details.len() - 1;
        let (branch, extension) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        let description = if detail.description.starts_with("recency boost") {
            detail.description.color(CliColors::boost()).bold()
        } else {
            detail.description.color(CliColors::primary())
        };

        println!(
            "{}{}{} {}",
            prefix.color(CliColors::muted()),
            branch.color(CliColors::muted()),
            format!("{:.4}", detail.value).color(CliColors::accent()),
            description
        );
        print_explanation_details(&detail.details, &format!("{}{}", prefix, extension));
    }
}

pub fn print_config(config: &RecencyConfig) {
    let boosting = &config.boosting;
    println!("{}", "━━━ Boosting ━━━".color(CliColors::accent()).bold());
    print_field("Policy", &boosting.policy.to_string());
    print_field("Reference epoch", &boosting.reference_epoch.to_rfc3339());
    print_field("Decay function", &boosting.decay_function.to_string());
    print_field("Scale", &format!("{}h", boosting.scale));
    print_field("Decay", &boosting.decay.to_string());
    print_field("Weight", &boosting.weight.to_string());

    println!();
    println!("{}", "━━━ BM25 ━━━".color(CliColors::accent()).bold());
    print_field("k1", &config.bm25.k1.to_string());
    print_field("b", &config.bm25.b.to_string());

    println!();
    println!("{}", "━━━ Logging ━━━".color(CliColors::accent()).bold());
    print_field("Level", &config.logging.level.to_string());
    print_field("Format", &format!("{:?}", config.logging.format).to_lowercase());
    print_field("Stdout", &config.logging.stdout.to_string());
    if let Some(file) = &config.logging.file {
        print_field("File", &file.display().to_string());
    }
}

fn print_field(label: &str, value: &str) {
    println!(
        "{}: {}",
        label.color(CliColors::muted()),
        value.color(CliColors::primary())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0), "0h");
        assert_eq!(format_hours(5), "5h");
        assert_eq!(format_hours(48), "2d");
        assert_eq!(format_hours(50), "2d 2h");
        assert_eq!(format_hours(-3), "in 3h");
    }
}
