use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use acct_map::{FeedbackStatus, SelectionState};
use acct_model::{RoleScore, SingletonRole, Tier};

use acct_cli::types::{ClassifyReport, ScoreReport, WeightsReport};

pub fn print_classify(report: &ClassifyReport) {
    println!("File: {}", report.file.display());
    println!(
        "Columns: {}  Sampled rows: {}",
        report.headers.len(),
        report.sampled_rows
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Best column"),
        header_cell("Score"),
        header_cell("Suggested"),
        header_cell("Signals"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (role, best) in [
        (SingletonRole::Identifier, &report.best_identifier),
        (SingletonRole::DisplayName, &report.best_display_name),
    ] {
        let suggested = match role {
            SingletonRole::Identifier => report.outcome.identifier_suggestion.is_some(),
            SingletonRole::DisplayName => report.outcome.display_name_suggestion.is_some(),
        };
        table.add_row(singleton_row(role, best.as_ref(), suggested));
    }
    println!("{table}");
    println!("{}", state_line(report.outcome.state));

    if !report.bucket_suggestions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Column"),
            header_cell("Category"),
            header_cell("Confidence"),
            header_cell("Reason"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for suggestion in &report.bucket_suggestions {
            table.add_row(vec![
                Cell::new(&suggestion.field),
                Cell::new(suggestion.bucket.label()).fg(Color::Blue),
                Cell::new(format!("{:.0}%", suggestion.confidence * 100.0)),
                Cell::new(&suggestion.reason),
            ]);
        }
        println!();
        println!("Field categories:");
        println!("{table}");
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Data quality:");
        for warning in &report.warnings {
            println!("- {}", warning.message());
        }
    }
}

pub fn print_score(report: &ScoreReport) {
    println!("Scenario: {}", report.scenario);
    println!(
        "Columns: ID = {}, Name = {}",
        report.mapping.identifier, report.mapping.display_name
    );
    for item in &report.feedback {
        if item.status == FeedbackStatus::Warning {
            eprintln!("warning: {} ({})", item.message, item.field);
        }
    }

    let mut table = Table::new();
    let mut header = vec![
        header_cell("Account ID"),
        header_cell("Account"),
        header_cell("Score"),
        header_cell("Tier"),
    ];
    header.extend(report.criteria.iter().map(|label| header_cell(label)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &report.rows {
        let mut cells = vec![
            Cell::new(&row.account_id),
            Cell::new(&row.account_name),
            Cell::new(row.total_score).add_attribute(Attribute::Bold),
            tier_cell(row.tier),
        ];
        cells.extend(row.criterion_points.iter().map(|points| match points {
            0 => dim_cell(points),
            _ => Cell::new(points),
        }));
        table.add_row(cells);
    }
    println!("{table}");

    let summary = &report.summary;
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("High"),
        header_cell("Medium"),
        header_cell("Low"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        count_cell(summary.high, tier_color(Tier::High)),
        count_cell(summary.medium, tier_color(Tier::Medium)),
        count_cell(summary.low, tier_color(Tier::Low)),
        Cell::new(summary.total_accounts).add_attribute(Attribute::Bold),
    ]);
    println!("{totals}");

    if !report.all_scored {
        println!("Some criteria are unscored and count as 0.");
    }
    if let Some(message) = report.weights.and_then(|weights| weights.message()) {
        eprintln!("warning: {message}");
    }
    println!("Export: {}", report.export_path.display());
}

pub fn print_weights(report: &WeightsReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Weight")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (category, percent) in &report.weights.0 {
        table.add_row(vec![Cell::new(category), Cell::new(format!("{percent}%"))]);
    }
    let validation = &report.validation;
    let total_color = if validation.valid {
        Color::Green
    } else {
        Color::Red
    };
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{}%", validation.total))
            .fg(total_color)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    match validation.message() {
        Some(message) => eprintln!("error: {message}"),
        None => println!("Weights are valid."),
    }
}

fn singleton_row(role: SingletonRole, best: Option<&RoleScore>, suggested: bool) -> Vec<Cell> {
    let Some(best) = best else {
        return vec![
            Cell::new(role.to_string()),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ];
    };
    let suggested_cell = if suggested {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    };
    vec![
        Cell::new(role.to_string()),
        Cell::new(&best.field).fg(Color::Blue),
        Cell::new(format!("{:.1}", best.score)),
        suggested_cell,
        Cell::new(best.explain()),
    ]
}

fn state_line(state: SelectionState) -> String {
    match state {
        SelectionState::AwaitingSuggestionResponse => {
            "Suggested columns are ready to accept.".to_string()
        }
        SelectionState::ManualPick(role) => format!("Select the {role} column manually."),
        SelectionState::Resolved => "Columns resolved.".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Green,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Red,
    }
}

fn tier_cell(tier: Tier) -> Cell {
    Cell::new(tier.label()).fg(tier_color(tier))
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
