use crate::infra::parse_month;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use sales_intel::error::AppError;
use sales_intel::reporting::import::LeadCsvImporter;
use sales_intel::reporting::sales::domain::{PeriodWindow, RawLead};
use sales_intel::reporting::sales::views::SalesReportView;
use sales_intel::reporting::sales::{build_report, ReportScope, SalesRoster, StatusVocabulary};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SalesReportArgs {
    /// Lead tracker CSV export to report over
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Reporting month (1-12)
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: u32,
    /// Reporting year
    #[arg(long)]
    pub(crate) year: i32,
    /// Only include leads tagged with this project
    #[arg(long)]
    pub(crate) project: Option<String>,
    /// Only include leads set by this setter
    #[arg(long)]
    pub(crate) setter: Option<String>,
    /// Emit the raw report as JSON instead of the rendered summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting month (1-12). Defaults to the current month.
    #[arg(long, value_parser = parse_month)]
    pub(crate) month: Option<u32>,
    /// Reporting year. Defaults to the current year.
    #[arg(long)]
    pub(crate) year: Option<i32>,
}

pub(crate) fn run_sales_report(args: SalesReportArgs) -> Result<(), AppError> {
    let SalesReportArgs {
        csv,
        month,
        year,
        project,
        setter,
        json,
    } = args;

    let leads = LeadCsvImporter::from_path(csv)?;
    let window = PeriodWindow::new(month, year)?;
    let scope = ReportScope { project, setter };
    let view = build_report(
        &leads,
        window,
        &scope,
        &SalesRoster::standard(),
        &StatusVocabulary::standard(),
    );

    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("report serialization failed: {err}"),
        }
    } else {
        render_sales_report(&view);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let month = args.month.unwrap_or_else(|| today.month());
    let year = args.year.unwrap_or_else(|| today.year());
    let window = PeriodWindow::new(month, year)?;

    println!("Sales intelligence demo (built-in sample data)");
    let leads = sample_leads(window);
    let view = build_report(
        &leads,
        window,
        &ReportScope::default(),
        &SalesRoster::standard(),
        &StatusVocabulary::standard(),
    );
    render_sales_report(&view);

    Ok(())
}

pub(crate) fn render_sales_report(view: &SalesReportView) {
    println!(
        "Reporting window: {:02}/{}",
        view.window.month, view.window.year
    );

    let global = &view.global;
    println!("\nGlobal metrics");
    println!(
        "- {} leads | {} presented ({:.1}% show rate)",
        global.total, global.presented, global.show_rate
    );
    println!(
        "- {} gross closes | {} refunds | {} net ({:.1}% net closing rate)",
        global.gross_closed, global.refunded, global.net_closed, global.net_closing_rate
    );
    println!(
        "- Revenue {:.2} EUR | leads {:+.1}% vs previous month | revenue {:+.1}%",
        global.revenue, global.leads_trend, global.revenue_trend
    );

    if view.setters.is_empty() {
        println!("\nSetters: no roster activity in this window");
    } else {
        println!("\nSetters");
        for setter in &view.setters {
            println!(
                "- {}: {} agendas | {} presented ({:.1}% show) | {} closed ({:.1}% quality) | {:+.1}pp",
                setter.name,
                setter.agendas,
                setter.presented,
                setter.show_rate,
                setter.closed,
                setter.quality_rate,
                setter.trend
            );
        }
    }

    if view.closers.is_empty() {
        println!("\nClosers: no roster activity in this window");
    } else {
        println!("\nClosers");
        for closer in &view.closers {
            println!(
                "- {}: {} calls | {} closed ({:.1}%) | {:.2} EUR | {:+.1}pp",
                closer.name,
                closer.calls,
                closer.closed,
                closer.closing_rate,
                closer.revenue,
                closer.trend
            );
        }
    }

    println!("\nConversion funnel");
    for stage in &view.funnel {
        println!(
            "- {}: {} ({:.1}% of previous stage)",
            stage.label, stage.value, stage.percent_of_previous
        );
    }

    if !view.channels.is_empty() {
        println!("\nChannels");
        for channel in &view.channels {
            println!(
                "- {}: {} leads | {} closed ({:.1}%)",
                channel.label, channel.leads, channel.closed, channel.close_rate
            );
        }
    }

    if !view.weekly_trend.is_empty() {
        println!("\nWeekly trend");
        for point in &view.weekly_trend {
            println!(
                "- Week {}: {} leads | {} closed",
                point.week, point.leads, point.closed
            );
        }
    }
}

fn sample_leads(window: PeriodWindow) -> Vec<RawLead> {
    let day = |day: u32| NaiveDate::from_ymd_opt(window.year, window.month, day);
    let lead = |name: &str, setter: &str, closer: &str, channel: &str, day_of_month: u32| RawLead {
        person_name: name.to_string(),
        setter_name: Some(setter.to_string()),
        closer_name: Some(closer.to_string()),
        channel: Some(channel.to_string()),
        scheduled_date: day(day_of_month),
        ..RawLead::default()
    };

    let mut closed_sale = lead("Ana García", "Thais", "Sergi", "Instagram", 3);
    closed_sale.status_text = Some("Cerrado".to_string());
    closed_sale.payment_text = Some("1000x4".to_string());

    // The same client recorded twice; the engine counts her once.
    let mut duplicate = lead("ana garcia", "Thais", "Sergi", "Instagram", 10);
    duplicate.status_text = Some("Cerrado".to_string());
    duplicate.payment_text = Some("4000".to_string());

    let mut trial = lead("Luis Romero", "Diana", "Yassine", "Referido", 8);
    trial.status_text = Some("Mes de prueba".to_string());
    trial.payment_text = Some("250".to_string());

    let mut unqualified = lead("Marta Vidal", "Diana", "Raquel", "Web", 12);
    unqualified.status_text = Some("No cualifica".to_string());

    let mut refund = lead("Jorge Pina", "Elena", "Elena", "YouTube", 15);
    refund.status_text = Some("Cerrado".to_string());
    refund.payment_text = Some("600 pide devolución".to_string());

    let mut no_show = lead("Clara Soto", "Thais", "Sergi", "Podcast", 20);
    no_show.status_text = Some("No presentado".to_string());

    vec![closed_sale, duplicate, trial, unqualified, refund, no_show]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_dataset_exercises_every_report_section() {
        let window = PeriodWindow::new(3, 2026).expect("valid window");
        let view = build_report(
            &sample_leads(window),
            window,
            &ReportScope::default(),
            &SalesRoster::standard(),
            &StatusVocabulary::standard(),
        );

        assert_eq!(view.global.total, 6);
        assert!(view.global.refunded >= 1);
        assert!(!view.setters.is_empty());
        assert!(!view.closers.is_empty());
        assert!(!view.channels.is_empty());
        assert!(!view.weekly_trend.is_empty());
    }
}
