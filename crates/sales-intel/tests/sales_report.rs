use chrono::NaiveDate;
use sales_intel::reporting::import::LeadCsvImporter;
use sales_intel::reporting::sales::domain::{PeriodWindow, RawLead};
use sales_intel::reporting::sales::views::FunnelStageKind;
use sales_intel::reporting::sales::{
    build_report, ReportScope, SalesRoster, StatusVocabulary,
};

fn window() -> PeriodWindow {
    PeriodWindow::new(3, 2026).expect("valid window")
}

fn report(leads: &[RawLead]) -> sales_intel::reporting::sales::views::SalesReportView {
    build_report(
        leads,
        window(),
        &ReportScope::default(),
        &SalesRoster::standard(),
        &StatusVocabulary::standard(),
    )
}

fn closed_lead(name: &str, day: u32, payment: &str) -> RawLead {
    RawLead {
        person_name: name.into(),
        setter_name: Some("Thais".into()),
        closer_name: Some("Sergi".into()),
        scheduled_date: NaiveDate::from_ymd_opt(2026, 3, day),
        status_text: Some("Cerrado".into()),
        presented_flag: true,
        payment_text: Some(payment.into()),
        ..RawLead::default()
    }
}

#[test]
fn duplicate_entries_of_one_client_close_once_and_bill_once() {
    let leads = vec![
        closed_lead("Ana Pérez", 3, "1000"),
        closed_lead("ana perez", 12, "1000"),
    ];

    let view = report(&leads);

    let sergi = view
        .closers
        .iter()
        .find(|closer| closer.name == "Sergi")
        .expect("closer on leaderboard");
    assert_eq!(sergi.closed, 1);

    let thais = view
        .setters
        .iter()
        .find(|setter| setter.name == "Thais")
        .expect("setter on leaderboard");
    assert_eq!(thais.agendas, 2);

    // The duplicate row repeats the same sale; it must not double the
    // revenue either.
    assert_eq!(sergi.revenue, 1000.0);
    assert_eq!(view.global.revenue, 1000.0);
    assert_eq!(view.global.gross_closed, 1);
}

#[test]
fn no_cualifica_counts_as_presented_but_not_closed() {
    let lead = RawLead {
        person_name: "Marta Ruiz".into(),
        setter_name: Some("Diana".into()),
        scheduled_date: NaiveDate::from_ymd_opt(2026, 3, 9),
        status_text: Some("No cualifica".into()),
        ..RawLead::default()
    };

    let view = report(&[lead]);
    assert_eq!(view.global.presented, 1);
    assert_eq!(view.global.gross_closed, 0);

    let diana = &view.setters[0];
    assert_eq!(diana.presented, 1);
    assert_eq!(diana.closed, 0);
}

#[test]
fn off_roster_names_stay_out_of_leaderboards_but_not_totals() {
    let lead = RawLead {
        person_name: "Luis Gómez".into(),
        setter_name: Some("Paco".into()),
        closer_name: Some("Paco".into()),
        scheduled_date: NaiveDate::from_ymd_opt(2026, 3, 9),
        status_text: Some("Cerrado".into()),
        ..RawLead::default()
    };

    let view = report(&[lead]);
    assert_eq!(view.global.total, 1);
    assert!(view.setters.is_empty());
    assert!(view.closers.is_empty());
    // An unattributed close never reaches the closing stages.
    assert_eq!(view.global.gross_closed, 0);
}

#[test]
fn funnel_net_is_gross_minus_unique_refunds_floored_at_zero() {
    let mut refunded = closed_lead("Ana Pérez", 3, "1500€ pide devolución");
    refunded.status_text = Some("Cerrado".into());
    let sold = closed_lead("Luis Gómez", 5, "2000");

    let view = report(&[refunded, sold]);

    let stage = |kind: FunnelStageKind| {
        view.funnel
            .iter()
            .find(|stage| stage.stage == kind)
            .expect("stage present")
            .value
    };

    assert_eq!(stage(FunnelStageKind::Captured), 2);
    assert_eq!(stage(FunnelStageKind::GrossClosed), 2);
    assert_eq!(stage(FunnelStageKind::NetClosed), 1);
    assert!(stage(FunnelStageKind::NetClosed) <= stage(FunnelStageKind::GrossClosed));

    // +1500 and -1500 for the refunded client, +2000 for the sale.
    assert_eq!(view.global.revenue, 2000.0);
}

#[test]
fn trend_baselines_never_divide_by_zero() {
    // No February rows at all: both trends must read 0, not infinity.
    let view = report(&[closed_lead("Ana Pérez", 3, "1000")]);
    assert_eq!(view.global.leads_trend, 0.0);
    assert_eq!(view.global.revenue_trend, 0.0);
}

#[test]
fn month_over_month_trend_uses_the_preceding_window() {
    let mut february = closed_lead("Luis Gómez", 1, "1000");
    february.scheduled_date = NaiveDate::from_ymd_opt(2026, 2, 10);

    let march_a = closed_lead("Ana Pérez", 3, "1500");
    let march_b = closed_lead("Marta Ruiz", 8, "500");

    let view = report(&[february, march_a, march_b]);
    assert_eq!(view.global.total, 2);
    assert_eq!(view.global.leads_trend, 100.0);
    assert_eq!(view.global.revenue_trend, 100.0);
}

#[test]
fn csv_export_flows_through_to_a_report() {
    let csv = "nombre_lead,setter,closer,procedencia,inb_out,dia_agenda,dia_llamada,estado_lead,presentado,cierre,pago,telefono,perfil_ig,project\n\
Ana Pérez,Thais,Sergi,Instagram,Inbound,2026-03-05,2026-03-07,Cerrado,true,true,1000,,@ana,ME\n\
ana perez,Thaïs,Sergi,Instagram,Inbound,2026-03-12,,Cerrado,true,true,1000,,@ana,ME\n\
Luis Gómez,Diana,Yassine,Podcast,Outbound,2026-03-09,,No cualifica,true,false,,,,ME\n";

    let leads = LeadCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");
    let view = report(&leads);

    assert_eq!(view.global.total, 3);
    assert_eq!(view.global.presented, 3);
    assert_eq!(view.global.gross_closed, 1, "duplicate client closes once");

    let sergi = view
        .closers
        .iter()
        .find(|closer| closer.name == "Sergi")
        .expect("closer present");
    assert_eq!(sergi.closed, 1);

    let thais = view
        .setters
        .iter()
        .find(|setter| setter.name == "Thais")
        .expect("accented setter spelling folds into one row");
    assert_eq!(thais.agendas, 2);
}
