use chrono::NaiveDate;
use sales_intel::reporting::import::{LeadCsvImporter, LeadImportError};
use sales_intel::reporting::sales::domain::Direction;

const HEADER: &str = "nombre_lead,setter,closer,procedencia,inb_out,dia_agenda,dia_llamada,estado_lead,presentado,cierre,pago,telefono,perfil_ig,project\n";

#[test]
fn importer_maps_spreadsheet_columns_onto_leads() {
    let csv = format!(
        "{HEADER}\
Ana Pérez,Thais,Sergi,Instagram,Inbound,2026-03-05,2026-03-07T10:30:00Z,Cerrado,si,true,1000x4,+34 600 000 000,@anaperez,ME\n"
    );

    let leads = LeadCsvImporter::from_reader(csv.as_bytes()).expect("import succeeds");
    assert_eq!(leads.len(), 1);

    let lead = &leads[0];
    assert_eq!(lead.person_name, "Ana Pérez");
    assert_eq!(lead.setter_name.as_deref(), Some("Thais"));
    assert_eq!(lead.closer_name.as_deref(), Some("Sergi"));
    assert_eq!(lead.channel.as_deref(), Some("Instagram"));
    assert_eq!(lead.direction, Some(Direction::Inbound));
    assert_eq!(
        lead.scheduled_date,
        NaiveDate::from_ymd_opt(2026, 3, 5)
    );
    assert_eq!(lead.call_date, NaiveDate::from_ymd_opt(2026, 3, 7));
    assert_eq!(lead.status_text.as_deref(), Some("Cerrado"));
    assert!(lead.presented_flag);
    assert!(lead.closed_flag);
    assert_eq!(lead.payment_text.as_deref(), Some("1000x4"));
    assert_eq!(lead.project_tag.as_deref(), Some("ME"));
}

#[test]
fn importer_surfaces_malformed_rows_as_csv_errors() {
    let csv = format!("{HEADER}Ana Pérez,Thais\n");

    let error = LeadCsvImporter::from_reader(csv.as_bytes()).expect_err("import fails");
    assert!(matches!(error, LeadImportError::Csv(_)));
}
