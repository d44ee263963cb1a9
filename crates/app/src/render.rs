//! Output formats for a [`ReportView`].

use std::error::Error;
use std::fmt::{self, Write as _};

use api_types::balance::{ReportView, Severity};
use clap::ValueEnum;
use engine::MoneyCents;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
}

pub fn render(view: &ReportView, format: Format) -> Result<String, Box<dyn Error + Send + Sync>> {
    match format {
        Format::Table => Ok(table(view)?),
        Format::Json => Ok(serde_json::to_string_pretty(view)?),
        Format::Csv => csv(view),
    }
}

fn amount(minor: i64) -> String {
    MoneyCents::new(minor).to_string()
}

fn table(view: &ReportView) -> Result<String, fmt::Error> {
    let width = view
        .balances
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Participant".len());

    let mut out = String::new();
    writeln!(
        out,
        "{:<width$}  {:>12}  {:>12}  {:>12}",
        "Participant",
        "Paid",
        "Owed",
        format!("Net {}", view.currency),
    )?;
    for balance in &view.balances {
        writeln!(
            out,
            "{:<width$}  {:>12}  {:>12}  {:>12}",
            balance.name,
            amount(balance.total_paid_minor),
            amount(balance.total_owed_minor),
            amount(balance.net_balance_minor),
        )?;
        for debt in &balance.owes_to_others {
            let creditor = debt
                .name
                .clone()
                .unwrap_or_else(|| debt.participant_id.to_string());
            writeln!(out, "  owes {} to {creditor}", amount(debt.amount_minor))?;
        }
    }

    if !view.diagnostics.is_empty() {
        writeln!(out)?;
        for diagnostic in &view.diagnostics {
            let label = match diagnostic.severity {
                Severity::Rejected => "rejected",
                Severity::Warning => "warning",
            };
            writeln!(out, "{label}: {}", diagnostic.message)?;
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    participant_id: String,
    name: &'a str,
    total_paid: String,
    total_owed: String,
    net_balance: String,
    currency: &'a str,
}

fn csv(view: &ReportView) -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for balance in &view.balances {
        writer.serialize(CsvRow {
            participant_id: balance.participant_id.to_string(),
            name: &balance.name,
            total_paid: amount(balance.total_paid_minor),
            total_owed: amount(balance.total_owed_minor),
            net_balance: amount(balance.net_balance_minor),
            currency: &view.currency,
        })?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use api_types::balance::{BalanceView, DebtView, DiagnosticView};
    use uuid::Uuid;

    use super::*;

    fn view() -> ReportView {
        let ada = Uuid::from_u128(1);
        let bo = Uuid::from_u128(2);
        ReportView {
            currency: "EUR".to_string(),
            balances: vec![
                BalanceView {
                    participant_id: ada,
                    name: "Ada".to_string(),
                    total_paid_minor: 10_000,
                    total_owed_minor: 5_000,
                    net_balance_minor: 5_000,
                    owes_to_others: vec![],
                    owed_by_others: vec![DebtView {
                        participant_id: bo,
                        name: Some("Bo".to_string()),
                        amount_minor: 3_000,
                    }],
                },
                BalanceView {
                    participant_id: bo,
                    name: "Bo".to_string(),
                    total_paid_minor: 0,
                    total_owed_minor: 5_000,
                    net_balance_minor: -5_000,
                    owes_to_others: vec![DebtView {
                        participant_id: ada,
                        name: Some("Ada".to_string()),
                        amount_minor: 3_000,
                    }],
                    owed_by_others: vec![],
                },
            ],
            diagnostics: vec![DiagnosticView {
                severity: Severity::Warning,
                record_kind: None,
                record_id: None,
                message: "something odd".to_string(),
            }],
        }
    }

    #[test]
    fn table_lists_debts_and_diagnostics() {
        let out = render(&view(), Format::Table).unwrap();
        assert!(out.lines().next().unwrap().starts_with("Participant"));
        assert!(out.contains("-50.00"));
        assert!(out.contains("  owes 30.00 to Ada"));
        assert!(out.contains("warning: something odd"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_participant() {
        let out = render(&view(), Format::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "participant_id,name,total_paid,total_owed,net_balance,currency"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with(",Bo,0.00,50.00,-50.00,EUR"));
    }

    #[test]
    fn json_round_trips() {
        let out = render(&view(), Format::Json).unwrap();
        let parsed: ReportView = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, view());
    }
}
