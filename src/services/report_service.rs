// ============================================================================
// REPORT SERVICE - HTML imprimible (Entregas / Demandas)
// ============================================================================
// Solo genera el documento. Abrirlo e imprimirlo es cosa de `dom::dialogs`.
// ============================================================================

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::models::{Demanda, DemandaStatus};
use crate::utils::constants::{APP_NAME, MESES};
use crate::utils::format::escape_html;
use crate::viewmodels::aggregation::{weekday_name, StatusTally};

const ACCENT_ENTREGAS: &str = "#9b59b6";
const ACCENT_DEMANDAS: &str = "#e67e22";
const DESCRIPTION_PREVIEW_CHARS: usize = 80;

/// Documento listo para una ventana nueva
#[derive(Clone, Debug, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub style: String,
    pub body: String,
}

impl ReportDocument {
    /// Contenido de `<html>` (head + body)
    pub fn inner_html(&self) -> String {
        format!(
            "<head><meta charset=\"UTF-8\"><title>{}</title><style>{}</style></head><body>{}</body>",
            escape_html(&self.title),
            self.style,
            self.body
        )
    }
}

/// "15 de maio de 2024"
pub fn long_date(day: NaiveDate) -> String {
    let mes = MESES[day.month0() as usize].to_lowercase();
    format!("{:02} de {} de {}", day.day(), mes, day.year())
}

/// "quarta-feira, 15 de maio de 2024"
pub fn long_date_with_weekday(day: NaiveDate) -> String {
    let weekday = weekday_name(day.year(), day.month(), day.day()).to_lowercase();
    let weekday = match weekday.as_str() {
        "domingo" | "sábado" => weekday,
        other => format!("{}-feira", other),
    };
    format!("{}, {} de {} de {}", weekday, day.day(), MESES[day.month0() as usize].to_lowercase(), day.year())
}

fn short_datetime<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%d/%m, %H:%M").to_string()
}

fn preview(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn style(accent: &str) -> String {
    format!(
        "* {{ margin: 0; padding: 0; box-sizing: border-box; }}\
         body {{ font-family: 'Segoe UI', Arial, sans-serif; padding: 40px; color: #333; background: white; }}\
         .header {{ text-align: center; margin-bottom: 30px; padding-bottom: 20px; border-bottom: 2px solid {accent}; }}\
         .header h1 {{ color: {accent}; font-size: 24px; margin-bottom: 5px; }}\
         .header .subtitle {{ color: #666; font-size: 14px; }}\
         .header .date {{ font-size: 16px; color: #555; margin-top: 10px; }}\
         .header .user-info {{ font-size: 14px; color: #777; margin-top: 5px; }}\
         .stats {{ display: flex; justify-content: space-around; margin-bottom: 30px; flex-wrap: wrap; }}\
         .stat-box {{ text-align: center; padding: 15px 25px; border-radius: 8px; background: #f5f5f5; min-width: 100px; }}\
         .stat-box .number {{ font-size: 28px; font-weight: bold; color: {accent}; }}\
         .stat-box .label {{ font-size: 12px; color: #666; text-transform: uppercase; }}\
         table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}\
         th, td {{ padding: 10px 8px; text-align: left; border-bottom: 1px solid #ddd; font-size: 11px; }}\
         th {{ background: {accent}; color: white; font-weight: 600; font-size: 10px; text-transform: uppercase; }}\
         tr:nth-child(even) {{ background: #fafafa; }}\
         .status {{ padding: 3px 8px; border-radius: 12px; font-size: 10px; font-weight: 600; display: inline-block; color: white; background: #7f8c8d; }}\
         .status-em-andamento {{ background: #f39c12; }}\
         .status-para-aprovacao {{ background: #1abc9c; }}\
         .status-em-revisao {{ background: #e74c3c; }}\
         .status-aprovado {{ background: #27ae60; }}\
         .description {{ max-width: 350px; white-space: pre-wrap; word-wrap: break-word; font-size: 10px; color: #666; line-height: 1.4; }}\
         .footer {{ margin-top: 40px; text-align: center; font-size: 11px; color: #999; padding-top: 20px; border-top: 1px solid #eee; }}\
         @media print {{ body {{ padding: 20px; }} }}"
    )
}

fn header(icon_title: &str, subtitle: &str, date: &str, colaborador: &str) -> String {
    format!(
        "<div class=\"header\"><h1>{}</h1><div class=\"subtitle\">{}</div>\
         <div class=\"date\">{}</div><div class=\"user-info\">Colaborador: {}</div></div>",
        icon_title,
        escape_html(subtitle),
        escape_html(date),
        escape_html(colaborador)
    )
}

fn stats(boxes: &[(usize, &str)]) -> String {
    let inner: String = boxes
        .iter()
        .map(|(n, label)| {
            format!("<div class=\"stat-box\"><div class=\"number\">{}</div><div class=\"label\">{}</div></div>", n, label)
        })
        .collect();
    format!("<div class=\"stats\">{}</div>", inner)
}

fn table(columns: &[&str], rows: &str) -> String {
    let head: String = columns.iter().map(|c| format!("<th>{}</th>", c)).collect();
    format!("<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>", head, rows)
}

fn status_badge(status: DemandaStatus) -> String {
    format!("<span class=\"status status-{}\">{}</span>", status.css_suffix(), status.label())
}

fn footer<Tz: TimeZone>(generated_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = generated_at.with_timezone(tz);
    format!(
        "<div class=\"footer\"><p>Gerado automaticamente pelo Sistema {} em {}</p><p>© {} GRUPO MSA</p></div>",
        APP_NAME,
        local.format("%d/%m/%Y, %H:%M"),
        local.year()
    )
}

/// Reporte del cronograma ("Relatório de Entregas")
pub fn entregas_report<Tz: TimeZone>(
    demandas: &[Demanda],
    start: NaiveDate,
    end: NaiveDate,
    colaborador: &str,
    generated_at: DateTime<Utc>,
    tz: &Tz,
) -> ReportDocument
where
    Tz::Offset: std::fmt::Display,
{
    let period = format!("{} a {}", long_date(start), long_date(end));
    let tally = StatusTally::of(demandas);

    let rows: String = demandas
        .iter()
        .map(|d| {
            let updated = d.updated_at.unwrap_or(d.created_at);
            format!(
                "<tr><td><strong>{}</strong></td><td class=\"description\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&d.titulo),
                escape_html(d.descricao.as_deref().unwrap_or("-")),
                status_badge(d.status),
                escape_html(&d.criador_nome()),
                short_datetime(&d.created_at, tz),
                short_datetime(&updated, tz)
            )
        })
        .collect();

    let body = [
        header("📅 Relatório de Entregas", &format!("{} - Cronograma de Entregas", APP_NAME), &period, colaborador),
        stats(&[(tally.total, "Total"), (tally.em_andamento, "Em Andamento"), (tally.concluidas, "Concluídas")]),
        table(&["Título", "Descrição", "Status", "Solicitante", "Criado em", "Atualizado em"], &rows),
        footer(&generated_at, tz),
    ]
    .concat();

    ReportDocument {
        title: format!("Relatório de Entregas - {}", period),
        style: style(ACCENT_ENTREGAS),
        body,
    }
}

/// Reporte diario de "Meu Painel" ("Relatório de Demandas")
pub fn demandas_report<Tz: TimeZone>(
    demandas: &[Demanda],
    day: NaiveDate,
    colaborador: &str,
    generated_at: DateTime<Utc>,
    tz: &Tz,
) -> ReportDocument
where
    Tz::Offset: std::fmt::Display,
{
    let date = long_date_with_weekday(day);
    let tally = StatusTally::of(demandas);

    let rows: String = demandas
        .iter()
        .map(|d| {
            let description = d.descricao.as_deref().map(preview).unwrap_or_else(|| "-".to_string());
            let previsao = d
                .data_previsao
                .map(|p| short_datetime(&p, tz))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "<tr><td><strong>{}</strong></td><td class=\"description\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&d.titulo),
                escape_html(&description),
                status_badge(d.status),
                escape_html(&d.criador_nome()),
                short_datetime(&d.created_at, tz),
                previsao
            )
        })
        .collect();

    let body = [
        header("📋 Relatório de Demandas", &format!("{} - Sistema de Gestão", APP_NAME), &date, colaborador),
        stats(&[
            (tally.total, "Total"),
            (tally.a_fazer, "A Fazer"),
            (tally.em_andamento, "Em Andamento"),
            (tally.concluidas, "Concluídas"),
        ]),
        table(&["Título", "Descrição", "Status", "Solicitante", "Criado em", "Previsão"], &rows),
        footer(&generated_at, tz),
    ]
    .concat();

    ReportDocument {
        title: format!("Relatório de Demandas - {}", date),
        style: style(ACCENT_DEMANDAS),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::aggregation::fixtures::{at, demanda};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_dates() {
        assert_eq!(long_date(day(2024, 5, 1)), "01 de maio de 2024");
        assert_eq!(long_date_with_weekday(day(2024, 5, 15)), "quarta-feira, 15 de maio de 2024");
        assert_eq!(long_date_with_weekday(day(2024, 5, 18)), "sábado, 18 de maio de 2024");
    }

    #[test]
    fn test_entregas_report_counts_and_escapes() {
        let mut first = demanda("1", DemandaStatus::Aprovado, None);
        first.titulo = "<Landing>".into();
        let second = demanda("2", DemandaStatus::EmAndamento, None);
        let doc = entregas_report(&[first, second], day(2024, 5, 1), day(2024, 5, 31), "Ana", at(2024, 6, 1, 9), &Utc);

        assert!(doc.title.starts_with("Relatório de Entregas - 01 de maio de 2024 a 31 de maio de 2024"));
        assert!(doc.body.contains("&lt;Landing&gt;"));
        assert!(!doc.body.contains("<Landing>"));
        assert!(doc.body.contains("<th>Atualizado em</th>"));
        assert!(doc.body.contains("<div class=\"number\">2</div><div class=\"label\">Total</div>"));
        assert!(doc.body.contains("<div class=\"number\">1</div><div class=\"label\">Concluídas</div>"));
        assert!(doc.body.contains("Colaborador: Ana"));
        assert!(doc.body.contains("Gerado automaticamente pelo Sistema MSA Demandas em 01/06/2024, 09:00"));
        assert!(doc.style.contains(ACCENT_ENTREGAS));
    }

    #[test]
    fn test_demandas_report_truncates_descriptions() {
        let mut d = demanda("1", DemandaStatus::Fixo, None);
        d.descricao = Some("x".repeat(100));
        let doc = demandas_report(&[d], day(2024, 5, 15), "Ana", at(2024, 5, 15, 18), &Utc);
        assert!(doc.body.contains(&format!("{}...", "x".repeat(80))));
        assert!(!doc.body.contains(&"x".repeat(81)));
        assert!(doc.body.contains("<div class=\"number\">1</div><div class=\"label\">A Fazer</div>"));
        assert!(doc.body.contains("<th>Previsão</th>"));
        assert!(doc.inner_html().starts_with("<head><meta charset=\"UTF-8\"><title>"));
    }
}
