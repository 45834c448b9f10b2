// ============================================================================
// BI VIEWMODEL - KPIs, gráfico de estados, gráfico por usuario y tabla
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use crate::models::{Demanda, DemandaStatus};

pub const EMPTY_GRADIENT: &str = "conic-gradient(#2d2d44 0% 100%)";
pub const BAR_COLORS: [&str; 6] = ["#0984e3", "#00b894", "#6c5ce7", "#e17055", "#fdcb6e", "#00cec9"];
pub const BAR_MAX_HEIGHT_PX: f64 = 180.0;
pub const UNASSIGNED_KEY: &str = "unassigned";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BiKpis {
    pub abertas: usize,
    pub concluidas_30d: usize,
    pub em_andamento: usize,
    pub atrasadas: usize,
}

impl BiKpis {
    pub fn compute(demandas: &[Demanda], now: DateTime<Utc>) -> Self {
        let thirty_days_ago = now - Duration::days(30);
        let mut kpis = Self::default();
        for d in demandas {
            if d.status != DemandaStatus::Aprovado {
                kpis.abertas += 1;
                if d.is_overdue(now) {
                    kpis.atrasadas += 1;
                }
            } else if d.updated_at.map(|u| u >= thirty_days_ago).unwrap_or(false) {
                kpis.concluidas_30d += 1;
            }
            if d.status == DemandaStatus::EmAndamento {
                kpis.em_andamento += 1;
            }
        }
        kpis
    }
}

pub fn status_color(status: DemandaStatus) -> &'static str {
    match status {
        DemandaStatus::AFazer => "#0984e3",
        DemandaStatus::Fixo => "#6c6c7c",
        DemandaStatus::EmAndamento => "#00b894",
        DemandaStatus::ParaAprovacao => "#e17055",
        DemandaStatus::EmRevisao => "#6c5ce7",
        DemandaStatus::Aprovado => "#00cec9",
    }
}

/// En el gráfico APROVADO se muestra como "Concluído"
pub fn chart_label(status: DemandaStatus) -> &'static str {
    match status {
        DemandaStatus::Aprovado => "Concluído",
        other => other.label(),
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StatusSlice {
    pub status: DemandaStatus,
    pub count: usize,
}

/// Distribución por estado (solo estados con demandas, en orden fijo)
pub fn status_distribution(demandas: &[Demanda]) -> Vec<StatusSlice> {
    DemandaStatus::ALL
        .iter()
        .map(|status| StatusSlice {
            status: *status,
            count: demandas.iter().filter(|d| d.status == *status).count(),
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

/// `conic-gradient(...)` del donut
pub fn conic_gradient(slices: &[StatusSlice]) -> String {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return EMPTY_GRADIENT.to_string();
    }
    let mut current = 0.0_f64;
    let parts: Vec<String> = slices
        .iter()
        .map(|slice| {
            let end = current + (slice.count as f64 / total as f64) * 100.0;
            let part = format!("{} {}% {}%", status_color(slice.status), current, end);
            current = end;
            part
        })
        .collect();
    format!("conic-gradient({})", parts.join(", "))
}

#[derive(Clone, PartialEq, Debug)]
pub struct UserBar {
    pub nome: String,
    pub total: usize,
    pub concluidas: usize,
    pub height_px: f64,
    pub color: &'static str,
}

impl UserBar {
    pub fn first_name(&self) -> &str {
        self.nome.split(' ').next().unwrap_or(&self.nome)
    }
}

/// Barras por nombre del asignado, en orden de aparición
pub fn users_chart(demandas: &[Demanda]) -> Vec<UserBar> {
    let mut counts: Vec<(String, usize, usize)> = Vec::new();
    for d in demandas {
        let nome = match d.atribuido.as_ref().and_then(|p| p.nome.clone()) {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };
        let done = usize::from(d.status == DemandaStatus::Aprovado);
        match counts.iter_mut().find(|(n, _, _)| *n == nome) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += done;
            }
            None => counts.push((nome, 1, done)),
        }
    }

    let max = counts.iter().map(|(_, t, _)| *t).max().unwrap_or(1).max(1) as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(index, (nome, total, concluidas))| UserBar {
            nome,
            total,
            concluidas,
            height_px: total as f64 / max * BAR_MAX_HEIGHT_PX,
            color: BAR_COLORS[index % BAR_COLORS.len()],
        })
        .collect()
}

/// Fila de la tabla BI
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BiRow {
    pub key: String,
    pub nome: String,
    pub a_fazer: usize,
    pub em_andamento: usize,
    pub para_aprovacao: usize,
    pub concluidas: usize,
    pub total: usize,
}

/// Conteos por asignado (id o "unassigned"), filtrados por el usuario elegido
pub fn bi_table(demandas: &[Demanda], filter_user: Option<&str>) -> Vec<BiRow> {
    let mut rows: Vec<BiRow> = Vec::new();
    for d in demandas {
        let key = d.atribuido_para.clone().unwrap_or_else(|| UNASSIGNED_KEY.to_string());
        let index = match rows.iter().position(|r| r.key == key) {
            Some(i) => i,
            None => {
                rows.push(BiRow {
                    key,
                    nome: d.atribuido_nome(),
                    a_fazer: 0,
                    em_andamento: 0,
                    para_aprovacao: 0,
                    concluidas: 0,
                    total: 0,
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[index];
        row.total += 1;
        match d.status {
            DemandaStatus::AFazer | DemandaStatus::Fixo => row.a_fazer += 1,
            DemandaStatus::EmAndamento => row.em_andamento += 1,
            DemandaStatus::ParaAprovacao | DemandaStatus::EmRevisao => row.para_aprovacao += 1,
            DemandaStatus::Aprovado => row.concluidas += 1,
        }
    }

    match filter_user {
        Some(id) => rows.into_iter().filter(|r| r.key == id).collect(),
        None => rows,
    }
}

/// Filtro de usuario aplicado del lado del cliente
pub fn filter_by_assignee(demandas: &[Demanda], user: Option<&str>) -> Vec<Demanda> {
    match user {
        Some(id) => demandas
            .iter()
            .filter(|d| d.atribuido_para.as_deref() == Some(id))
            .cloned()
            .collect(),
        None => demandas.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cargo;
    use crate::viewmodels::aggregation::fixtures::*;

    #[test]
    fn test_kpis() {
        let now = at(2024, 6, 30, 12);
        let ana = profile("ana", "Ana Lima", Cargo::Design);

        let mut overdue = demanda("1", DemandaStatus::AFazer, Some(&ana));
        overdue.data_previsao = Some(at(2024, 6, 29, 12));
        let mut future = demanda("2", DemandaStatus::EmAndamento, Some(&ana));
        future.data_previsao = Some(at(2024, 7, 2, 12));
        let mut recent_done = demanda("3", DemandaStatus::Aprovado, Some(&ana));
        recent_done.updated_at = Some(at(2024, 6, 20, 12));
        recent_done.data_previsao = Some(at(2024, 6, 1, 12));
        let mut old_done = demanda("4", DemandaStatus::Aprovado, None);
        old_done.updated_at = Some(at(2024, 4, 1, 12));

        let kpis = BiKpis::compute(&[overdue, future, recent_done, old_done], now);
        assert_eq!(kpis, BiKpis { abertas: 2, concluidas_30d: 1, em_andamento: 1, atrasadas: 1 });
    }

    #[test]
    fn test_gradient_follows_status_order() {
        let demandas = vec![
            demanda("1", DemandaStatus::Aprovado, None),
            demanda("2", DemandaStatus::AFazer, None),
            demanda("3", DemandaStatus::AFazer, None),
            demanda("4", DemandaStatus::EmAndamento, None),
        ];
        let slices = status_distribution(&demandas);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].status, DemandaStatus::AFazer);
        assert_eq!(
            conic_gradient(&slices),
            "conic-gradient(#0984e3 0% 50%, #00b894 50% 75%, #00cec9 75% 100%)"
        );
        assert_eq!(conic_gradient(&[]), EMPTY_GRADIENT);
        assert_eq!(chart_label(DemandaStatus::Aprovado), "Concluído");
    }

    #[test]
    fn test_users_chart_heights_and_colors() {
        let ana = profile("ana", "Ana Lima", Cargo::Design);
        let bia = profile("bia", "Bia Souza", Cargo::Colaborador);
        let demandas = vec![
            demanda("1", DemandaStatus::Aprovado, Some(&ana)),
            demanda("2", DemandaStatus::AFazer, Some(&ana)),
            demanda("3", DemandaStatus::AFazer, Some(&ana)),
            demanda("4", DemandaStatus::AFazer, Some(&ana)),
            demanda("5", DemandaStatus::Aprovado, Some(&bia)),
            demanda("6", DemandaStatus::AFazer, None),
        ];
        let bars = users_chart(&demandas);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].first_name(), "Ana");
        assert_eq!(bars[0].height_px, 180.0);
        assert_eq!(bars[0].concluidas, 1);
        assert_eq!(bars[1].height_px, 45.0);
        assert_eq!(bars[1].color, "#00b894");
        assert!(users_chart(&[]).is_empty());
    }

    #[test]
    fn test_bi_table_buckets() {
        let ana = profile("ana", "Ana Lima", Cargo::Design);
        let demandas = vec![
            demanda("1", DemandaStatus::Fixo, Some(&ana)),
            demanda("2", DemandaStatus::EmRevisao, Some(&ana)),
            demanda("3", DemandaStatus::ParaAprovacao, Some(&ana)),
            demanda("4", DemandaStatus::Aprovado, None),
        ];
        let rows = bi_table(&demandas, None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nome, "Ana Lima");
        assert_eq!((rows[0].a_fazer, rows[0].para_aprovacao, rows[0].total), (1, 2, 3));
        assert_eq!(rows[1].key, UNASSIGNED_KEY);
        assert_eq!(rows[1].nome, "Não atribuído");

        let filtered = bi_table(&demandas, Some("ana"));
        assert_eq!(filtered.len(), 1);
        assert!(bi_table(&demandas, Some("ghost")).is_empty());
        assert_eq!(filter_by_assignee(&demandas, Some("ana")).len(), 3);
    }
}
