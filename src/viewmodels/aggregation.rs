// ============================================================================
// AGGREGATION VIEWMODEL - Agrupaciones de las vistas secundarias
// ============================================================================
// Cada vista trae su propio slice filtrado del servidor y lo re-agrupa
// completo en cada cambio de filtro.
// ============================================================================

use std::collections::BTreeMap;
use chrono::{Datelike, NaiveDate, TimeZone};
use crate::models::{Demanda, DemandaStatus, Profile};

pub const DIAS_SEMANA: [&str; 7] = ["Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"];

/// Columna del tablero "Por Usuário"
#[derive(Clone, PartialEq, Debug)]
pub struct UserColumn {
    pub profile: Profile,
    pub demandas: Vec<Demanda>,
}

/// Una columna por usuario (sin solicitantes). Con filtro de persona solo queda esa columna.
pub fn group_by_assignee(users: &[Profile], demandas: &[Demanda], person: Option<&str>) -> Vec<UserColumn> {
    users
        .iter()
        .filter(|u| !u.is_requester_only())
        .filter(|u| person.map(|p| p == u.id).unwrap_or(true))
        .map(|user| UserColumn {
            profile: user.clone(),
            demandas: demandas
                .iter()
                .filter(|d| d.atribuido_para.as_deref() == Some(user.id.as_str()))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Columna del cronograma
#[derive(Clone, PartialEq, Debug)]
pub struct DayGroup {
    pub day: u32,
    pub weekday: &'static str,
    pub demandas: Vec<Demanda>,
}

impl DayGroup {
    pub fn header(&self) -> String {
        format!("Dia {}", self.day)
    }
}

/// Agrupar por día del mes (local) de `updated_at`, días en orden descendente
pub fn group_by_day<Tz: TimeZone>(demandas: &[Demanda], year: i32, month: u32, tz: &Tz) -> Vec<DayGroup> {
    let mut by_day: BTreeMap<u32, Vec<Demanda>> = BTreeMap::new();
    for demanda in demandas {
        let stamp = demanda.updated_at.unwrap_or(demanda.created_at);
        let day = stamp.with_timezone(tz).day();
        by_day.entry(day).or_default().push(demanda.clone());
    }

    by_day
        .into_iter()
        .rev()
        .map(|(day, demandas)| DayGroup {
            day,
            weekday: weekday_name(year, month, day),
            demandas,
        })
        .collect()
}

pub fn weekday_name(year: i32, month: u32, day: u32) -> &'static str {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| DIAS_SEMANA[d.weekday().num_days_from_sunday() as usize])
        .unwrap_or("")
}

/// Contadores del panel personal y de los reportes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StatusTally {
    pub total: usize,
    pub a_fazer: usize,
    pub em_andamento: usize,
    pub concluidas: usize,
}

impl StatusTally {
    pub fn of(demandas: &[Demanda]) -> Self {
        demandas.iter().fold(Self::default(), |mut t, d| {
            t.total += 1;
            match d.status {
                DemandaStatus::AFazer | DemandaStatus::Fixo => t.a_fazer += 1,
                DemandaStatus::EmAndamento => t.em_andamento += 1,
                DemandaStatus::Aprovado => t.concluidas += 1,
                _ => {}
            }
            t
        })
    }
}

/// Las N más recientes (el slice ya viene ordenado)
pub fn recent(demandas: &[Demanda], limit: usize) -> &[Demanda] {
    &demandas[..demandas.len().min(limit)]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use crate::models::{Cargo, Demanda, DemandaStatus, Profile};

    pub fn profile(id: &str, nome: &str, cargo: Cargo) -> Profile {
        Profile {
            id: id.to_string(),
            nome: Some(nome.to_string()),
            email: Some(format!("{}@msa.com", id)),
            cargo: Some(cargo),
        }
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn demanda(id: &str, status: DemandaStatus, assignee: Option<&Profile>) -> Demanda {
        Demanda {
            id: id.to_string(),
            titulo: format!("Demanda {}", id),
            descricao: None,
            criado_por: Some("creator".to_string()),
            atribuido_para: assignee.map(|p| p.id.clone()),
            status,
            horas_estimadas: None,
            data_previsao: None,
            arquivo_url: None,
            created_at: at(2024, 5, 1, 12),
            updated_at: Some(at(2024, 5, 1, 12)),
            criador: None,
            atribuido: assignee.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::*;
    use chrono::{FixedOffset, Utc};
    use crate::models::Cargo;

    #[test]
    fn test_group_by_assignee_skips_requesters() {
        let ana = profile("ana", "Ana", Cargo::Design);
        let sol = profile("sol", "Solange", Cargo::Solicitante);
        let bia = profile("bia", "Bia", Cargo::Gerente);
        let demandas = vec![
            demanda("1", DemandaStatus::EmAndamento, Some(&ana)),
            demanda("2", DemandaStatus::EmAndamento, Some(&ana)),
            demanda("3", DemandaStatus::EmAndamento, None),
        ];
        let columns = group_by_assignee(&[ana.clone(), sol, bia.clone()], &demandas, None);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].profile.id, "ana");
        assert_eq!(columns[0].demandas.len(), 2);
        assert!(columns[1].demandas.is_empty());

        let only_bia = group_by_assignee(&[ana, bia], &demandas, Some("bia"));
        assert_eq!(only_bia.len(), 1);
        assert_eq!(only_bia[0].profile.id, "bia");
    }

    #[test]
    fn test_group_by_day_descending_with_weekday() {
        let mut a = demanda("a", DemandaStatus::Aprovado, None);
        a.updated_at = Some(at(2024, 5, 3, 15));
        let mut b = demanda("b", DemandaStatus::Aprovado, None);
        b.updated_at = Some(at(2024, 5, 17, 10));
        let mut c = demanda("c", DemandaStatus::EmAndamento, None);
        c.updated_at = Some(at(2024, 5, 3, 18));

        let groups = group_by_day(&[a, b, c], 2024, 5, &Utc);
        assert_eq!(groups.iter().map(|g| g.day).collect::<Vec<_>>(), vec![17, 3]);
        assert_eq!(groups[0].weekday, "Sexta");
        assert_eq!(groups[1].weekday, "Sexta");
        assert_eq!(groups[1].demandas.len(), 2);
        assert_eq!(groups[0].header(), "Dia 17");
    }

    #[test]
    fn test_group_by_day_uses_local_day() {
        let mut a = demanda("a", DemandaStatus::Aprovado, None);
        a.updated_at = Some(at(2024, 5, 4, 1));
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let groups = group_by_day(&[a], 2024, 5, &brt);
        assert_eq!(groups[0].day, 3);
    }

    #[test]
    fn test_status_tally() {
        let demandas = vec![
            demanda("1", DemandaStatus::AFazer, None),
            demanda("2", DemandaStatus::Fixo, None),
            demanda("3", DemandaStatus::EmAndamento, None),
            demanda("4", DemandaStatus::ParaAprovacao, None),
            demanda("5", DemandaStatus::Aprovado, None),
        ];
        let tally = StatusTally::of(&demandas);
        assert_eq!(tally, StatusTally { total: 5, a_fazer: 2, em_andamento: 1, concluidas: 1 });
        assert_eq!(recent(&demandas, 3).len(), 3);
        assert_eq!(recent(&demandas, 10).len(), 5);
    }
}
