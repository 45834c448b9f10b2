// ============================================================================
// BOARD VIEWMODEL - Columnas del kanban personal
// ============================================================================

use crate::models::{Demanda, DemandaStatus};

/// Sub-lista de una columna (A Fazer tiene dos: A Fazer / Fixos)
#[derive(Clone, PartialEq, Debug)]
pub struct BoardLane {
    pub status: DemandaStatus,
    pub cards: Vec<Demanda>,
}

impl BoardLane {
    pub fn empty_message(&self) -> &'static str {
        match self.status {
            DemandaStatus::Fixo => "Nenhuma demanda fixa.",
            _ => "Nenhuma demanda aqui.",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct BoardColumn {
    pub status: DemandaStatus,
    pub lanes: Vec<BoardLane>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    /// El contador de A Fazer incluye los Fixos
    pub fn count(&self) -> usize {
        self.lanes.iter().map(|l| l.cards.len()).sum()
    }
}

fn lane(status: DemandaStatus, demandas: &[Demanda]) -> BoardLane {
    BoardLane {
        status,
        cards: demandas.iter().filter(|d| d.status == status).cloned().collect(),
    }
}

/// Proyectar la lista en columnas por estado
pub fn build_board(demandas: &[Demanda]) -> Vec<BoardColumn> {
    DemandaStatus::ALL
        .iter()
        .filter(|s| **s != DemandaStatus::Fixo)
        .map(|status| {
            let lanes = if *status == DemandaStatus::AFazer {
                vec![lane(DemandaStatus::AFazer, demandas), lane(DemandaStatus::Fixo, demandas)]
            } else {
                vec![lane(*status, demandas)]
            };
            BoardColumn { status: *status, lanes }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::aggregation::fixtures::demanda;

    #[test]
    fn test_columns_in_status_order_with_fixed_lane() {
        let demandas = vec![
            demanda("1", DemandaStatus::AFazer, None),
            demanda("2", DemandaStatus::Fixo, None),
            demanda("3", DemandaStatus::Fixo, None),
            demanda("4", DemandaStatus::Aprovado, None),
        ];
        let board = build_board(&demandas);
        let statuses: Vec<_> = board.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                DemandaStatus::AFazer,
                DemandaStatus::EmAndamento,
                DemandaStatus::ParaAprovacao,
                DemandaStatus::EmRevisao,
                DemandaStatus::Aprovado,
            ]
        );
        assert_eq!(board[0].count(), 3);
        assert_eq!(board[0].lanes[1].cards.len(), 2);
        assert_eq!(board[1].count(), 0);
        assert_eq!(board[1].lanes[0].empty_message(), "Nenhuma demanda aqui.");
        assert_eq!(board[4].count(), 1);
    }

    #[test]
    fn test_every_card_lands_in_exactly_one_lane() {
        let demandas: Vec<_> = DemandaStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| demanda(&i.to_string(), *s, None))
            .collect();
        let board = build_board(&demandas);
        let total: usize = board.iter().map(|c| c.count()).sum();
        assert_eq!(total, demandas.len());
        let fixos = &board[0].lanes[1];
        assert_eq!(fixos.status, DemandaStatus::Fixo);
        assert_eq!(fixos.empty_message(), "Nenhuma demanda fixa.");
    }
}
