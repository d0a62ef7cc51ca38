use super::domain::{Polarity, RespondentRole};
use serde::Serialize;

/// One questionnaire statement. `management_text` replaces `text` for
/// respondents in leadership positions; `reversed` is carried from the
/// source instrument but is not consulted by scoring.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub key: &'static str,
    pub text: &'static str,
    pub management_text: Option<&'static str>,
    pub reversed: bool,
}

impl ItemTemplate {
    pub fn text_for(&self, role: RespondentRole) -> &'static str {
        match role {
            RespondentRole::Management => self.management_text.unwrap_or(self.text),
            RespondentRole::Operational => self.text,
        }
    }
}

/// One of the ten psychosocial-risk domains, with its ordered items.
#[derive(Debug, Clone)]
pub struct DimensionTemplate {
    pub id: u8,
    pub label: &'static str,
    pub polarity: Polarity,
    pub items: Vec<ItemTemplate>,
}

impl DimensionTemplate {
    pub fn item(&self, key: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| item.key == key)
    }
}

/// Static, versionless questionnaire definition. Loaded once; never
/// mutated afterwards.
#[derive(Debug)]
pub struct QuestionnaireCatalog {
    dimensions: Vec<DimensionTemplate>,
}

impl QuestionnaireCatalog {
    pub const DIMENSION_COUNT: u8 = 10;

    pub fn standard() -> Self {
        Self {
            dimensions: standard_dimensions(),
        }
    }

    pub fn dimensions(&self) -> &[DimensionTemplate] {
        &self.dimensions
    }

    pub fn dimension(&self, id: u8) -> Option<&DimensionTemplate> {
        self.dimensions.iter().find(|dimension| dimension.id == id)
    }

    /// The id of the last dimension; saving it completes the assessment.
    pub const fn final_dimension(&self) -> u8 {
        Self::DIMENSION_COUNT
    }

    /// Renders the questionnaire with the phrasing for the given role.
    pub fn view_for(&self, role: RespondentRole) -> QuestionnaireView {
        let dimensions = self
            .dimensions
            .iter()
            .map(|dimension| DimensionView {
                id: dimension.id,
                label: dimension.label,
                polarity: dimension.polarity,
                items: dimension
                    .items
                    .iter()
                    .map(|item| ItemView {
                        key: item.key,
                        text: item.text_for(role),
                    })
                    .collect(),
            })
            .collect();

        QuestionnaireView { role, dimensions }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub role: RespondentRole,
    pub dimensions: Vec<DimensionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionView {
    pub id: u8,
    pub label: &'static str,
    pub polarity: Polarity,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub key: &'static str,
    pub text: &'static str,
}

fn standard_dimensions() -> Vec<DimensionTemplate> {
    vec![
        DimensionTemplate {
            id: 1,
            label: "Demandas no Trabalho",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "demandas_prazos",
                    text: "Tenho prazos apertados ou impossíveis de cumprir.",
                    management_text: Some(
                        "Minha equipe trabalha sob prazos apertados ou impossíveis de cumprir.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "demandas_ritmo",
                    text: "Preciso trabalhar muito rápido para dar conta das tarefas.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "demandas_acumulo",
                    text: "Acumulo tarefas além do que consigo concluir na jornada.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "demandas_pausas",
                    text: "Deixo de fazer pausas por causa do volume de trabalho.",
                    management_text: Some(
                        "Minha equipe deixa de fazer pausas por causa do volume de trabalho.",
                    ),
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 2,
            label: "Relações Sociais",
            polarity: Polarity::Positive,
            items: vec![
                ItemTemplate {
                    key: "relacoes_respeito",
                    text: "Sou tratado(a) com respeito pelas pessoas com quem trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "relacoes_cooperacao",
                    text: "Posso contar com a cooperação dos colegas quando preciso.",
                    management_text: Some(
                        "As equipes sob minha gestão cooperam entre si quando necessário.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "relacoes_clima",
                    text: "O clima entre as pessoas da minha área é bom.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "relacoes_isolamento",
                    text: "Sinto-me isolado(a) das pessoas no meu trabalho.",
                    management_text: None,
                    reversed: true,
                },
            ],
        },
        DimensionTemplate {
            id: 3,
            label: "Autonomia e Controle",
            polarity: Polarity::Positive,
            items: vec![
                ItemTemplate {
                    key: "autonomia_decisoes",
                    text: "Participo das decisões que afetam o meu trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "autonomia_metodo",
                    text: "Posso escolher como realizar as minhas tarefas.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "autonomia_pausas",
                    text: "Consigo decidir quando fazer uma pausa.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "autonomia_opiniao",
                    text: "Minha opinião é considerada no planejamento das atividades.",
                    management_text: Some(
                        "Minha opinião é considerada nas decisões estratégicas da empresa.",
                    ),
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 4,
            label: "Conflito Trabalho-Família",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "conflito_horarios",
                    text: "Meus horários de trabalho atrapalham meus compromissos pessoais.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "conflito_descanso",
                    text: "Chego em casa cansado(a) demais para a vida familiar.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "conflito_cobranca",
                    text: "Recebo cobranças de trabalho fora do expediente.",
                    management_text: Some(
                        "Preciso acionar minha equipe fora do expediente para cumprir entregas.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "conflito_planos",
                    text: "Preciso cancelar planos pessoais por causa do trabalho.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 5,
            label: "Apoio da Liderança",
            polarity: Polarity::Positive,
            items: vec![
                ItemTemplate {
                    key: "apoio_orientacao",
                    text: "Recebo orientações claras sobre o que é esperado de mim.",
                    management_text: Some(
                        "Recebo da direção orientações claras sobre as metas da minha equipe.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "apoio_escuta",
                    text: "Minha liderança está disposta a ouvir meus problemas de trabalho.",
                    management_text: Some(
                        "A direção está disposta a ouvir os problemas da minha área.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "apoio_feedback",
                    text: "Recebo retorno sobre a qualidade do meu trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "apoio_confianca",
                    text: "Sinto que posso confiar na minha liderança imediata.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 6,
            label: "Reconhecimento e Crescimento",
            polarity: Polarity::Positive,
            items: vec![
                ItemTemplate {
                    key: "reconhecimento_valorizacao",
                    text: "Meu trabalho é valorizado pela empresa.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "reconhecimento_justica",
                    text: "Sou recompensado(a) de forma justa pelo que entrego.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "reconhecimento_desenvolvimento",
                    text: "Tenho oportunidades de aprender e me desenvolver.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "reconhecimento_perspectiva",
                    text: "Vejo perspectiva de crescimento na empresa.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 7,
            label: "Insegurança no Trabalho",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "inseguranca_demissao",
                    text: "Tenho medo de perder meu emprego.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "inseguranca_mudancas",
                    text: "Mudanças na empresa acontecem sem aviso ou explicação.",
                    management_text: Some(
                        "Mudanças decididas acima de mim chegam sem aviso ou explicação.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "inseguranca_futuro",
                    text: "Sinto incerteza sobre o futuro da minha função.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "inseguranca_substituicao",
                    text: "Sinto que posso ser substituído(a) facilmente.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 8,
            label: "Assédio e Violência",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "assedio_humilhacao",
                    text: "Sou exposto(a) a situações humilhantes ou constrangedoras.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "assedio_gritos",
                    text: "Presencio gritos ou tratamento agressivo no ambiente de trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "assedio_ameacas",
                    text: "Recebo ameaças veladas ou explícitas relacionadas ao trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "assedio_isolamento",
                    text: "Pessoas são excluídas ou isoladas de propósito na minha área.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 9,
            label: "Exigências Emocionais",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "emocional_esconder",
                    text: "Preciso esconder o que sinto enquanto trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "emocional_desgaste",
                    text: "Meu trabalho me desgasta emocionalmente.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "emocional_situacoes",
                    text: "Lido com situações emocionalmente difíceis no trabalho.",
                    management_text: Some(
                        "Lido com conflitos e situações emocionalmente difíceis da equipe.",
                    ),
                    reversed: false,
                },
                ItemTemplate {
                    key: "emocional_pensando",
                    text: "Continuo pensando nos problemas do trabalho fora do expediente.",
                    management_text: None,
                    reversed: false,
                },
            ],
        },
        DimensionTemplate {
            id: 10,
            label: "Jornada e Ritmo de Trabalho",
            polarity: Polarity::Negative,
            items: vec![
                ItemTemplate {
                    key: "jornada_extras",
                    text: "Faço horas extras para dar conta do trabalho.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "jornada_imprevisibilidade",
                    text: "Minha escala ou horário muda sem aviso prévio.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "jornada_folgas",
                    text: "Trabalho em dias que seriam de folga ou descanso.",
                    management_text: None,
                    reversed: false,
                },
                ItemTemplate {
                    key: "jornada_desligar",
                    text: "Tenho dificuldade de me desligar do trabalho ao fim do dia.",
                    management_text: None,
                    reversed: true,
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_has_ten_ordered_dimensions() {
        let catalog = QuestionnaireCatalog::standard();
        assert_eq!(
            catalog.dimensions().len(),
            QuestionnaireCatalog::DIMENSION_COUNT as usize
        );
        for (index, dimension) in catalog.dimensions().iter().enumerate() {
            assert_eq!(dimension.id, index as u8 + 1);
            assert!(!dimension.items.is_empty());
        }
    }

    #[test]
    fn polarity_is_fixed_per_dimension_id() {
        let catalog = QuestionnaireCatalog::standard();
        for dimension in catalog.dimensions() {
            let expected = match dimension.id {
                2 | 3 | 5 | 6 => Polarity::Positive,
                _ => Polarity::Negative,
            };
            assert_eq!(
                dimension.polarity, expected,
                "dimension {} has wrong polarity",
                dimension.id
            );
        }
    }

    #[test]
    fn item_keys_are_unique_across_the_questionnaire() {
        let catalog = QuestionnaireCatalog::standard();
        let mut keys = HashSet::new();
        for dimension in catalog.dimensions() {
            for item in &dimension.items {
                assert!(keys.insert(item.key), "duplicate item key {}", item.key);
            }
        }
    }

    #[test]
    fn management_phrasing_falls_back_to_operational_text() {
        let catalog = QuestionnaireCatalog::standard();
        let demandas = catalog.dimension(1).expect("dimension 1 present");
        let prazos = demandas.item("demandas_prazos").expect("item present");
        assert_ne!(
            prazos.text_for(RespondentRole::Management),
            prazos.text_for(RespondentRole::Operational)
        );

        let ritmo = demandas.item("demandas_ritmo").expect("item present");
        assert_eq!(
            ritmo.text_for(RespondentRole::Management),
            ritmo.text_for(RespondentRole::Operational)
        );
    }

    #[test]
    fn view_applies_role_phrasing() {
        let catalog = QuestionnaireCatalog::standard();
        let view = catalog.view_for(RespondentRole::Management);
        assert_eq!(view.dimensions.len(), 10);
        let first_item = &view.dimensions[0].items[0];
        assert!(first_item.text.contains("equipe"));
    }
}
