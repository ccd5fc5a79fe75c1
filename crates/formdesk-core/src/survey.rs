//! The football questionnaire. Validated and echoed, never stored.

use std::sync::LazyLock;

use crate::validate::{FieldRule, FormData, FormState, Validation, Value, validate};

// ─── Vocabularies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
  Goalkeeper,
  Defender,
  FullBack,
  Midfielder,
  Forward,
}

impl Position {
  pub const ALL: [Position; 5] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::FullBack,
    Position::Midfielder,
    Position::Forward,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Position::Goalkeeper => "goleiro",
      Position::Defender   => "zagueiro",
      Position::FullBack   => "lateral",
      Position::Midfielder => "meio",
      Position::Forward    => "atacante",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Position::Goalkeeper => "Goleiro",
      Position::Defender   => "Zagueiro",
      Position::FullBack   => "Lateral",
      Position::Midfielder => "Meio-campo",
      Position::Forward    => "Atacante",
    }
  }

  fn from_tag(s: &str) -> Option<Self> { Self::ALL.into_iter().find(|p| p.as_str() == s) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Competition {
  Brasileirao,
  Libertadores,
  Champions,
  WorldCup,
}

impl Competition {
  pub const ALL: [Competition; 4] = [
    Competition::Brasileirao,
    Competition::Libertadores,
    Competition::Champions,
    Competition::WorldCup,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Competition::Brasileirao  => "brasileirao",
      Competition::Libertadores => "libertadores",
      Competition::Champions    => "champions",
      Competition::WorldCup     => "copa-do-mundo",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Competition::Brasileirao  => "Brasileirão",
      Competition::Libertadores => "Libertadores",
      Competition::Champions    => "Champions League",
      Competition::WorldCup     => "Copa do Mundo",
    }
  }

  fn from_tag(s: &str) -> Option<Self> { Self::ALL.into_iter().find(|c| c.as_str() == s) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coach {
  Tite,
  Diniz,
  Ancelotti,
  Guardiola,
  Mourinho,
}

impl Coach {
  pub const ALL: [Coach; 5] = [
    Coach::Tite,
    Coach::Diniz,
    Coach::Ancelotti,
    Coach::Guardiola,
    Coach::Mourinho,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Coach::Tite      => "tite",
      Coach::Diniz     => "diniz",
      Coach::Ancelotti => "ancelotti",
      Coach::Guardiola => "guardiola",
      Coach::Mourinho  => "mourinho",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Coach::Tite      => "Tite",
      Coach::Diniz     => "Fernando Diniz",
      Coach::Ancelotti => "Carlo Ancelotti",
      Coach::Guardiola => "Pep Guardiola",
      Coach::Mourinho  => "José Mourinho",
    }
  }

  fn from_tag(s: &str) -> Option<Self> { Self::ALL.into_iter().find(|c| c.as_str() == s) }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

pub const NAME_MESSAGE: &str = "Nome deve ter pelo menos 3 caracteres.";
pub const TEAM_MESSAGE: &str = "Informe seu time favorito.";
pub const PLAYED_MESSAGE: &str = "Selecione se você jogava futebol.";
pub const POSITION_MESSAGE: &str = "Posição inválida.";
pub const JERSEY_MESSAGE: &str = "Número da camisa deve estar entre 1 e 99.";
pub const STADIUM_MESSAGE: &str = "Informe um estádio que já visitou.";
pub const PLAYER_MESSAGE: &str = "Informe o melhor jogador para você.";
pub const COMPETITION_MESSAGE: &str = "Competição inválida.";
pub const COACH_MESSAGE: &str = "Técnico inválido.";
pub const COMMENT_MESSAGE: &str = "Comentário deve ter entre 10 e 300 caracteres.";

const PLAYED_TAGS: &[&str] = &["sim", "nao"];
const POSITION_TAGS: &[&str] = &["goleiro", "zagueiro", "lateral", "meio", "atacante"];
const COMPETITION_TAGS: &[&str] = &["brasileirao", "libertadores", "champions", "copa-do-mundo"];
const COACH_TAGS: &[&str] = &["tite", "diniz", "ancelotti", "guardiola", "mourinho"];

pub static SURVEY_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
  vec![
    FieldRule::new("nome").trim().length(3, None, NAME_MESSAGE).escape(),
    FieldRule::new("time_favorito").trim().length(2, None, TEAM_MESSAGE).escape(),
    FieldRule::new("jogava").one_of(PLAYED_TAGS, PLAYED_MESSAGE),
    FieldRule::new("posicao")
      .optional()
      .one_of(POSITION_TAGS, POSITION_MESSAGE),
    FieldRule::new("camisa_numero")
      .optional()
      .int_range(1, 99, JERSEY_MESSAGE),
    FieldRule::new("estadio_visitado").trim().length(3, None, STADIUM_MESSAGE).escape(),
    FieldRule::new("melhor_jogador").trim().length(3, None, PLAYER_MESSAGE).escape(),
    FieldRule::new("comp_torce").one_of(COMPETITION_TAGS, COMPETITION_MESSAGE),
    FieldRule::new("tecnicos_gostados")
      .optional()
      .to_list()
      .every_in(COACH_TAGS, COACH_MESSAGE),
    FieldRule::new("comentario")
      .trim()
      .length(10, Some(300), COMMENT_MESSAGE)
      .escape(),
  ]
});

// ─── Echo and result ─────────────────────────────────────────────────────────

/// Values shown back in the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyForm {
  pub name:            String,
  pub favorite_team:   String,
  pub played:          String,
  pub position:        String,
  pub jersey_number:   String,
  pub stadium:         String,
  pub favorite_player: String,
  pub competition:     String,
  pub coaches:         Vec<String>,
  pub comment:         String,
}

impl SurveyForm {
  fn from_validation(v: &Validation) -> Self {
    Self {
      name:            v.echo("nome"),
      favorite_team:   v.echo("time_favorito"),
      played:          v.echo("jogava"),
      position:        v.echo("posicao"),
      jersey_number:   v.echo("camisa_numero"),
      stadium:         v.echo("estadio_visitado"),
      favorite_player: v.echo("melhor_jogador"),
      competition:     v.echo("comp_torce"),
      coaches:         v.echo_list("tecnicos_gostados"),
      comment:         v.echo("comentario"),
    }
  }

  pub fn has_coach(&self, coach: Coach) -> bool {
    self.coaches.iter().any(|c| c == coach.as_str())
  }
}

/// An accepted questionnaire. Text fields are HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
  pub name:            String,
  pub favorite_team:   String,
  pub played:          bool,
  pub position:        Option<Position>,
  pub jersey_number:   Option<u8>,
  pub stadium:         String,
  pub favorite_player: String,
  pub competition:     Competition,
  pub coaches:         Vec<Coach>,
  pub comment:         String,
}

impl SurveyResponse {
  /// Build the typed response from a passing validation. Returns the name of
  /// the first field whose value does not map onto the domain type.
  fn from_validation(v: &Validation) -> Result<Self, &'static str> {
    let position = match v.value("posicao") {
      value if value.is_falsy() => None,
      value => Some(Position::from_tag(&value.to_echo()).ok_or("posicao")?),
    };

    let jersey_number = match v.value("camisa_numero") {
      value if value.is_falsy() => None,
      Value::Text(s) => Some(s.parse::<u8>().map_err(|_| "camisa_numero")?),
      _ => return Err("camisa_numero"),
    };

    let coaches = v
      .echo_list("tecnicos_gostados")
      .iter()
      .map(|s| Coach::from_tag(s).ok_or("tecnicos_gostados"))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      name: v.echo("nome"),
      favorite_team: v.echo("time_favorito"),
      played: v.echo("jogava") == "sim",
      position,
      jersey_number,
      stadium: v.echo("estadio_visitado"),
      favorite_player: v.echo("melhor_jogador"),
      competition: Competition::from_tag(&v.echo("comp_torce")).ok_or("comp_torce")?,
      coaches,
      comment: v.echo("comentario"),
    })
  }
}

/// Validate a questionnaire submission.
pub fn validate_survey(form: &FormData) -> Result<SurveyResponse, FormState<SurveyForm>> {
  let outcome = validate(&SURVEY_RULES, form);

  if outcome.is_valid() {
    match SurveyResponse::from_validation(&outcome) {
      Ok(response) => return Ok(response),
      Err(field) => {
        let mut errors = outcome.errors.clone();
        errors.insert(field, "Valor inválido.");
        return Err(FormState { data: SurveyForm::from_validation(&outcome), errors });
      }
    }
  }

  Err(FormState {
    data:   SurveyForm::from_validation(&outcome),
    errors: outcome.errors,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_pairs() -> Vec<(String, String)> {
    [
      ("nome", "Marta"),
      ("time_favorito", "Santos"),
      ("jogava", "sim"),
      ("posicao", "atacante"),
      ("camisa_numero", "10"),
      ("estadio_visitado", "Vila Belmiro"),
      ("melhor_jogador", "Pelé"),
      ("comp_torce", "libertadores"),
      ("tecnicos_gostados", "tite"),
      ("tecnicos_gostados", "ancelotti"),
      ("comentario", "Futebol é arte <3"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
  }

  fn with(field: &str, value: &str) -> FormData {
    valid_pairs()
      .into_iter()
      .filter(|(k, _)| k != field)
      .chain([(field.to_string(), value.to_string())])
      .collect()
  }

  fn without(field: &str) -> FormData {
    valid_pairs().into_iter().filter(|(k, _)| k != field).collect()
  }

  #[test]
  fn valid_survey_is_typed() {
    let response = validate_survey(&FormData::new(valid_pairs())).unwrap();
    assert_eq!(response.name, "Marta");
    assert!(response.played);
    assert_eq!(response.position, Some(Position::Forward));
    assert_eq!(response.jersey_number, Some(10));
    assert_eq!(response.competition, Competition::Libertadores);
    assert_eq!(response.coaches, vec![Coach::Tite, Coach::Ancelotti]);
    assert_eq!(response.comment, "Futebol é arte &lt;3");
  }

  #[test]
  fn optional_fields_may_be_blank() {
    let mut pairs = valid_pairs();
    pairs.retain(|(k, _)| k != "posicao" && k != "camisa_numero" && k != "tecnicos_gostados");
    pairs.push(("posicao".into(), String::new()));
    pairs.push(("camisa_numero".into(), String::new()));
    let response = validate_survey(&FormData::new(pairs)).unwrap();
    assert_eq!(response.position, None);
    assert_eq!(response.jersey_number, None);
    assert!(response.coaches.is_empty());
  }

  #[test]
  fn jersey_number_bounds() {
    for bad in ["0", "100", "dez"] {
      let state = validate_survey(&with("camisa_numero", bad)).unwrap_err();
      assert_eq!(state.errors.get("camisa_numero"), Some(JERSEY_MESSAGE), "{bad}");
      assert_eq!(state.data.jersey_number, bad);
    }
    assert!(validate_survey(&with("camisa_numero", "99")).is_ok());
  }

  #[test]
  fn unknown_coach_rejects_the_field() {
    let mut pairs = valid_pairs();
    pairs.push(("tecnicos_gostados".into(), "felipao".into()));
    let state = validate_survey(&FormData::new(pairs)).unwrap_err();
    assert_eq!(state.errors.get("tecnicos_gostados"), Some(COACH_MESSAGE));
    assert_eq!(state.data.coaches, vec!["tite", "ancelotti", "felipao"]);
  }

  #[test]
  fn played_is_required() {
    let state = validate_survey(&without("jogava")).unwrap_err();
    assert_eq!(state.errors.get("jogava"), Some(PLAYED_MESSAGE));
  }

  #[test]
  fn enumerations_are_closed() {
    let state = validate_survey(&with("posicao", "ponta")).unwrap_err();
    assert_eq!(state.errors.get("posicao"), Some(POSITION_MESSAGE));
    let state = validate_survey(&with("comp_torce", "copa-do-brasil")).unwrap_err();
    assert_eq!(state.errors.get("comp_torce"), Some(COMPETITION_MESSAGE));
  }

  #[test]
  fn comment_bounds_and_echo() {
    let state = validate_survey(&with("comentario", "  curto  ")).unwrap_err();
    assert_eq!(state.errors.get("comentario"), Some(COMMENT_MESSAGE));
    assert_eq!(state.data.comment, "curto");
    assert!(validate_survey(&with("comentario", &"c".repeat(301))).is_err());
  }

  #[test]
  fn errors_are_collected_for_every_field() {
    let state = validate_survey(&FormData::default()).unwrap_err();
    for field in [
      "nome",
      "time_favorito",
      "jogava",
      "estadio_visitado",
      "melhor_jogador",
      "comp_torce",
      "comentario",
    ] {
      assert!(state.errors.contains(field), "{field}");
    }
    assert!(!state.errors.contains("posicao"));
    assert!(!state.errors.contains("camisa_numero"));
    assert!(!state.errors.contains("tecnicos_gostados"));
  }
}
