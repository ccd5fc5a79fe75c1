//! Questionnaire form and confirmation pages.

use formdesk_core::{
  survey::{Coach, Competition, Position, SurveyForm, SurveyResponse},
  validate::FormState,
};

use super::{checked, entry, field_error, input, layout, selected, textarea};

pub fn form_page(state: &FormState<SurveyForm>) -> String {
  let data = &state.data;
  let errors = &state.errors;

  let played: String = [("sim", "Sim"), ("nao", "Não")]
    .into_iter()
    .map(|(value, label)| {
      format!(
        r#"                <label><input type="radio" name="jogava" value="{value}"{}> {label}</label>
"#,
        checked(data.played == value),
      )
    })
    .collect();

  let positions: String = Position::ALL
    .into_iter()
    .map(|p| {
      format!(
        r#"                <option value="{}"{}>{}</option>
"#,
        p.as_str(),
        selected(data.position == p.as_str()),
        p.label(),
      )
    })
    .collect();

  let competitions: String = Competition::ALL
    .into_iter()
    .map(|c| {
      format!(
        r#"                <option value="{}"{}>{}</option>
"#,
        c.as_str(),
        selected(data.competition == c.as_str()),
        c.label(),
      )
    })
    .collect();

  let coaches: String = Coach::ALL
    .into_iter()
    .map(|c| {
      format!(
        r#"                <label><input type="checkbox" name="tecnicos_gostados" value="{}"{}> {}</label>
"#,
        c.as_str(),
        checked(data.has_coach(c)),
        c.label(),
      )
    })
    .collect();

  let body = format!(
    r#"    <form method="post" action="/questionario" novalidate>
{nome}{time}        <div class="field choices">
            <span>Você jogava futebol?</span>
{played}            {jogava_error}
        </div>
        <div class="field">
            <label for="posicao">Posição</label>
            <select id="posicao" name="posicao">
                <option value=""{no_position}>Nenhuma</option>
{positions}            </select>
            {posicao_error}
        </div>
{camisa}{estadio}{jogador}        <div class="field">
            <label for="comp_torce">Competição que mais acompanha</label>
            <select id="comp_torce" name="comp_torce">
                <option value=""{no_competition}>Selecione</option>
{competitions}            </select>
            {comp_error}
        </div>
        <div class="field choices">
            <span>Técnicos de que você gosta</span>
{coaches}            {tecnicos_error}
        </div>
{comentario}        <button type="submit">Enviar</button>
    </form>"#,
    nome = input(errors, "text", "nome", "Nome", &data.name),
    time = input(errors, "text", "time_favorito", "Time favorito", &data.favorite_team),
    jogava_error = field_error(errors, "jogava"),
    no_position = selected(data.position.is_empty()),
    posicao_error = field_error(errors, "posicao"),
    camisa = input(errors, "number", "camisa_numero", "Número da camisa", &data.jersey_number),
    estadio = input(errors, "text", "estadio_visitado", "Estádio visitado", &data.stadium),
    jogador = input(errors, "text", "melhor_jogador", "Melhor jogador", &data.favorite_player),
    no_competition = selected(data.competition.is_empty()),
    comp_error = field_error(errors, "comp_torce"),
    tecnicos_error = field_error(errors, "tecnicos_gostados"),
    comentario = textarea(errors, "comentario", "Comentário", &data.comment),
  );

  layout("Questionário sobre Futebol", &body)
}

pub fn success_page(response: &SurveyResponse) -> String {
  let coaches = response
    .coaches
    .iter()
    .map(|c| c.label())
    .collect::<Vec<_>>()
    .join(", ");

  let body = format!(
    r#"    <p>Obrigado por responder!</p>
    <dl>
{nome}{time}{jogava}{posicao}{camisa}{estadio}{jogador}{comp}{tecnicos}{comentario}    </dl>
    <p><a href="/questionario">Responder novamente</a></p>"#,
    nome = entry("Nome", &response.name),
    time = entry("Time favorito", &response.favorite_team),
    jogava = entry("Jogava futebol", if response.played { "Sim" } else { "Não" }),
    posicao = entry("Posição", response.position.map(Position::label).unwrap_or("")),
    camisa = entry(
      "Número da camisa",
      &response.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
    ),
    estadio = entry("Estádio visitado", &response.stadium),
    jogador = entry("Melhor jogador", &response.favorite_player),
    comp = entry("Competição", response.competition.label()),
    tecnicos = entry("Técnicos", &coaches),
    comentario = entry("Comentário", &response.comment),
  );

  layout("Questionário enviado!", &body)
}

#[cfg(test)]
mod tests {
  use formdesk_core::validate::FieldErrors;

  use super::*;

  #[test]
  fn empty_form_has_no_errors() {
    let page = form_page(&FormState::default());
    assert!(page.contains(r#"action="/questionario""#));
    assert!(!page.contains(r#"class="error""#));
  }

  #[test]
  fn echo_reselects_choices() {
    let mut errors = FieldErrors::default();
    errors.insert("comentario", "Comentário deve ter entre 10 e 300 caracteres.");
    let state = FormState {
      data: SurveyForm {
        played: "nao".into(),
        position: "meio".into(),
        competition: "champions".into(),
        coaches: vec!["diniz".into()],
        ..Default::default()
      },
      errors,
    };
    let page = form_page(&state);
    assert!(page.contains(r#"value="nao" checked"#));
    assert!(page.contains(r#"<option value="meio" selected>"#));
    assert!(page.contains(r#"<option value="champions" selected>"#));
    assert!(page.contains(r#"value="diniz" checked"#));
    assert!(page.contains("Comentário deve ter entre 10 e 300 caracteres."));
  }

  #[test]
  fn confirmation_lists_labels() {
    let response = SurveyResponse {
      name:            "Marta".into(),
      favorite_team:   "Santos".into(),
      played:          true,
      position:        Some(Position::Forward),
      jersey_number:   Some(10),
      stadium:         "Vila Belmiro".into(),
      favorite_player: "Pelé".into(),
      competition:     Competition::WorldCup,
      coaches:         vec![Coach::Tite, Coach::Guardiola],
      comment:         "Futebol é arte".into(),
    };
    let page = success_page(&response);
    assert!(page.contains("Atacante"));
    assert!(page.contains("Copa do Mundo"));
    assert!(page.contains("Tite, Pep Guardiola"));
    assert!(page.contains("<dd>10</dd>"));
  }
}
